//! Configuration options for the YAML writer.
//!
//! - [`WriteOptions`]: Main configuration struct
//! - [`LineEnding`]: Line terminator written after every line
//! - [`KeyQuoting`]: When object keys are written quoted
//!
//! Every combination reads back to the same tree.
//!
//! ## Examples
//!
//! ```rust
//! use tiny_doc::{doc, to_yaml_string_with_options, KeyQuoting, LineEnding, WriteOptions};
//!
//! let value = doc!({ "x": 1 });
//!
//! let options = WriteOptions::new().with_line_ending(LineEnding::CrLf);
//! assert_eq!(to_yaml_string_with_options(&value, &options).unwrap(), "x: 1\r\n");
//!
//! let options = WriteOptions::new().with_key_quoting(KeyQuoting::Always);
//! assert_eq!(to_yaml_string_with_options(&value, &options).unwrap(), "\"x\": 1\n");
//! ```

/// Line terminator choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Returns the string representation of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Key quoting policy.
///
/// - **AsNeeded**: Quote only keys the bare-key pattern cannot carry
/// - **Always**: Quote every key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyQuoting {
    #[default]
    AsNeeded,
    Always,
}

/// Configuration options for YAML output.
///
/// # Examples
///
/// ```rust
/// use tiny_doc::{KeyQuoting, LineEnding, WriteOptions};
///
/// let options = WriteOptions::new();
/// assert_eq!(options.line_ending, LineEnding::Lf);
/// assert_eq!(options.key_quoting, KeyQuoting::AsNeeded);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub line_ending: LineEnding,
    pub key_quoting: KeyQuoting,
}

impl WriteOptions {
    /// Creates default options (LF line endings, keys quoted as needed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    #[must_use]
    pub fn with_key_quoting(mut self, key_quoting: KeyQuoting) -> Self {
        self.key_quoting = key_quoting;
        self
    }
}
