//! Error types for reading, writing and coercing documents.
//!
//! ## Error Categories
//!
//! - **Grammar errors**: [`Error::Malformed`], [`Error::Indentation`] and
//!   [`Error::UnexpectedEof`] carry the line (and column where a token is
//!   available) at which the automaton gave up
//! - **Accessor errors**: [`Error::TypeCoercion`], [`Error::KeyType`] and
//!   [`Error::IndexOutOfBounds`] come from [`Value::value`](crate::Value::value)
//!   and friends
//! - **Tree errors**: [`Error::Merge`] when two incompatible nodes are merged
//! - **Unsupported operations**: e.g. writing JSON
//!
//! Characters the tokenizer cannot match are skipped, never reported.
//!
//! ## Examples
//!
//! ```rust
//! use tiny_doc::{from_yaml_str, Error};
//!
//! let err = from_yaml_str("a: 1 2").unwrap_err();
//! assert!(matches!(err, Error::Malformed { line: 1, .. }));
//! ```

use crate::ValueKind;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A token that the active grammar state does not accept
    #[error("Malformed input at line {line}, column {column}: unexpected {found} `{text}` ({msg})")]
    Malformed {
        found: String,
        text: String,
        line: usize,
        column: usize,
        msg: String,
    },

    /// A YAML line indented deeper than its container allows
    #[error("Indentation error at line {line}, column {column}: expected indent level {expected}, found {found}")]
    Indentation {
        line: usize,
        column: usize,
        expected: usize,
        found: usize,
    },

    /// Input ended while a construct was still open
    #[error("Unexpected end of input after line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// The stored value cannot be converted to the requested shape
    #[error("Cannot coerce {found} to {expected}")]
    TypeCoercion { expected: String, found: String },

    /// A key of the wrong kind was used to address a node
    #[error("Key {key} cannot address a value of kind {kind}")]
    KeyType { key: String, kind: ValueKind },

    /// An array index past the end of the array
    #[error("Index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two nodes that cannot be merged
    #[error("Cannot merge {incoming} into {target}")]
    Merge { incoming: ValueKind, target: ValueKind },

    /// An operation the format or value does not support
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// Creates a malformed-input error for an offending token.
    ///
    /// `column` is 1-based.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tiny_doc::Error;
    ///
    /// let err = Error::malformed("Comma", ",", 3, 8, "expected a value");
    /// assert!(err.to_string().contains("line 3, column 8"));
    /// ```
    pub fn malformed(found: &str, text: &str, line: usize, column: usize, msg: &str) -> Self {
        Error::Malformed {
            found: found.to_string(),
            text: text.to_string(),
            line,
            column,
            msg: msg.to_string(),
        }
    }

    /// Creates an indentation error.
    pub fn indentation(line: usize, column: usize, expected: usize, found: usize) -> Self {
        Error::Indentation {
            line,
            column,
            expected,
            found,
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            expected: expected.to_string(),
        }
    }

    /// Creates a coercion error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tiny_doc::Error;
    ///
    /// let err = Error::type_coercion("i64", "String \"abc\"");
    /// assert!(err.to_string().contains("to i64"));
    /// ```
    pub fn type_coercion(expected: &str, found: &str) -> Self {
        Error::TypeCoercion {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a key-kind error.
    pub fn key_type(key: &str, kind: ValueKind) -> Self {
        Error::KeyType {
            key: key.to_string(),
            kind,
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(msg: &str) -> Self {
        Error::UnsupportedOperation(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = Error::malformed("BareWord", "2", 1, 6, "expected end of line");
        let msg = err.to_string();
        assert!(msg.contains("line 1, column 6"));
        assert!(msg.contains("BareWord `2`"));
    }

    #[test]
    fn test_merge_display() {
        let err = Error::Merge {
            incoming: ValueKind::Array,
            target: ValueKind::Object,
        };
        assert_eq!(err.to_string(), "Cannot merge Array into Object");
    }
}
