//! Indentation-based YAML subset.
//!
//! The reader understands block mappings, block sequences (including the
//! compact style where items sit at their key's indent), plain and
//! double-quoted scalars. Indentation is two spaces per level. Booleans are
//! the case-insensitive words `yes` and `no`; `true` stays a string.
//!
//! The writer emits the same subset: every string is double-quoted, so any
//! tree written by [`Yaml`] reads back to an equal tree, except that empty
//! containers read back as null.
//!
//! ## Examples
//!
//! ```rust
//! use tiny_doc::{doc, from_yaml_str, to_yaml_string};
//!
//! let value = from_yaml_str("server:\n  port: 8080\n  hosts:\n  - a\n  - b\n").unwrap();
//! assert_eq!(value, doc!({ "server": { "port": 8080, "hosts": ["a", "b"] } }));
//!
//! let text = to_yaml_string(&value).unwrap();
//! assert_eq!(text, "server:\n  port: 8080\n  hosts:\n    - \"a\"\n    - \"b\"\n");
//! assert_eq!(from_yaml_str(&text).unwrap(), value);
//! ```

mod parser;
mod writer;

use crate::format::Format;
use crate::options::WriteOptions;
use crate::parse::{Control, ParseContext, TokenKind};
use crate::tokenizer::{Definition, Token, Tokenizer};
use crate::{Result, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use parser::YamlParser;
use writer::YamlWriter;

/// Token kinds of the YAML grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YamlTokenKind {
    /// Leading run of two-space units
    Indent,
    QuotedKey,
    QuotedWord,
    /// `-` followed by a space or the end of the line
    ArrayItemMarker,
    BareKey,
    BareWord,
    EndOfLine,
}

impl TokenKind for YamlTokenKind {
    fn control(token: &Token<Self>) -> Option<Control> {
        match token.kind {
            YamlTokenKind::Indent => Some(Control::Indent(token.text.len() / 2)),
            YamlTokenKind::EndOfLine => Some(Control::NewLine),
            _ => None,
        }
    }
}

static TOKENIZER: Lazy<Tokenizer<YamlTokenKind>> = Lazy::new(|| {
    use YamlTokenKind::*;

    let def = |kind: YamlTokenKind, pattern: &str, priority: u32| {
        Definition::new(
            kind,
            Regex::new(pattern).expect("YAML token pattern is valid"),
            priority,
        )
    };
    Tokenizer::new(
        vec![
            def(Indent, r"^(  )+", 1).with_capture_group(0),
            def(QuotedKey, r#""((?:[^"\\]|\\.)*)" *:"#, 4),
            def(QuotedWord, r#""((?:[^"\\]|\\.)*)""#, 5),
            def(ArrayItemMarker, r"-(?: |$)", 10),
            def(BareKey, r"([^\s:-][^\s:]*) *:", 20),
            def(BareWord, r"[^\s:]+", 21),
        ],
        Some(EndOfLine),
    )
});

/// The YAML token table.
pub fn tokenizer() -> &'static Tokenizer<YamlTokenKind> {
    &TOKENIZER
}

/// The YAML format.
///
/// # Examples
///
/// ```rust
/// use tiny_doc::{doc, Format, LineEnding, WriteOptions, Yaml};
///
/// let yaml = Yaml::with_options(WriteOptions::new().with_line_ending(LineEnding::CrLf));
/// let text = yaml.write(&doc!({ "a": [1, null] })).unwrap();
/// assert_eq!(text, "a:\r\n  - 1\r\n  -\r\n");
/// assert_eq!(yaml.read(&text).unwrap(), doc!({ "a": [1, null] }));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Yaml {
    options: WriteOptions,
}

impl Yaml {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: WriteOptions) -> Self {
        Yaml { options }
    }

    #[must_use]
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }
}

impl Format for Yaml {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn read(&self, text: &str) -> Result<Value> {
        debug!(format = self.name(), len = text.len(), "reading document");
        ParseContext::new(TOKENIZER.tokenize(text), YamlParser::root()).run()
    }

    fn write(&self, value: &Value) -> Result<String> {
        debug!(format = self.name(), kind = %value.kind(), "writing document");
        let mut writer = YamlWriter::new(&self.options);
        writer.write(value, 0, false)?;
        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use YamlTokenKind::*;

    fn kinds(line: &str) -> Vec<YamlTokenKind> {
        tokenizer().tokenize_line(line, 1).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_entries() {
        assert_eq!(kinds("key: value"), vec![BareKey, BareWord, EndOfLine]);
        assert_eq!(kinds("    key:"), vec![Indent, BareKey, EndOfLine]);
        assert_eq!(
            kinds(r#"  "a key": "a value""#),
            vec![Indent, QuotedKey, QuotedWord, EndOfLine]
        );
    }

    #[test]
    fn test_tokenize_item_markers() {
        assert_eq!(kinds("- a"), vec![ArrayItemMarker, BareWord, EndOfLine]);
        assert_eq!(kinds("- - a"), vec![ArrayItemMarker, ArrayItemMarker, BareWord, EndOfLine]);
        assert_eq!(kinds("-"), vec![ArrayItemMarker, EndOfLine]);
        assert_eq!(kinds("- -5"), vec![ArrayItemMarker, BareWord, EndOfLine]);
        assert_eq!(kinds("- k: v"), vec![ArrayItemMarker, BareKey, BareWord, EndOfLine]);
    }

    #[test]
    fn test_indent_token_text() {
        let tokens = tokenizer().tokenize_line("     x", 1);
        assert_eq!(tokens[0].kind, Indent);
        assert_eq!(tokens[0].text, "    ");
        assert_eq!(YamlTokenKind::control(&tokens[0]), Some(Control::Indent(2)));
    }

    #[test]
    fn test_quoted_marker_is_a_word() {
        let tokens = tokenizer().tokenize_line(r#"- "- x""#, 1);
        assert_eq!(tokens[1].kind, QuotedWord);
        assert_eq!(tokens[1].text, "- x");
    }

    #[test]
    fn test_options_follow_the_format() {
        use crate::options::LineEnding;

        assert_eq!(Yaml::new().options(), &WriteOptions::default());
        let options = WriteOptions::new().with_line_ending(LineEnding::CrLf);
        let yaml = Yaml::with_options(options.clone());
        assert_eq!(yaml.options(), &options);
        assert_eq!(yaml.write(&Value::from(1)).unwrap(), "1\r\n");
    }
}
