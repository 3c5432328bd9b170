//! Lenient JSON reader.
//!
//! Reads the JSON subset needed for configuration-style documents: objects,
//! arrays, quoted strings and unquoted scalars. Unquoted words are classified
//! as float, integer, boolean or string, so `{ name: Alice }` reads fine.
//! A trailing comma before a closing bracket is accepted; a container left
//! open at the end of input is not.
//!
//! Writing JSON is not supported; hand the tree to `serde_json` instead,
//! since [`Value`] implements `Serialize`.
//!
//! ## Examples
//!
//! ```rust
//! use tiny_doc::{doc, from_json_str};
//!
//! let value = from_json_str(r#"{"id": 7, "tags": ["a", "b",], "ok": TRUE}"#).unwrap();
//! assert_eq!(value, doc!({ "id": 7, "tags": ["a", "b"], "ok": true }));
//! ```

use crate::format::Format;
use crate::parse::{Control, Grammar, NodeId, ParseContext, Sink, Step, TokenKind};
use crate::scalar::{classify, unescape};
use crate::tokenizer::{Definition, Token, Tokenizer};
use crate::{Error, Result, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Token kinds of the JSON grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsonTokenKind {
    QuotedKey,
    QuotedWord,
    ObjectOpen,
    ObjectClose,
    ArrayOpen,
    ArrayClose,
    Comma,
    BareKey,
    BareWord,
    /// Never emitted; JSON ignores line structure.
    EndOfLine,
}

impl TokenKind for JsonTokenKind {
    fn control(token: &Token<Self>) -> Option<Control> {
        match token.kind {
            JsonTokenKind::EndOfLine => Some(Control::NewLine),
            _ => None,
        }
    }
}

static TOKENIZER: Lazy<Tokenizer<JsonTokenKind>> = Lazy::new(|| {
    use JsonTokenKind::*;

    let def = |kind: JsonTokenKind, pattern: &str, priority: u32| {
        Definition::new(
            kind,
            Regex::new(pattern).expect("JSON token pattern is valid"),
            priority,
        )
    };
    Tokenizer::new(
        vec![
            def(QuotedKey, r#""((?:[^"\\]|\\.)*)" *:"#, 0),
            def(QuotedWord, r#""((?:[^"\\]|\\.)*)""#, 1),
            def(ObjectOpen, r"\{", 2),
            def(ObjectClose, r"\}", 3),
            def(ArrayOpen, r"\[", 4),
            def(ArrayClose, r"\]", 5),
            def(Comma, ",", 6),
            def(BareKey, r"([^\s:,{}\[\]]*) *:", 7),
            def(BareWord, r"[^\s:,{}\[\]]+", 8),
        ],
        None,
    )
});

/// The JSON token table.
pub fn tokenizer() -> &'static Tokenizer<JsonTokenKind> {
    &TOKENIZER
}

#[derive(Debug)]
enum JsonParser {
    /// Dispatches on the first token of a value
    Any { sink: Sink },
    Object { id: NodeId, expecting_separator: bool },
    Array { id: NodeId, expecting_separator: bool },
    Value { sink: Sink },
}

impl Grammar for JsonParser {
    type Kind = JsonTokenKind;

    fn step(self, ctx: &mut ParseContext<'_, Self>) -> Result<Step<Self>> {
        use JsonTokenKind::*;

        let Some(kind) = ctx.current_kind() else {
            return Err(ctx.eof("a value"));
        };
        match self {
            JsonParser::Any { sink } => match kind {
                ObjectOpen => {
                    let id = ctx.open_object(sink)?;
                    ctx.consume_token();
                    Ok(Step::Replace(JsonParser::Object {
                        id,
                        expecting_separator: false,
                    }))
                }
                ArrayOpen => {
                    let id = ctx.open_array(sink)?;
                    ctx.consume_token();
                    Ok(Step::Replace(JsonParser::Array {
                        id,
                        expecting_separator: false,
                    }))
                }
                QuotedWord | BareWord => Ok(Step::Replace(JsonParser::Value { sink })),
                _ => Err(ctx.unexpected("expected a value")),
            },

            JsonParser::Object {
                id,
                expecting_separator,
            } => match kind {
                QuotedKey | BareKey => {
                    if expecting_separator {
                        return Err(ctx.unexpected("expected `,` or `}`"));
                    }
                    let nested = match ctx.lookahead_kind() {
                        Some(ObjectOpen | ArrayOpen) => true,
                        Some(QuotedWord | BareWord) => false,
                        Some(_) => return Err(ctx.unexpected_lookahead("expected a value")),
                        None => return Err(ctx.eof("a value")),
                    };
                    let text = ctx.consume_text();
                    let key = if kind == QuotedKey { unescape(&text) } else { text };
                    let sink = Sink::Entry(id, key);
                    let child = if nested {
                        JsonParser::Any { sink }
                    } else {
                        JsonParser::Value { sink }
                    };
                    Ok(Step::Push(
                        JsonParser::Object {
                            id,
                            expecting_separator: true,
                        },
                        child,
                    ))
                }
                Comma => {
                    if !expecting_separator {
                        return Err(ctx.unexpected("expected a key"));
                    }
                    ctx.consume_token();
                    Ok(Step::Keep(JsonParser::Object {
                        id,
                        expecting_separator: false,
                    }))
                }
                ObjectClose => {
                    ctx.consume_token();
                    Ok(Step::Pop)
                }
                _ => Err(ctx.unexpected("expected a key or `}`")),
            },

            JsonParser::Array {
                id,
                expecting_separator,
            } => match kind {
                ObjectOpen | ArrayOpen | QuotedWord | BareWord => {
                    if expecting_separator {
                        return Err(ctx.unexpected("expected `,` or `]`"));
                    }
                    Ok(Step::Push(
                        JsonParser::Array {
                            id,
                            expecting_separator: true,
                        },
                        JsonParser::Any {
                            sink: Sink::Item(id),
                        },
                    ))
                }
                Comma => {
                    if !expecting_separator {
                        return Err(ctx.unexpected("expected a value"));
                    }
                    ctx.consume_token();
                    Ok(Step::Keep(JsonParser::Array {
                        id,
                        expecting_separator: false,
                    }))
                }
                ArrayClose => {
                    ctx.consume_token();
                    Ok(Step::Pop)
                }
                _ => Err(ctx.unexpected("expected a value or `]`")),
            },

            JsonParser::Value { sink } => {
                let value = match kind {
                    QuotedWord => Value::String(unescape(&ctx.consume_text())),
                    BareWord => classify(&ctx.consume_text(), "true", "false"),
                    _ => return Err(ctx.unexpected("expected a scalar")),
                };
                ctx.publish(sink, value);
                Ok(Step::Pop)
            }
        }
    }

    fn end(self, ctx: &mut ParseContext<'_, Self>) -> Result<()> {
        match self {
            JsonParser::Object { .. } => Err(ctx.eof("`}`")),
            JsonParser::Array { .. } => Err(ctx.eof("`]`")),
            JsonParser::Any { .. } | JsonParser::Value { .. } => Ok(()),
        }
    }
}

/// The JSON format. Read-only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Json;

impl Format for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn read(&self, text: &str) -> Result<Value> {
        debug!(format = self.name(), len = text.len(), "reading document");
        ParseContext::new(
            TOKENIZER.tokenize(text),
            JsonParser::Any { sink: Sink::Root },
        )
        .run()
    }

    fn write(&self, _value: &Value) -> Result<String> {
        Err(Error::unsupported("writing JSON"))
    }
}
