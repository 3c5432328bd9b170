//! Grammar parsers for the YAML subset.
//!
//! Containers learn their indent from their first child instead of from the
//! line that introduces them. A container whose first child shares a line with
//! an item marker (`- a: 1`) is created with a *virtual indent*: the number of
//! levels the markers before it would have occupied had the child started on
//! its own line.

use super::YamlTokenKind;
use crate::parse::{Grammar, NodeId, ParseContext, Sink, Step};
use crate::scalar::{classify, unescape};
use crate::{Result, Value};

/// Indent bookkeeping shared by mappings and sequences.
#[derive(Debug)]
pub(super) struct Block {
    id: NodeId,
    indent: Option<usize>,
    virtual_indent: usize,
    count: usize,
}

impl Block {
    fn new(id: NodeId, virtual_indent: usize) -> Self {
        Block {
            id,
            indent: None,
            virtual_indent,
            count: 0,
        }
    }

    /// Fixes the block's indent on first use and compares the current line
    /// against it. Returns `false` when the line belongs to an enclosing block.
    fn check_indent(&mut self, ctx: &ParseContext<'_, YamlParser>) -> Result<bool> {
        let line_indent = if self.count == 0 {
            ctx.indent_level() + self.virtual_indent
        } else {
            ctx.indent_level()
        };
        let indent = *self.indent.get_or_insert(line_indent);
        if line_indent > indent {
            return Err(ctx.bad_indent(indent, line_indent));
        }
        Ok(line_indent == indent)
    }

    fn fixed_indent(&self) -> usize {
        self.indent.unwrap_or(self.virtual_indent)
    }
}

#[derive(Debug)]
pub(super) enum YamlParser {
    /// Dispatches on the first token of a node
    Any { sink: Sink, virtual_indent: usize },
    Object(Block),
    /// `compact` sequences sit at the indent of the key that owns them
    Array { block: Block, compact: bool },
    Value { sink: Sink },
    /// A key followed by the end of its line; the value, if any, is the
    /// block on the following lines
    EmptyProperty { sink: Sink, expected: usize },
}

impl YamlParser {
    pub(super) fn root() -> Self {
        YamlParser::Any {
            sink: Sink::Root,
            virtual_indent: 0,
        }
    }
}

impl Grammar for YamlParser {
    type Kind = YamlTokenKind;

    fn step(self, ctx: &mut ParseContext<'_, Self>) -> Result<Step<Self>> {
        use YamlTokenKind::*;

        let Some(kind) = ctx.current_kind() else {
            return Err(ctx.eof("a value"));
        };
        match self {
            YamlParser::Any {
                sink,
                virtual_indent,
            } => match kind {
                BareKey | QuotedKey => {
                    let id = ctx.open_object(sink)?;
                    Ok(Step::Replace(YamlParser::Object(Block::new(
                        id,
                        virtual_indent,
                    ))))
                }
                ArrayItemMarker => {
                    let id = ctx.open_array(sink)?;
                    Ok(Step::Replace(YamlParser::Array {
                        block: Block::new(id, virtual_indent),
                        compact: false,
                    }))
                }
                BareWord | QuotedWord => Ok(Step::Replace(YamlParser::Value { sink })),
                _ => Err(ctx.unexpected("expected a value")),
            },

            YamlParser::Object(mut block) => {
                if !block.check_indent(ctx)? {
                    return Ok(Step::Pop);
                }
                if !matches!(kind, BareKey | QuotedKey) {
                    return Err(ctx.unexpected("expected a key"));
                }
                let child_is_block = match ctx.lookahead_kind() {
                    Some(BareWord | QuotedWord) => false,
                    Some(EndOfLine) | None => true,
                    Some(_) => {
                        return Err(ctx.unexpected_lookahead("expected a value or end of line"))
                    }
                };
                let text = ctx.consume_text();
                let key = if kind == QuotedKey { unescape(&text) } else { text };
                let sink = Sink::Entry(block.id, key);
                let child = if child_is_block {
                    YamlParser::EmptyProperty {
                        sink,
                        expected: block.fixed_indent() + 1,
                    }
                } else {
                    YamlParser::Value { sink }
                };
                block.count += 1;
                Ok(Step::Push(YamlParser::Object(block), child))
            }

            YamlParser::Array { mut block, compact } => {
                if !block.check_indent(ctx)? {
                    return Ok(Step::Pop);
                }
                if kind != ArrayItemMarker {
                    if compact {
                        return Ok(Step::Pop);
                    }
                    return Err(ctx.unexpected("expected `- `"));
                }
                let virtual_indent = if block.count == 0 {
                    block.virtual_indent + 1
                } else {
                    1
                };
                let empty_item = matches!(ctx.lookahead_kind(), Some(EndOfLine) | None);
                ctx.consume_token();
                block.count += 1;

                let sink = Sink::Item(block.id);
                let array = YamlParser::Array { block, compact };
                if empty_item {
                    ctx.publish(sink, Value::Null);
                    return Ok(Step::Keep(array));
                }
                Ok(Step::Push(
                    array,
                    YamlParser::Any {
                        sink,
                        virtual_indent,
                    },
                ))
            }

            YamlParser::Value { sink } => {
                if !matches!(ctx.lookahead_kind(), Some(EndOfLine) | None) {
                    return Err(ctx.unexpected_lookahead("expected end of line after value"));
                }
                let value = match kind {
                    QuotedWord => Value::String(unescape(&ctx.consume_text())),
                    BareWord => classify(&ctx.consume_text(), "yes", "no"),
                    _ => return Err(ctx.unexpected("expected a scalar")),
                };
                ctx.publish(sink, value);
                Ok(Step::Pop)
            }

            YamlParser::EmptyProperty { sink, expected } => {
                let level = ctx.indent_level();
                if level == expected {
                    Ok(Step::Replace(YamlParser::Any {
                        sink,
                        virtual_indent: 0,
                    }))
                } else if level + 1 == expected && kind == ArrayItemMarker {
                    let id = ctx.open_array(sink)?;
                    Ok(Step::Replace(YamlParser::Array {
                        block: Block::new(id, 0),
                        compact: true,
                    }))
                } else if level < expected {
                    ctx.publish(sink, Value::Null);
                    Ok(Step::Pop)
                } else {
                    Err(ctx.bad_indent(expected, level))
                }
            }
        }
    }

    fn end(self, ctx: &mut ParseContext<'_, Self>) -> Result<()> {
        if let YamlParser::EmptyProperty { sink, .. } = self {
            ctx.publish(sink, Value::Null);
        }
        Ok(())
    }
}
