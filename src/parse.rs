//! The parse automaton shared by every format.
//!
//! A [`ParseContext`] owns the token stream (one token of lookahead), the
//! stack of grammar parsers and the tree under construction. Grammar parsers
//! are plain enums implementing [`Grammar`]; the driver pops the active
//! parser, runs one [`Grammar::step`] and applies the returned [`Step`].
//!
//! Nodes reach their parent through a [`Sink`] chosen by the parent when it
//! creates the child parser. Containers are published as soon as they are
//! opened, so children can attach to them while they are still on the stack;
//! the finished tree is assembled once the stream is exhausted.

use crate::tokenizer::Token;
use crate::{Error, Result, Value};
use std::fmt;
use tracing::trace;

/// Ambient effect of a structural token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    NewLine,
    Indent(usize),
}

pub(crate) trait TokenKind: Copy + Eq + fmt::Debug {
    /// Returns the ambient effect of `token`, if its kind is structural.
    fn control(token: &Token<Self>) -> Option<Control>;
}

/// One state machine of a format's grammar.
pub(crate) trait Grammar: Sized + fmt::Debug {
    type Kind: TokenKind;

    /// Handles the current token, which is present and not structural.
    fn step(self, ctx: &mut ParseContext<'_, Self>) -> Result<Step<Self>>;

    /// Finalizes the parser when the stream ends with it still on the stack.
    fn end(self, ctx: &mut ParseContext<'_, Self>) -> Result<()>;
}

/// Stack transition returned by a step.
#[derive(Debug)]
pub(crate) enum Step<P> {
    /// Stay active with the updated state
    Keep(P),
    /// Done; the parent becomes active again
    Pop,
    /// Become a more specific parser
    Replace(P),
    /// Stay on the stack below a new child parser
    Push(P, P),
}

pub(crate) type NodeId = usize;

/// Where a finished node is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Sink {
    Root,
    Item(NodeId),
    Entry(NodeId, String),
}

#[derive(Debug)]
enum Slot {
    Scalar(Value),
    Array(Vec<NodeId>),
    Object(Vec<(String, NodeId)>),
}

/// Deepest container nesting a document may have.
pub(crate) const MAX_DEPTH: usize = 128;

/// Arena holding published nodes until the parse completes.
#[derive(Debug, Default)]
struct TreeBuilder {
    slots: Vec<Slot>,
    depths: Vec<usize>,
    root: Option<NodeId>,
}

impl TreeBuilder {
    /// Nesting depth a node published into `sink` would have. The root is 1.
    fn depth_of(&self, sink: &Sink) -> usize {
        match sink {
            Sink::Root => 1,
            Sink::Item(parent) | Sink::Entry(parent, _) => {
                self.depths.get(*parent).map_or(1, |depth| depth + 1)
            }
        }
    }

    fn add(&mut self, sink: Sink, slot: Slot) -> NodeId {
        let id = self.slots.len();
        self.depths.push(self.depth_of(&sink));
        self.slots.push(slot);
        match sink {
            Sink::Root => self.root = Some(id),
            Sink::Item(parent) => {
                if let Some(Slot::Array(items)) = self.slots.get_mut(parent) {
                    items.push(id);
                }
            }
            Sink::Entry(parent, key) => {
                if let Some(Slot::Object(entries)) = self.slots.get_mut(parent) {
                    entries.push((key, id));
                }
            }
        }
        id
    }

    /// Assembles the tree. Children always have larger ids than their
    /// parent, so a single reverse pass finishes every child first.
    fn build(self) -> Value {
        let mut finished: Vec<Value> = Vec::with_capacity(self.slots.len());
        finished.resize_with(self.slots.len(), Value::default);

        for (id, slot) in self.slots.into_iter().enumerate().rev() {
            let value = match slot {
                Slot::Scalar(value) => value,
                Slot::Array(items) => Value::Array(
                    items
                        .into_iter()
                        .map(|child| std::mem::take(&mut finished[child]))
                        .collect(),
                ),
                Slot::Object(entries) => Value::Object(
                    entries
                        .into_iter()
                        .map(|(key, child)| (key, std::mem::take(&mut finished[child])))
                        .collect(),
                ),
            };
            finished[id] = value;
        }

        match self.root {
            Some(root) => std::mem::take(&mut finished[root]),
            None => Value::Null,
        }
    }
}

/// Mutable state of one parse.
pub(crate) struct ParseContext<'a, P: Grammar> {
    tokens: Box<dyn Iterator<Item = Token<P::Kind>> + 'a>,
    current: Option<Token<P::Kind>>,
    lookahead: Option<Token<P::Kind>>,
    stack: Vec<P>,
    indent_level: usize,
    last_line: usize,
    builder: TreeBuilder,
}

impl<'a, P: Grammar> ParseContext<'a, P> {
    pub(crate) fn new(tokens: impl Iterator<Item = Token<P::Kind>> + 'a, root: P) -> Self {
        let mut ctx = ParseContext {
            tokens: Box::new(tokens),
            current: None,
            lookahead: None,
            stack: vec![root],
            indent_level: 0,
            last_line: 1,
            builder: TreeBuilder::default(),
        };
        ctx.consume_token();
        ctx.consume_token();
        ctx
    }

    pub(crate) fn current_kind(&self) -> Option<P::Kind> {
        self.current.as_ref().map(|t| t.kind)
    }

    pub(crate) fn lookahead_kind(&self) -> Option<P::Kind> {
        self.lookahead.as_ref().map(|t| t.kind)
    }

    pub(crate) fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Shifts the lookahead into the current slot and returns the token that
    /// was current.
    pub(crate) fn consume_token(&mut self) -> Option<Token<P::Kind>> {
        let next = self.tokens.next();
        let previous = std::mem::replace(&mut self.current, self.lookahead.take());
        self.lookahead = next;
        if let Some(token) = &previous {
            self.last_line = token.line;
        }
        previous
    }

    /// Consumes the current token and returns its text.
    pub(crate) fn consume_text(&mut self) -> String {
        self.consume_token().map(|t| t.text).unwrap_or_default()
    }

    pub(crate) fn indent(&mut self, level: usize) {
        self.indent_level = level;
    }

    pub(crate) fn new_line(&mut self) {
        self.indent_level = 0;
    }

    pub(crate) fn push_parser(&mut self, parser: P) {
        self.stack.push(parser);
    }

    pub(crate) fn pop_parser(&mut self) -> Option<P> {
        self.stack.pop()
    }

    fn apply(&mut self, step: Step<P>) {
        match step {
            Step::Keep(parser) | Step::Replace(parser) => self.push_parser(parser),
            Step::Pop => {}
            Step::Push(parser, child) => {
                self.push_parser(parser);
                self.push_parser(child);
            }
        }
    }

    /// Publishes a new, empty array and returns its id.
    pub(crate) fn open_array(&mut self, sink: Sink) -> Result<NodeId> {
        self.open(sink, Slot::Array(Vec::new()))
    }

    /// Publishes a new, empty object and returns its id.
    pub(crate) fn open_object(&mut self, sink: Sink) -> Result<NodeId> {
        self.open(sink, Slot::Object(Vec::new()))
    }

    /// Containers nest at most [`MAX_DEPTH`] deep.
    fn open(&mut self, sink: Sink, slot: Slot) -> Result<NodeId> {
        if self.builder.depth_of(&sink) > MAX_DEPTH {
            return Err(self.unexpected(&format!(
                "containers nest deeper than {MAX_DEPTH} levels"
            )));
        }
        Ok(self.builder.add(sink, slot))
    }

    pub(crate) fn publish(&mut self, sink: Sink, value: Value) {
        self.builder.add(sink, Slot::Scalar(value));
    }

    /// Error for the current token.
    pub(crate) fn unexpected(&self, msg: &str) -> Error {
        self.unexpected_token(self.current.as_ref(), msg)
    }

    /// Error for the lookahead token.
    pub(crate) fn unexpected_lookahead(&self, msg: &str) -> Error {
        self.unexpected_token(self.lookahead.as_ref(), msg)
    }

    fn unexpected_token(&self, token: Option<&Token<P::Kind>>, msg: &str) -> Error {
        match token {
            Some(token) => Error::malformed(
                &format!("{:?}", token.kind),
                &token.text,
                token.line,
                token.column(),
                msg,
            ),
            None => Error::unexpected_eof(self.last_line, msg),
        }
    }

    /// Indentation error located at the current token.
    pub(crate) fn bad_indent(&self, expected: usize, found: usize) -> Error {
        let (line, column) = self
            .current
            .as_ref()
            .map_or((self.last_line, 1), |t| (t.line, t.column()));
        Error::indentation(line, column, expected, found)
    }

    pub(crate) fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.last_line, expected)
    }

    /// Runs the automaton to completion and returns the assembled tree.
    pub(crate) fn run(mut self) -> Result<Value> {
        while let Some(token) = &self.current {
            let (kind, line) = (token.kind, token.line);
            match P::Kind::control(token) {
                Some(Control::NewLine) => {
                    self.new_line();
                    self.consume_token();
                    continue;
                }
                Some(Control::Indent(level)) => {
                    self.indent(level);
                    self.consume_token();
                    continue;
                }
                None => {}
            }

            let Some(parser) = self.pop_parser() else {
                return Err(self.unexpected("expected end of document"));
            };
            trace!(
                token = ?kind,
                line,
                depth = self.stack.len(),
                parser = ?parser,
                "step"
            );
            let step = parser.step(&mut self)?;
            self.apply(step);
        }

        while let Some(parser) = self.pop_parser() {
            parser.end(&mut self)?;
        }
        Ok(self.builder.build())
    }
}
