//! Regex-driven, priority-resolving line tokenizer.
//!
//! A [`Tokenizer`] is a list of [`Definition`]s, each pairing a token kind with
//! a pattern and a priority. Every line is tokenized on its own:
//!
//! 1. Every pattern collects its own non-overlapping matches over the line
//! 2. Candidates are grouped by start offset and visited left to right
//! 3. Inside a group the lowest priority wins (ties go to the earlier definition)
//! 4. A winner starting before the end of the previously accepted token drops
//!    its whole group; there is no fallback to the runner-up
//!
//! Characters no accepted token covers are skipped silently. Both grammars rely
//! on this to ignore insignificant whitespace.
//!
//! ## Examples
//!
//! ```rust
//! use regex::Regex;
//! use tiny_doc::tokenizer::{Definition, Tokenizer};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Kind { Word, Number, Eol }
//!
//! let tokenizer = Tokenizer::new(
//!     vec![
//!         Definition::new(Kind::Word, Regex::new(r"\w+").unwrap(), 2),
//!         Definition::new(Kind::Number, Regex::new(r"[0-9]+").unwrap(), 1),
//!     ],
//!     Some(Kind::Eol),
//! );
//!
//! let kinds: Vec<_> = tokenizer.tokenize("abc 42").map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![Kind::Word, Kind::Number, Kind::Eol]);
//! ```

use regex::Regex;

/// A lexical unit with its source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub text: String,
    /// 1-based line number
    pub line: usize,
    /// 0-based character offset within the line
    pub offset: usize,
}

impl<K> Token<K> {
    /// 1-based column of the token's first character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.offset + 1
    }
}

/// One token pattern.
#[derive(Clone, Debug)]
pub struct Definition<K> {
    kind: K,
    regex: Regex,
    priority: u32,
    capture_group: usize,
}

impl<K> Definition<K> {
    /// Creates a definition whose token text is capture group 1 when the
    /// pattern has one, and the whole match otherwise.
    pub fn new(kind: K, regex: Regex, priority: u32) -> Self {
        Definition {
            kind,
            regex,
            priority,
            capture_group: 1,
        }
    }

    /// Selects the capture group that provides the token text (0 = whole match).
    #[must_use]
    pub fn with_capture_group(mut self, capture_group: usize) -> Self {
        self.capture_group = capture_group;
        self
    }
}

struct Candidate<'t> {
    start: usize,
    end: usize,
    priority: u32,
    order: usize,
    text: &'t str,
}

/// Splits text into tokens, one line at a time.
#[derive(Clone, Debug)]
pub struct Tokenizer<K> {
    definitions: Vec<Definition<K>>,
    end_of_line: Option<K>,
}

impl<K: Copy> Tokenizer<K> {
    /// Creates a tokenizer. `end_of_line`, when set, is the kind of the empty
    /// token emitted after every line.
    pub fn new(definitions: Vec<Definition<K>>, end_of_line: Option<K>) -> Self {
        Tokenizer {
            definitions,
            end_of_line,
        }
    }

    /// Lazily tokenizes `text` line by line.
    ///
    /// Lines are split with [`str::lines`], so both `\n` and `\r\n` work.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token<K>> + 'a {
        text.lines()
            .enumerate()
            .flat_map(move |(index, line)| self.tokenize_line(line, index + 1))
    }

    /// Tokenizes a single line that contains no line break.
    pub fn tokenize_line(&self, line: &str, line_number: usize) -> Vec<Token<K>> {
        let mut candidates = Vec::new();
        for (order, definition) in self.definitions.iter().enumerate() {
            for caps in definition.regex.captures_iter(line) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let text = if definition.capture_group < caps.len() {
                    caps.get(definition.capture_group)
                        .map_or("", |m| m.as_str())
                } else {
                    whole.as_str()
                };
                candidates.push(Candidate {
                    start: whole.start(),
                    end: whole.end(),
                    priority: definition.priority,
                    order,
                    text,
                });
            }
        }
        candidates.sort_by_key(|c| (c.start, c.priority, c.order));

        let mut tokens = Vec::new();
        let mut group_start = None;
        let mut accepted_end = None;
        // Candidates arrive in ascending start order.
        let (mut scanned, mut chars) = (0, 0);
        for candidate in &candidates {
            // Only the first candidate of a group is its winner.
            if group_start == Some(candidate.start) {
                continue;
            }
            group_start = Some(candidate.start);

            if accepted_end.map_or(false, |end| candidate.start < end) {
                continue;
            }
            chars += line[scanned..candidate.start].chars().count();
            scanned = candidate.start;
            tokens.push(Token {
                kind: self.definitions[candidate.order].kind,
                text: candidate.text.to_string(),
                line: line_number,
                offset: chars,
            });
            accepted_end = Some(candidate.end);
        }

        if let Some(kind) = self.end_of_line {
            tokens.push(Token {
                kind,
                text: String::new(),
                line: line_number,
                offset: chars + line[scanned..].chars().count(),
            });
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Kind {
        Key,
        Word,
        Quoted,
        Eol,
    }

    fn def(kind: Kind, pattern: &str, priority: u32) -> Definition<Kind> {
        Definition::new(kind, Regex::new(pattern).unwrap(), priority)
    }

    fn kinds(tokens: &[Token<Kind>]) -> Vec<Kind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lower_priority_wins_regardless_of_order() {
        let forward = Tokenizer::new(
            vec![def(Kind::Key, r"(\w+):", 1), def(Kind::Word, r"\w+", 2)],
            None,
        );
        let reversed = Tokenizer::new(
            vec![def(Kind::Word, r"\w+", 2), def(Kind::Key, r"(\w+):", 1)],
            None,
        );
        for tokenizer in [&forward, &reversed] {
            let tokens = tokenizer.tokenize_line("name: x", 1);
            assert_eq!(kinds(&tokens), vec![Kind::Key, Kind::Word]);
            assert_eq!(tokens[0].text, "name");
            assert_eq!(tokens[1].text, "x");
        }
    }

    #[test]
    fn test_priority_ties_go_to_first_definition() {
        let tokenizer = Tokenizer::new(
            vec![def(Kind::Word, r"\w+", 1), def(Kind::Key, r"\w+", 1)],
            None,
        );
        let tokens = tokenizer.tokenize_line("abc", 1);
        assert_eq!(kinds(&tokens), vec![Kind::Word]);
    }

    #[test]
    fn test_overlapping_group_dropped_without_fallback() {
        // `"a b"` is accepted first; the word `b` starts inside it and is
        // dropped even though its priority is lower.
        let tokenizer = Tokenizer::new(
            vec![def(Kind::Quoted, r#""([^"]*)""#, 5), def(Kind::Word, r"\w+", 1)],
            None,
        );
        let tokens = tokenizer.tokenize_line(r#""a b" c"#, 1);
        assert_eq!(kinds(&tokens), vec![Kind::Quoted, Kind::Word]);
        assert_eq!(tokens[0].text, "a b");
        assert_eq!(tokens[1].text, "c");
        assert_eq!(tokens[1].offset, 6);
    }

    #[test]
    fn test_unmatched_characters_skipped() {
        let tokenizer = Tokenizer::new(vec![def(Kind::Word, r"[a-z]+", 1)], None);
        let tokens = tokenizer.tokenize_line("  ab ?? cd!", 1);
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "cd"]);
    }

    #[test]
    fn test_capture_group_selection() {
        let whole = Tokenizer::new(
            vec![def(Kind::Key, r"(\w+):", 1).with_capture_group(0)],
            None,
        );
        assert_eq!(whole.tokenize_line("k:", 1)[0].text, "k:");

        let missing_group = Tokenizer::new(vec![def(Kind::Word, r"\w+", 1)], None);
        assert_eq!(missing_group.tokenize_line("k", 1)[0].text, "k");
    }

    #[test]
    fn test_lines_and_end_of_line_markers() {
        let tokenizer = Tokenizer::new(vec![def(Kind::Word, r"\w+", 1)], Some(Kind::Eol));
        let tokens: Vec<_> = tokenizer.tokenize("a\r\n\nb c").collect();
        assert_eq!(
            kinds(&tokens),
            vec![Kind::Word, Kind::Eol, Kind::Eol, Kind::Word, Kind::Word, Kind::Eol]
        );
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 3, 3, 3]);
    }

    #[test]
    fn test_offsets_count_characters() {
        let tokenizer = Tokenizer::new(vec![def(Kind::Word, r"[a-z]+", 1)], None);
        let tokens = tokenizer.tokenize_line("ü x", 1);
        assert_eq!(tokens[0].offset, 2);
        assert_eq!(tokens[0].column(), 3);
    }

    #[test]
    fn test_offsets_on_a_long_line() {
        let tokenizer = Tokenizer::new(
            vec![def(Kind::Quoted, r#""([^"]*)""#, 1), def(Kind::Word, r"[a-z]+", 2)],
            Some(Kind::Eol),
        );
        let line = "é\"ab cd\" x ".repeat(20_000);
        let tokens = tokenizer.tokenize_line(&line, 1);
        assert_eq!(tokens.len(), 40_001);
        // Each repetition is 11 characters: é, the quoted "ab cd", a space, x, a space.
        assert_eq!(tokens[2].offset, 12);
        assert_eq!(tokens[39_999].offset, 19_999 * 11 + 9);
        assert_eq!(tokens[40_000].kind, Kind::Eol);
        assert_eq!(tokens[40_000].offset, 220_000);
    }
}
