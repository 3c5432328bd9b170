//! Scalar classification and string escaping shared by both formats.

use crate::{Number, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?[0-9]*\.[0-9]+$").expect("float pattern is valid"));
static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("integer pattern is valid"));

/// Classifies an unquoted word.
///
/// Order: float, integer (falling back to float past the `i64` range), then
/// the case-insensitive `truthy` / `falsy` literals, and finally string.
pub(crate) fn classify(word: &str, truthy: &str, falsy: &str) -> Value {
    if FLOAT.is_match(word) {
        if let Ok(f) = word.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
    }
    if INTEGER.is_match(word) {
        return match word.parse::<i64>() {
            Ok(n) => Value::Number(Number::Integer(n)),
            Err(_) => word
                .parse::<f64>()
                .map_or_else(|_| Value::String(word.to_string()), Value::from),
        };
    }
    if word.eq_ignore_ascii_case(truthy) {
        return Value::Bool(true);
    }
    if word.eq_ignore_ascii_case(falsy) {
        return Value::Bool(false);
    }
    Value::String(word.to_string())
}

/// Resolves backslash escapes in the body of a quoted token.
///
/// Unknown escapes, `\u` included, are kept verbatim.
pub(crate) fn unescape(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('/') => result.push('/'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('0') => result.push('\0'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Appends `s` to `out` as a double-quoted string.
pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
