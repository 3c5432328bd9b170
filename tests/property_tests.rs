//! Property-based tests for the core guarantees:
//!
//! - anything the YAML writer emits reads back to the same tree
//! - writing is idempotent across a read
//! - JSON reads agree with `serde_json` on the documents it produces
//! - tokenizer output depends on priorities, not on declaration order

use proptest::prelude::*;
use regex::Regex;
use tiny_doc::tokenizer::{Definition, Tokenizer};
use tiny_doc::{from_json_str, from_yaml_str, to_yaml_string, Map, Value};

fn text() -> impl Strategy<Value = String> {
    "[ -~\u{e9}\u{3b1}\u{1F600}\t\n\r]{0,12}"
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,6}",
        "[ -~\u{e9}\t]{0,8}",
    ]
}

/// Scalars that survive a YAML round trip unchanged.
fn yaml_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        text().prop_map(Value::from),
    ]
}

/// Trees without empty containers, which are written as null.
fn yaml_tree() -> impl Strategy<Value = Value> {
    yaml_leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..5).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 1..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map>())),
        ]
    })
}

/// Trees whose `serde_json` rendering stays within the JSON reader's subset.
fn json_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1_000_000i64..1_000_000).prop_map(|n| Value::from(n as f64 / 100.0)),
        "[ -~\u{e9}\n\t]{0,10}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z_ ]{0,6}", inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map>())),
        ]
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Key,
    Number,
    Word,
    Dash,
}

fn definitions() -> Vec<Definition<Kind>> {
    vec![
        Definition::new(Kind::Key, Regex::new(r"([a-z]+):").unwrap(), 1),
        Definition::new(Kind::Number, Regex::new(r"[0-9]+").unwrap(), 2),
        Definition::new(Kind::Word, Regex::new(r"[a-z0-9]+").unwrap(), 3),
        Definition::new(Kind::Dash, Regex::new(r"-").unwrap(), 4),
    ]
}

proptest! {
    #[test]
    fn prop_yaml_round_trip(value in yaml_tree()) {
        let text = to_yaml_string(&value).unwrap();
        let back = from_yaml_str(&text);
        prop_assert_eq!(back.as_ref(), Ok(&value), "written as:\n{}", text);
    }

    #[test]
    fn prop_yaml_write_idempotent(value in yaml_tree()) {
        let first = to_yaml_string(&value).unwrap();
        let second = to_yaml_string(&from_yaml_str(&first).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_json_matches_serde_json(value in json_tree(), pretty in any::<bool>()) {
        let text = if pretty {
            serde_json::to_string_pretty(&value).unwrap()
        } else {
            serde_json::to_string(&value).unwrap()
        };
        let expected: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(from_json_str(&text).unwrap(), expected, "input:\n{}", text);
    }

    #[test]
    fn prop_tokenizer_ignores_declaration_order(
        line in "[a-z0-9: -]{0,24}",
        rotation in 0usize..4,
    ) {
        let forward = Tokenizer::new(definitions(), None);
        let mut rotated_defs = definitions();
        rotated_defs.rotate_left(rotation);
        let rotated = Tokenizer::new(rotated_defs, None);

        prop_assert_eq!(forward.tokenize_line(&line, 1), rotated.tokenize_line(&line, 1));
    }

    #[test]
    fn prop_tokens_never_overlap(line in "[a-z0-9: -]{0,24}") {
        let tokenizer = Tokenizer::new(definitions(), None);
        let tokens = tokenizer.tokenize_line(&line, 1);
        for pair in tokens.windows(2) {
            // Whole-match length is at least the captured text's length.
            prop_assert!(pair[0].offset + pair[0].text.len() <= pair[1].offset);
        }
    }
}
