use tiny_doc::{
    doc, from_json_str, from_yaml_str, to_yaml_string, to_yaml_string_with_options, Error, Format,
    Json, Key, KeyQuoting, LineEnding, Map, Number, Value, ValueKind, WriteOptions, Yaml,
};

const SERVICE_YAML: &str = "\
service:
  name: billing
  enabled: yes
  port: 8443
  ratio: 0.75
  owners:
    - name: ana
      teams:
        - core
        - infra
    - name: bo
  limits:
  - 10
  - 20
  notes:
version: \"2\"
";

#[test]
fn test_read_service_document() {
    let doc = from_yaml_str(SERVICE_YAML).unwrap();
    let expected = doc!({
        "service": {
            "name": "billing",
            "enabled": true,
            "port": 8443,
            "ratio": 0.75,
            "owners": [
                { "name": "ana", "teams": ["core", "infra"] },
                { "name": "bo" }
            ],
            "limits": [10, 20],
            "notes": null
        },
        "version": "2"
    });
    assert_eq!(doc, expected);
}

#[test]
fn test_typed_access() {
    let doc = from_yaml_str(SERVICE_YAML).unwrap();
    let service = doc.child("service").unwrap();

    assert_eq!(service.value_at::<String>("name").unwrap(), "billing");
    assert!(service.value_at::<bool>("enabled").unwrap());
    assert_eq!(service.value_at::<u16>("port").unwrap(), 8443);
    assert_eq!(service.value_at::<f32>("ratio").unwrap(), 0.75);
    assert_eq!(service.values_at::<u8>("limits").unwrap(), vec![10, 20]);
    assert_eq!(service.value_at::<Option<String>>("notes").unwrap(), None);
    assert_eq!(service.values_at::<String>("notes").unwrap(), Vec::<String>::new());
    assert_eq!(doc.value_at::<i32>("version").unwrap(), 2);

    let team: String = doc
        .value_path(&[
            Key::from("service"),
            Key::from("owners"),
            Key::Index(0),
            Key::from("teams"),
            Key::Index(1),
        ])
        .unwrap();
    assert_eq!(team, "infra");
}

#[test]
fn test_missing_key_reads_as_null() {
    let doc = from_yaml_str("a: 1\n").unwrap();
    assert_eq!(doc.child("missing").unwrap(), &Value::Null);
    assert_eq!(doc.value_at::<Option<i32>>("missing").unwrap(), None);
    assert!(matches!(
        doc.value_at::<i32>("missing"),
        Err(Error::TypeCoercion { .. })
    ));
}

#[test]
fn test_wrong_key_kind_and_bounds() {
    let doc = from_json_str(r#"{"list": [1, 2]}"#).unwrap();
    assert!(matches!(
        doc.child(Key::Index(0)),
        Err(Error::KeyType { kind: ValueKind::Object, .. })
    ));
    let list = doc.child("list").unwrap();
    assert!(matches!(
        list.child("x"),
        Err(Error::KeyType { kind: ValueKind::Array, .. })
    ));
    assert_eq!(
        list.child(Key::Index(5)).unwrap_err(),
        Error::IndexOutOfBounds { index: 5, len: 2 }
    );
}

#[test]
fn test_round_trip_preserves_documents() {
    let doc = from_yaml_str(SERVICE_YAML).unwrap();
    let written = to_yaml_string(&doc).unwrap();
    assert_eq!(from_yaml_str(&written).unwrap(), doc);
    assert_eq!(to_yaml_string(&from_yaml_str(&written).unwrap()).unwrap(), written);
}

#[test]
fn test_written_layout() {
    let value = doc!({ "k": [{ "a": 1, "b": 2 }, { "c": 3 }] });
    assert_eq!(
        to_yaml_string(&value).unwrap(),
        "k:\n  - a: 1\n    b: 2\n  - c: 3\n"
    );
}

#[test]
fn test_compact_and_indented_sequences_agree() {
    let compact = from_yaml_str("list:\n- a: 1\n  b: 2\n- c: 3\n").unwrap();
    let indented = from_yaml_str("list:\n  - a: 1\n    b: 2\n  - c: 3\n").unwrap();
    assert_eq!(compact, indented);
    assert_eq!(compact, doc!({ "list": [{ "a": 1, "b": 2 }, { "c": 3 }] }));
}

#[test]
fn test_empty_containers_read_back_as_null() {
    let value = doc!({ "list": [], "map": {}, "items": [[], {}] });
    let text = to_yaml_string(&value).unwrap();
    assert_eq!(text, "list:\nmap:\nitems:\n  -\n  -\n");

    let back = from_yaml_str(&text).unwrap();
    assert_eq!(back, doc!({ "list": null, "map": null, "items": [null, null] }));
    assert_eq!(back.values_at::<i32>("list").unwrap(), Vec::<i32>::new());
    assert_eq!(back.value_at::<Map>("map").unwrap(), Map::new());
}

#[test]
fn test_write_options() {
    let value = doc!({ "a": { "b": [true] } });
    let options = WriteOptions::new()
        .with_line_ending(LineEnding::CrLf)
        .with_key_quoting(KeyQuoting::Always);
    let text = to_yaml_string_with_options(&value, &options).unwrap();
    assert_eq!(text, "\"a\":\r\n  \"b\":\r\n    - Yes\r\n");
    assert_eq!(from_yaml_str(&text).unwrap(), value);
}

#[test]
fn test_non_finite_floats_cannot_be_written() {
    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            to_yaml_string(&doc!([1, (f)])),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}

#[test]
fn test_json_and_yaml_agree() {
    let json = from_json_str(
        r#"
        {
            "service": {
                "name": "billing",
                "ports": [80, 443],
                "weight": 1.5,
                "meta": {"tier": "gold"}
            }
        }
        "#,
    )
    .unwrap();
    let yaml = from_yaml_str(
        "service:\n  name: billing\n  ports:\n    - 80\n    - 443\n  weight: 1.5\n  meta:\n    tier: gold\n",
    )
    .unwrap();
    assert_eq!(json, yaml);
}

#[test]
fn test_json_integer_overflow_reads_as_float() {
    let value = from_json_str("[9223372036854775807, 9223372036854775808]").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Number(Number::Integer(i64::MAX)),
            Value::Number(Number::Float(9_223_372_036_854_775_808.0)),
        ])
    );
}

#[test]
fn test_boolean_words_differ_by_format() {
    assert_eq!(from_json_str("[true, yes]").unwrap(), doc!([true, "yes"]));
    assert_eq!(from_yaml_str("- true\n- YES\n").unwrap(), doc!(["true", true]));
}

#[test]
fn test_crlf_input() {
    let value = from_yaml_str("a:\r\n  b: 1\r\nc: \"x\"\r\n").unwrap();
    assert_eq!(value, doc!({ "a": { "b": 1 }, "c": "x" }));
}

#[test]
fn test_unknown_characters_are_skipped() {
    // A lone `:` and a single leading space match no YAML token.
    assert_eq!(from_yaml_str("a: x\n:\n b: y\n").unwrap(), doc!({ "a": "x", "b": "y" }));
}

#[test]
fn test_error_positions() {
    let err = from_yaml_str("a:\n  b: 1\n  c: 2 3\n").unwrap_err();
    match err {
        Error::Malformed { line, column, text, .. } => {
            assert_eq!((line, column, text.as_str()), (3, 8, "3"));
        }
        other => panic!("expected Malformed, got {other:?}"),
    }

    let err = from_json_str("{\n  \"a\": [1,\n").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { line: 2, .. }), "{err}");
}

#[test]
fn test_format_trait_objects() {
    let yaml = Yaml::new();
    let formats = [
        (&Json as &dyn Format, r#"{"x": [1, 2]}"#),
        (&yaml as &dyn Format, "x:\n  - 1\n  - 2\n"),
    ];
    for (format, text) in formats {
        let value = format.read(text).unwrap();
        assert_eq!(value, doc!({ "x": [1, 2] }), "{}", format.name());
    }
    assert!(Json.write(&Value::Null).is_err());
}

#[test]
fn test_merge_documents() {
    let mut base = from_yaml_str("a: 1\nlist:\n  - x\n").unwrap();
    let overlay = from_json_str(r#"{"b": 2, "list": ["y"]}"#).unwrap();
    base.merge(overlay).unwrap();
    assert_eq!(base, doc!({ "a": 1, "list": ["x", "y"], "b": 2 }));

    let mut scalar = doc!(1);
    assert!(matches!(scalar.merge(doc!([1])), Err(Error::Merge { .. })));
}

#[test]
fn test_large_single_line_json() {
    let items: Vec<String> = (0..50_000).map(|i| format!("\"k{i}\"")).collect();
    let text = format!("{{\"items\": [{}], \"end\": x}}", items.join(","));
    let value = from_json_str(&text).unwrap();
    let keys = value.values_at::<String>("items").unwrap();
    assert_eq!(keys.len(), 50_000);
    assert_eq!(keys[49_999], "k49999");

    let err = from_json_str(&text.replace("x}", "x y}")).unwrap_err();
    match err {
        Error::Malformed { line, column, .. } => {
            assert_eq!((line, column), (1, text.chars().count() + 1));
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn test_nesting_depth_limit() {
    let nested = |depth: usize| "[".repeat(depth) + &"]".repeat(depth);

    let mut value = from_json_str(&nested(128)).unwrap();
    let mut depth = 0;
    while let Value::Array(mut items) = value {
        depth += 1;
        value = items.pop().unwrap_or_default();
    }
    assert_eq!(depth, 128);

    for depth in [129, 200_000] {
        let err = from_json_str(&nested(depth)).unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 1, column: 129, .. }), "{err}");
    }

    assert!(from_yaml_str(&("- ".repeat(128) + "x\n")).is_ok());
    assert!(matches!(
        from_yaml_str(&("- ".repeat(129) + "x\n")),
        Err(Error::Malformed { column: 257, .. })
    ));
}
