//! Tests pinned to the wire format itself: exact schema and record text,
//! path addressing, escaping, optionality, and strict-mode validation.

use ploon::{
    minify, parse, parse_compact, parse_lenient, ploon, prettify, stringify, stringify_compact,
    Config, Decoder, Encoder, Error, FieldKind, SchemaField, SchemaNode, Value,
};

#[test]
fn test_schema_header_forms() {
    let cases = [
        (ploon!({"users": [{"id": 1}]}), "[users#1](id)"),
        (ploon!({"a": 1, "b": 2}), "[root](a,b)"),
        (
            ploon!({"orders": [{"id": 1, "customer": {"name": "A"}, "tags": ["x"]}]}),
            "[orders#1](id,customer{name},tags#)",
        ),
        (
            ploon!({"orders": [{"id": 1, "lines": [{"sku": "S", "qty": 1}]}]}),
            "[orders#1](id,lines#(sku,qty))",
        ),
    ];

    let config = Config::standard();
    for (value, expected) in cases {
        let schema = SchemaNode::infer(&value, &config).unwrap();
        assert_eq!(schema.render(&config), expected);
    }
}

#[test]
fn test_array_records_are_one_based() {
    let value = ploon!({"items": [{"id": 10}, {"id": 20}, {"id": 30}]});
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[items#3](id)\n\n1:1|10\n1:2|20\n1:3|30");
}

#[test]
fn test_nested_array_indices_restart() {
    // Each array numbers its own items from 1 at its own depth.
    let value = ploon!({
        "orders": [
            {"id": 1, "lines": [{"sku": "A"}, {"sku": "B"}]}
        ]
    });
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[orders#1](id,lines#(sku))\n\n1:1|1\n2:1|A\n2:2|B");
}

#[test]
fn test_nested_object_tag_uses_space() {
    let value = ploon!({"users": [{"id": 1, "address": {"city": "Porto"}}]});
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[users#1](id,address{city})\n\n1:1|1\n2 |Porto");
}

#[test]
fn test_everything_decodes_as_strings() {
    let value = ploon!({"items": [{"n": 42, "f": 1.5, "b": true, "z": null}]});
    let text = stringify(&value).unwrap();
    let back = parse(&text).unwrap();
    let item = &back.as_object().unwrap().get("items").unwrap().as_array().unwrap()[0];
    let item = item.as_object().unwrap();
    assert_eq!(item.get("n").unwrap(), &Value::String("42".to_string()));
    assert_eq!(item.get("f").unwrap(), &Value::String("1.5".to_string()));
    assert_eq!(item.get("b").unwrap(), &Value::String("true".to_string()));
    assert_eq!(item.get("z").unwrap(), &Value::String(String::new()));
}

#[test]
fn test_escaping_structural_characters() {
    let value = ploon!({"items": [{"text": "a|b"}]});
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[items#1](text)\n\n1:1|a\\|b");

    let back = parse(&text).unwrap();
    let item = &back.as_object().unwrap().get("items").unwrap().as_array().unwrap()[0];
    assert_eq!(
        item.as_object().unwrap().get("text").unwrap().as_str(),
        Some("a|b")
    );
}

#[test]
fn test_unknown_escape_pairs_pass_through() {
    let back = parse("[items#1](text)\n\n1:1|a\\qb").unwrap();
    let item = &back.as_object().unwrap().get("items").unwrap().as_array().unwrap()[0];
    assert_eq!(
        item.as_object().unwrap().get("text").unwrap().as_str(),
        Some("a\\qb")
    );
}

#[test]
fn test_optional_field_emits_empty_slot() {
    let value = ploon!({
        "items": [
            {"id": 1, "note": "x"},
            {"id": 2}
        ]
    });
    let text = stringify(&value).unwrap();
    // Both records carry two slots even though item 2 lacks `note`.
    assert_eq!(text, "[items#2](id,note)\n\n1:1|1|x\n1:2|2|");
}

#[test]
fn test_primitive_array_fields_emit_no_records() {
    // Arrays of bare primitives declare themselves in the schema but carry
    // no data: only object items produce records.
    let value = ploon!({
        "orders": [
            {"id": 101, "customer": {"name": "Alice"}, "tags": ["a", "b"]}
        ]
    });
    assert_eq!(
        stringify(&value).unwrap(),
        "[orders#1](id,customer{name},tags#)\n\n1:1|101\n2 |Alice"
    );
}

#[test]
fn test_required_missing_field_shifts_positions() {
    // A required (non-optional) field absent from an item contributes no
    // slot at all, so the record shortens and later values shift. Inference
    // would mark the field optional, so the schema is built by hand.
    let schema = SchemaNode {
        root_name: "items".to_string(),
        count: Some(2),
        fields: vec![
            SchemaField {
                name: "id".to_string(),
                kind: FieldKind::Primitive,
                nested: None,
                optional: false,
            },
            SchemaField {
                name: "note".to_string(),
                kind: FieldKind::Primitive,
                nested: None,
                optional: false,
            },
        ],
    };
    let value = ploon!({"items": [{"id": 1, "note": "x"}, {"id": 2}]});

    let config = Config::standard();
    let records = Encoder::new(&config).encode(&value, &schema).unwrap();
    assert_eq!(records, vec!["1:1|1|x", "1:2|2"]);

    // Strict decode catches the short record as an inconsistency.
    let text = format!("{}\n\n{}", schema.render(&config), records.join("\n"));
    assert_eq!(parse(&text).unwrap_err(), Error::schema_inconsistency(2, 2, 1));
}

#[test]
fn test_strict_rejects_wrong_value_count() {
    // Schema declares two primitive fields; record 1:1 carries only one.
    let text = "[items#2](id,name)\n\n1:1|1\n1:2|2|Bob";
    let err = parse(text).unwrap_err();
    assert_eq!(
        err,
        Error::schema_inconsistency(1, 2, 1)
    );

    // Lenient mode reconstructs what it can.
    let back = parse_lenient(text).unwrap();
    let items = back.as_object().unwrap().get("items").unwrap();
    assert_eq!(items.as_array().unwrap().len(), 2);
}

#[test]
fn test_strict_rejects_bad_path() {
    let text = "[items#1](id)\n\nabc:1|7";
    assert!(matches!(parse(text), Err(Error::InvalidPath { .. })));
    // Lenient: the record is dropped and the array comes back empty.
    let back = parse_lenient(text).unwrap();
    let items = back.as_object().unwrap().get("items").unwrap();
    assert!(items.as_array().unwrap().is_empty());
}

#[test]
fn test_delimiterless_records_dropped_silently() {
    // A record with no field delimiter is skipped even in strict mode.
    let text = "[items#1](id)\n\ngarbage\n1:1|7";
    let back = parse(text).unwrap();
    let items = back.as_object().unwrap().get("items").unwrap();
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[test]
fn test_malformed_schema_errors() {
    for text in [
        "no brackets at all",
        "[unclosed(a,b)\n\n1:1|1",
        "[name#notanumber](a)\n\n1:1|1",
        "[items#1](a{b)\n\n1:1|1",
    ] {
        match parse(text) {
            Err(Error::MalformedSchema { .. }) | Err(Error::EmptyInput) => {}
            other => panic!("expected schema error for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_compact_single_separator_after_schema() {
    let value = ploon!({"items": [{"id": 1}, {"id": 2}]});
    assert_eq!(
        stringify_compact(&value).unwrap(),
        "[items#2](id);1:1|1;1:2|2"
    );
}

#[test]
fn test_minify_prettify_are_substitutions() {
    let standard = "[items#2](id)\n\n1:1|1\n1:2|2";
    let compact = minify(standard);
    assert_eq!(compact, "[items#2](id);;1:1|1;1:2|2");
    assert_eq!(prettify(&compact), standard);

    // minify output still parses as Compact text (blank records are dropped).
    let back = parse_compact(&compact).unwrap();
    assert_eq!(
        back.as_object()
            .unwrap()
            .get("items")
            .unwrap()
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_empty_array_root() {
    let value = ploon!({"items": []});
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[items#0]()\n\n");

    let back = parse(&text).unwrap();
    let items = back.as_object().unwrap().get("items").unwrap();
    assert!(items.as_array().unwrap().is_empty());
}

#[test]
fn test_non_object_array_items_skipped() {
    // Mixed arrays only serialize their object items; scalars contribute
    // nothing to the schema or the records.
    let value = Value::Object({
        let mut map = ploon::PloonMap::new();
        map.insert(
            "items".to_string(),
            Value::Array(vec![
                Value::from(1),
                ploon!({"id": 2}),
            ]),
        );
        map
    });
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[items#2](id)\n\n1:2|2");
}

#[test]
fn test_multi_root_first_key_wins() {
    let value = ploon!({"users": [{"id": 1}], "extra": "dropped"});
    let text = stringify(&value).unwrap();
    assert_eq!(text, "[users#1](id)\n\n1:1|1");
}

#[test]
fn test_decoder_lenient_builder() {
    let decoder = Decoder::new(Config::standard()).lenient();
    let back = decoder.decode("[items#1](id)\n\nbad path|1\n1:1|7").unwrap();
    let items = back.as_object().unwrap().get("items").unwrap();
    assert_eq!(items.as_array().unwrap().len(), 1);
}
