//! Tests for the value grammar: scalars, identifiers, variables, arrays,
//! and dictionaries.

use crate::ast::Value;
use crate::tests::utils::parse_value;
use crate::tests::utils::parse_value_err;
use indexmap::IndexMap;

#[test]
fn bool_literals() {
    assert_eq!(parse_value("false"), Value::Bool(false));
    assert_eq!(parse_value("true"), Value::Bool(true));
}

#[test]
fn null_literal() {
    assert_eq!(parse_value("null"), Value::Null);
}

#[test]
fn int_literal() {
    assert_eq!(parse_value("42"), Value::Int(42));
    assert_eq!(parse_value("-17"), Value::Int(-17));
}

#[test]
fn double_literal() {
    assert_eq!(parse_value("3.14"), Value::Double(3.14));
    assert_eq!(parse_value("1e3"), Value::Double(1000.0));
}

#[test]
fn string_literal() {
    assert_eq!(
        parse_value(r#""hello world""#),
        Value::String("hello world".to_string()),
    );
}

#[test]
fn bare_identifier_is_enum_like() {
    assert_eq!(
        parse_value("ACTIVE"),
        Value::Identifier("ACTIVE".to_string()),
    );
    // `truthy` must not be mistaken for the `true` keyword.
    assert_eq!(
        parse_value("truthy"),
        Value::Identifier("truthy".to_string()),
    );
}

#[test]
fn variable_reference_stores_bare_name() {
    assert_eq!(parse_value("$id"), Value::Variable("id".to_string()));
}

#[test]
fn empty_array() {
    assert_eq!(parse_value("[]"), Value::Array(vec![]));
}

#[test]
fn array_elements_are_ordered() {
    assert_eq!(
        parse_value("[1, two, 3.0]"),
        Value::Array(vec![
            Value::Int(1),
            Value::Identifier("two".to_string()),
            Value::Double(3.0),
        ]),
    );
}

#[test]
fn array_requires_commas() {
    parse_value_err("[1 2]");
}

#[test]
fn array_rejects_trailing_comma() {
    parse_value_err("[1, 2,]");
}

#[test]
fn empty_dictionary() {
    assert_eq!(parse_value("{}"), Value::Dictionary(IndexMap::new()));
}

#[test]
fn dictionary_with_identifier_and_string_keys() {
    let parsed = parse_value(r#"{limit: 10, "search term": "rust"}"#);
    let Value::Dictionary(entries) = parsed else {
        panic!("expected a dictionary, got {parsed:?}");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["limit"], Value::Int(10));
    assert_eq!(entries["search term"], Value::String("rust".to_string()));
}

#[test]
fn dictionary_duplicate_keys_last_write_wins() {
    let parsed = parse_value("{a: 1, a: 2}");
    let Value::Dictionary(entries) = parsed else {
        panic!("expected a dictionary, got {parsed:?}");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["a"], Value::Int(2));
}

#[test]
fn dictionary_accepts_keyword_bare_keys() {
    let parsed = parse_value("{null: 1, true: [false]}");
    let Value::Dictionary(entries) = parsed else {
        panic!("expected a dictionary, got {parsed:?}");
    };
    assert_eq!(entries["null"], Value::Int(1));
    assert_eq!(entries["true"], Value::Array(vec![Value::Bool(false)]));
}

#[test]
fn values_nest_arbitrarily() {
    assert_eq!(
        parse_value(r#"{filters: [{field: name, op: EQ, value: $name}], depth: [[1], [2]]}"#),
        Value::Dictionary(IndexMap::from([
            (
                "filters".to_string(),
                Value::Array(vec![Value::Dictionary(IndexMap::from([
                    ("field".to_string(), Value::Identifier("name".to_string())),
                    ("op".to_string(), Value::Identifier("EQ".to_string())),
                    ("value".to_string(), Value::Variable("name".to_string())),
                ]))]),
            ),
            (
                "depth".to_string(),
                Value::Array(vec![
                    Value::Array(vec![Value::Int(1)]),
                    Value::Array(vec![Value::Int(2)]),
                ]),
            ),
        ])),
    );
}

#[test]
fn dictionary_missing_colon_fails() {
    parse_value_err("{a 1}");
}

#[test]
fn dictionary_unclosed_fails() {
    parse_value_err("{a: 1");
}

#[test]
fn trailing_input_after_value_fails() {
    parse_value_err("42 43");
}

#[test]
fn nested_values_in_bool_and_null_positions() {
    assert_eq!(
        parse_value("[true, null, false]"),
        Value::Array(vec![Value::Bool(true), Value::Null, Value::Bool(false)]),
    );
}
