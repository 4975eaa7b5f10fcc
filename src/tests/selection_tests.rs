//! Tests for the selection grammar: fields, aliases, arguments, nested
//! selection sets, type conditionals, and inline fragment spreads.

use crate::ast::Selection;
use crate::ast::Value;
use crate::tests::utils::as_field;
use crate::tests::utils::first_field;
use crate::tests::utils::only_selection;
use crate::tests::utils::parse_document_err;

#[test]
fn leaf_field() {
    let field = as_field(only_selection("{ firstname }"));
    assert_eq!(field.name, "firstname");
    assert!(field.alias.is_none());
    assert!(field.arguments.is_empty());
    assert!(field.selection.is_none());
}

#[test]
fn field_with_argument_and_nested_selection() {
    let field = as_field(only_selection("{ post(id: 42) { text } }"));

    assert_eq!(field.name, "post");
    assert_eq!(field.arguments.len(), 1);
    assert_eq!(field.arguments[0].name, "id");
    assert_eq!(field.arguments[0].value, Value::Int(42));

    let nested = field.selection.expect("nested selection set");
    assert_eq!(nested.selections.len(), 1);
    let text = first_field(&nested);
    assert_eq!(text.name, "text");
    assert!(text.selection.is_none());
}

#[test]
fn aliased_field() {
    let field = as_field(only_selection("{ author: user }"));
    assert_eq!(field.alias.as_deref(), Some("author"));
    assert_eq!(field.name, "user");
}

#[test]
fn value_keywords_are_valid_field_names_and_aliases() {
    let field = as_field(only_selection("{ true }"));
    assert_eq!(field.name, "true");

    let field = as_field(only_selection("{ null: false }"));
    assert_eq!(field.alias.as_deref(), Some("null"));
    assert_eq!(field.name, "false");
}

#[test]
fn identifier_without_colon_is_a_field_name_not_an_alias() {
    let field = as_field(only_selection("{ user }"));
    assert!(field.alias.is_none());
    assert_eq!(field.name, "user");
}

#[test]
fn multiple_arguments_are_ordered() {
    let field = as_field(only_selection(r#"{ posts(limit: 10, after: "cursor") }"#));
    let names: Vec<&str> = field.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["limit", "after"]);
}

#[test]
fn arguments_require_commas() {
    parse_document_err("{ posts(limit: 10 after: 2) }");
}

#[test]
fn empty_argument_parens_yield_no_arguments() {
    let field = as_field(only_selection("{ posts() }"));
    assert!(field.arguments.is_empty());
}

#[test]
fn type_conditional_never_parses_as_a_spread() {
    let selection = only_selection("{ ... on User { firstname } }");
    let Selection::TypeConditional(conditional) = &selection else {
        panic!("expected a type conditional, got {selection:?}");
    };
    assert_eq!(conditional.type_name, "User");
    assert_eq!(first_field(&conditional.selections).name, "firstname");
}

#[test]
fn inline_fragment_spread() {
    let selection = only_selection("{ ...MyUser }");
    assert_eq!(selection, Selection::InlineFragment("MyUser".to_string()));
}

#[test]
fn spread_does_not_take_a_selection_set() {
    parse_document_err("{ ...MyUser { firstname } }");
}

#[test]
fn empty_selection_set_fails() {
    parse_document_err("{}");
    parse_document_err("query Q {}");
    parse_document_err("{ post {} }");
}

#[test]
fn selections_nest_through_conditionals_and_fields() {
    let field = as_field(only_selection(
        "{ post { ... on Article { body { text } } } }",
    ));
    let nested = field.selection.expect("nested selection set");
    let Selection::TypeConditional(conditional) = &nested.selections[0] else {
        panic!("expected a type conditional, got {:?}", nested.selections[0]);
    };
    assert_eq!(conditional.type_name, "Article");
    let body = first_field(&conditional.selections);
    assert_eq!(body.name, "body");
    assert_eq!(first_field(body.selection.as_ref().unwrap()).name, "text");
}

#[test]
fn spread_then_field_both_parse() {
    let field = as_field(only_selection("{ author { ...MyUser media } }"));
    let nested = field.selection.expect("nested selection set");
    assert_eq!(nested.selections.len(), 2);
    assert_eq!(
        nested.selections[0],
        Selection::InlineFragment("MyUser".to_string()),
    );
    assert_eq!(first_field_at(&nested.selections, 1), "media");
}

fn first_field_at(selections: &[Selection], index: usize) -> &str {
    match &selections[index] {
        Selection::Field(field) => &field.name,
        other => panic!("expected a field selection, got {other:?}"),
    }
}
