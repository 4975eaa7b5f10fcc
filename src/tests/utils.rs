//! Shared test helpers.

use crate::Parser;
use crate::SyntaxError;
use crate::ast::FieldSelection;
use crate::ast::Fragment;
use crate::ast::Operation;
use crate::ast::Root;
use crate::ast::Selection;
use crate::ast::SelectionSet;
use crate::ast::Value;

/// Parses a document expected to be valid.
pub fn parse_document(source: &str) -> Root {
    Parser::new(source)
        .parse_document()
        .unwrap_or_else(|e| panic!("expected `{source}` to parse: {e}"))
}

/// Parses a document expected to be invalid.
pub fn parse_document_err(source: &str) -> SyntaxError {
    match Parser::new(source).parse_document() {
        Ok(root) => panic!("expected `{source}` to fail, parsed {root:?}"),
        Err(e) => e,
    }
}

/// Parses a standalone value expected to be valid.
pub fn parse_value(source: &str) -> Value {
    Parser::new(source)
        .parse_value_document()
        .unwrap_or_else(|e| panic!("expected `{source}` to parse: {e}"))
}

/// Parses a standalone value expected to be invalid.
pub fn parse_value_err(source: &str) -> SyntaxError {
    match Parser::new(source).parse_value_document() {
        Ok(value) => panic!("expected `{source}` to fail, parsed {value:?}"),
        Err(e) => e,
    }
}

/// Parses a document and extracts its only operation.
pub fn only_operation(source: &str) -> Operation {
    let mut root = parse_document(source);
    assert_eq!(root.operations.len(), 1, "in `{source}`");
    root.operations.remove(0)
}

/// Parses a document and extracts its only fragment.
pub fn only_fragment(source: &str) -> Fragment {
    let mut root = parse_document(source);
    assert_eq!(root.fragments.len(), 1, "in `{source}`");
    root.fragments.remove(0)
}

/// Parses a document consisting of one operation with one selection, and
/// extracts that selection.
pub fn only_selection(source: &str) -> Selection {
    let mut operation = only_operation(source);
    assert_eq!(operation.selections.selections.len(), 1, "in `{source}`");
    operation.selections.selections.remove(0)
}

/// Extracts a field selection from a `Selection`, panicking otherwise.
pub fn as_field(selection: Selection) -> FieldSelection {
    match selection {
        Selection::Field(field) => field,
        other => panic!("expected a field selection, got {other:?}"),
    }
}

/// Returns the first selection of a set as a field selection.
pub fn first_field(set: &SelectionSet) -> &FieldSelection {
    match set.selections.first() {
        Some(Selection::Field(field)) => field,
        other => panic!("expected a field selection, got {other:?}"),
    }
}
