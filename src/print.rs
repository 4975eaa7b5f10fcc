//! Re-serialization of the AST back to GraphQL query text.
//!
//! `Display` is implemented for the AST node types, emitting canonical
//! text: 2-space-indented selection sets, comma-separated argument and
//! value lists, and dictionary keys written bare whenever they are valid
//! identifiers. Parsing the printed text yields a structurally equal tree.
//!
//! Three hand-built trees fall outside what the grammar can re-read: an
//! operation with a non-`query` kind and no name prints with its kind
//! keyword alone (a form the grammar rejects), a non-finite `Double`
//! prints the way `f64` displays, and a spread named `on`
//! (`Selection::InlineFragment("on")`) followed by a sibling field that
//! has a selection set prints as `...on field { ... }`, which re-parses
//! as a single type conditional. None of these can come out of parsing
//! the printed text: parsing never produces the first two at all, and in
//! the third shape the type-conditional alternative always wins.

use crate::ast::Argument;
use crate::ast::FieldSelection;
use crate::ast::Fragment;
use crate::ast::Operation;
use crate::ast::OperationKind;
use crate::ast::Root;
use crate::ast::Selection;
use crate::ast::SelectionSet;
use crate::ast::Value;
use crate::lexer::is_name_continue;
use crate::lexer::is_name_start;
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Dictionary(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if is_bare_key(key) {
                        write!(f, "{key}: {value}")?;
                    } else {
                        write!(f, "{}: {value}", quoted(key))?;
                    }
                }
                write!(f, "}}")
            }
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Value::Identifier(name) => write!(f, "{name}"),
            Value::Variable(name) => write!(f, "${name}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Double(value) => {
                let text = value.to_string();
                // Keep the literal lexically a double: `3.0` displays as
                // `3`, which would re-parse as an int.
                if text.chars().all(|c| c.is_ascii_digit() || c == '-') {
                    write!(f, "{text}.0")
                } else {
                    write!(f, "{text}")
                }
            }
            Value::String(value) => write!(f, "{}", quoted(value)),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_selection_set(self, f, 0)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment {} on {} ", self.name, self.type_name)?;
        fmt_selection_set(&self.selections, f, 0)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {name} ", self.kind)?,
            // The unnamed query prints as the bare shorthand.
            None if self.kind == OperationKind::Query => {}
            None => write!(f, "{} ", self.kind)?,
        }
        fmt_selection_set(&self.selections, f, 0)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for fragment in &self.fragments {
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "{fragment}")?;
        }
        for operation in &self.operations {
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "{operation}")?;
        }
        Ok(())
    }
}

/// Writes a braced, indented selection set; `indent` is the nesting level
/// of the braces themselves.
fn fmt_selection_set(
    set: &SelectionSet,
    f: &mut fmt::Formatter<'_>,
    indent: usize,
) -> fmt::Result {
    writeln!(f, "{{")?;
    for selection in &set.selections {
        fmt_selection(selection, f, indent + 1)?;
    }
    write!(f, "{:width$}}}", "", width = indent * 2)
}

/// Writes one selection on its own line(s) at the given nesting level.
fn fmt_selection(selection: &Selection, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    write!(f, "{:width$}", "", width = indent * 2)?;
    match selection {
        Selection::TypeConditional(conditional) => {
            write!(f, "... on {} ", conditional.type_name)?;
            fmt_selection_set(&conditional.selections, f, indent)?;
        }
        Selection::InlineFragment(name) => write!(f, "...{name}")?,
        Selection::Field(field) => fmt_field_selection(field, f, indent)?,
    }
    writeln!(f)
}

/// Writes a field selection (without the leading indent or trailing
/// newline, which belong to `fmt_selection`).
fn fmt_field_selection(
    field: &FieldSelection,
    f: &mut fmt::Formatter<'_>,
    indent: usize,
) -> fmt::Result {
    if let Some(alias) = &field.alias {
        write!(f, "{alias}: ")?;
    }
    write!(f, "{}", field.name)?;
    if !field.arguments.is_empty() {
        write!(f, "(")?;
        for (i, argument) in field.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, ")")?;
    }
    if let Some(selection) = &field.selection {
        write!(f, " ")?;
        fmt_selection_set(selection, f, indent)?;
    }
    Ok(())
}

/// Returns whether `key` can be printed as a bare dictionary key.
///
/// `true`, `false`, and `null` are printed quoted even though the grammar
/// accepts them as bare keys, keeping them visually distinct from the
/// literals of the same spelling.
fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_like_name = chars.next().is_some_and(is_name_start)
        && chars.all(is_name_continue);
    starts_like_name && !matches!(key, "true" | "false" | "null")
}

/// Quotes and escapes a string literal.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}
