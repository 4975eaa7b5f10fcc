//! The abstract syntax tree produced by parsing a GraphQL document.
//!
//! Every node is an immutable owned value tree: a parent owns its children
//! by value, nothing is shared or cyclic, and nothing is mutated after
//! construction. A tree is built once per parse and handed to the caller as
//! the result.
//!
//! All nodes derive `serde::Serialize`/`serde::Deserialize`, so a tree can
//! be dumped for inspection with any serde encoder. `Hash`/`Eq` are not
//! derived because [`Value::Double`] holds an `f64`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// The parse result for a full document.
///
/// Every top-level construct is classified as exactly one of a fragment or
/// an operation. Order among fragments is preserved and order among
/// operations is preserved, but the relative order between a fragment and
/// an operation is not retained: top-level constructs are bucketed into the
/// two sequences as they are parsed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Root {
    pub fragments: Vec<Fragment>,
    pub operations: Vec<Operation>,
}

/// A GraphQL literal or expression value.
///
/// Exactly one variant is populated per node. Dictionary values and array
/// elements recurse into `Value` itself, so trees nest arbitrarily deep.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Value {
    /// `{key: value, ...}` — keys may be written as bare identifiers or as
    /// quoted strings; duplicate keys collapse to the last occurrence.
    /// Iteration order is insertion order, but equality ignores order.
    Dictionary(IndexMap<String, Value>),
    /// `[value, ...]`
    Array(Vec<Value>),
    /// A bare unquoted word, e.g. a GraphQL enum value.
    Identifier(String),
    /// A variable reference. The stored text is the bare name *without*
    /// the `$` sigil.
    Variable(String),
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Double(f64),
    /// A string literal, with escape sequences resolved.
    String(String),
    /// `true` or `false`.
    Bool(bool),
    /// The literal keyword `null`.
    Null,
}

/// A name/value pair attached to a field selection.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

/// A single field requested by a selection set.
///
/// `alias` is present only when the field was renamed with the
/// `alias: name` form. `arguments` is empty when no parenthesized argument
/// group was written. `selection` is `None` for leaf/scalar fields.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FieldSelection {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub selection: Option<SelectionSet>,
}

/// `... on TypeName { ... }` — selections that apply only when the
/// underlying object matches the named type.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TypeConditional {
    pub type_name: String,
    pub selections: SelectionSet,
}

/// One entry of a selection set.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Selection {
    /// `... on TypeName { ... }`
    TypeConditional(TypeConditional),
    /// `...FragmentName` — a spread of a named fragment; only the fragment
    /// name is stored.
    InlineFragment(String),
    /// A field selection.
    Field(FieldSelection),
}

/// The braced list of selections requested on a type.
///
/// A selection set parsed from source text always contains at least one
/// selection; `{}` is a syntax error.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
}

/// `fragment Name on TypeName { ... }` — a named, reusable selection set
/// scoped to a target type.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Fragment {
    pub name: String,
    pub type_name: String,
    pub selections: SelectionSet,
}

/// The kind of an operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// A top-level query/mutation/subscription request.
///
/// `name` is `None` only for the bare `{ ... }` shorthand or the unnamed
/// `query { ... }` form (both of which have kind [`OperationKind::Query`]).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub selections: SelectionSet,
}

/// The type of an operation-level variable declaration.
///
/// Reserved: the data model defines this shape for future variable
/// declarations in operation headers (`query Foo($id: ID!)`), but no
/// grammar production creates it yet.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum VariableType {
    NonNull(Box<VariableType>),
    List(Box<VariableType>),
    Name(String),
}

/// An operation-level variable declaration.
///
/// Reserved alongside [`VariableType`]; never produced by the parser.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct VariableDefinition {
    pub name: String,
    pub variable_type: VariableType,
}
