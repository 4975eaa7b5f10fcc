//! Recursive descent parser for GraphQL query-language documents.
//!
//! This module provides [`Parser`], which turns one in-memory document into
//! an [`ast::Root`], or fails with a single [`SyntaxError`].
//!
//! # Architecture
//!
//! The input is lexed up front into a token buffer; the parser walks it
//! with a cursor. Grammar rules have a corresponding `parse_*` method
//! returning `Result<AstNode, ()>`, where `Err(())` means "this production
//! did not match here" and the expectation has already been recorded.
//!
//! Competing alternatives are tried in a fixed priority order through
//! [`Parser::backtrack`], which restores the cursor when an alternative
//! fails. Since the cursor is the only parse state an attempt mutates,
//! restoring it is sufficient to undo the attempt — every production fails
//! without consuming.
//!
//! Recursive rules (values nest inside dictionaries and arrays, selection
//! sets nest inside field selections and type conditionals) are plain
//! recursive method calls; the call stack bounds how deep a pathological
//! document can nest.
//!
//! # Error reporting
//!
//! There is no error recovery and no partial result. A failed alternative
//! inside an alternation is swallowed and the next alternative is tried;
//! a failure that escapes every alternative aborts the parse. The reported
//! [`SyntaxError`] is positioned at the deepest token any attempted
//! production reached, with the set of constructs that were expected there.

use crate::SyntaxError;
use crate::ast::Argument;
use crate::ast::FieldSelection;
use crate::ast::Fragment;
use crate::ast::Operation;
use crate::ast::OperationKind;
use crate::ast::Root;
use crate::ast::Selection;
use crate::ast::SelectionSet;
use crate::ast::TypeConditional;
use crate::ast::Value;
use crate::lexer::Lexer;
use crate::token::Token;
use crate::token::TokenKind;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// A backtracking recursive descent parser for one GraphQL document.
///
/// # Usage
///
/// ```
/// use graphql_syntax::Parser;
///
/// let source = "query MyQuery { post(id: 42) { text } }";
/// let root = Parser::new(source).parse_document().unwrap();
///
/// assert_eq!(root.operations.len(), 1);
/// assert_eq!(root.operations[0].name.as_deref(), Some("MyQuery"));
/// ```
pub struct Parser<'src> {
    /// The document text; lexed when a `parse_*` entry point runs.
    source: &'src str,

    /// The token buffer. Always ends with an `Eof` token once populated.
    tokens: Vec<Token<'src>>,

    /// Cursor into `tokens`. Saved and restored by `backtrack`.
    pos: usize,

    /// The deepest token index any failed production reached.
    ///
    /// Deliberately *not* restored by `backtrack`: a swallowed alternative
    /// still contributes to the final error if it got further into the
    /// input than anything else.
    deepest_pos: usize,

    /// Descriptions of what was expected at `deepest_pos`.
    ///
    /// Uses SmallVec to avoid heap allocation: an alternation rarely has
    /// more than a few competing expectations at one position.
    deepest_expected: SmallVec<[&'static str; 4]>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser over a document source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            pos: 0,
            deepest_pos: 0,
            deepest_expected: SmallVec::new(),
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parses a full document into a [`Root`].
    ///
    /// An empty document succeeds with empty fragment and operation
    /// sequences. Trailing input that no production can consume fails the
    /// whole parse.
    pub fn parse_document(mut self) -> Result<Root, SyntaxError> {
        self.tokenize()?;
        match self.parse_root() {
            Ok(root) => Ok(root),
            Err(()) => Err(self.into_syntax_error()),
        }
    }

    /// Parses input consisting of exactly one value expression.
    ///
    /// This is the standalone entry point for the value grammar; the whole
    /// input must be consumed.
    ///
    /// ```
    /// use graphql_syntax::Parser;
    /// use graphql_syntax::ast::Value;
    ///
    /// let value = Parser::new("[1, 2.5, $id]").parse_value_document().unwrap();
    /// assert!(matches!(value, Value::Array(_)));
    /// ```
    pub fn parse_value_document(mut self) -> Result<Value, SyntaxError> {
        self.tokenize()?;
        let result = self.parse_value().and_then(|value| {
            if self.at_eof() {
                Ok(value)
            } else {
                self.expected("end of input")
            }
        });
        result.map_err(|()| self.into_syntax_error())
    }

    /// Lexes the source into the token buffer.
    fn tokenize(&mut self) -> Result<(), SyntaxError> {
        self.tokens = Lexer::tokenize(self.source)?;
        Ok(())
    }

    /// Converts the deepest-failure record into the public error.
    fn into_syntax_error(self) -> SyntaxError {
        // The buffer always ends with Eof, so the clamp only guards the
        // initial deepest_pos of an empty record.
        let token = &self.tokens[self.deepest_pos.min(self.tokens.len() - 1)];
        let found = token.kind.description();
        let message = match self.deepest_expected.as_slice() {
            [] => format!("unexpected {found}"),
            [only] => format!("expected {only}, found {found}"),
            [first, second] => format!("expected {first} or {second}, found {found}"),
            [head @ .., last] => {
                format!("expected {}, or {last}, found {found}", head.join(", "))
            }
        };
        SyntaxError::new(message, token.span.start_inclusive.clone())
    }

    // =========================================================================
    // Cursor primitives
    // =========================================================================

    /// Returns the token at the cursor without consuming it.
    fn peek(&self) -> &Token<'src> {
        &self.tokens[self.pos]
    }

    /// Advances the cursor by one token, never past the final `Eof`.
    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns whether the cursor is at the end of the document.
    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Records that `what` was expected at the cursor and fails.
    ///
    /// A failure deeper than the current record replaces it; a failure at
    /// the same depth adds a competing expectation.
    fn expected<T>(&mut self, what: &'static str) -> Result<T, ()> {
        if self.pos > self.deepest_pos {
            self.deepest_pos = self.pos;
            self.deepest_expected.clear();
        }
        if self.pos == self.deepest_pos && !self.deepest_expected.contains(&what) {
            self.deepest_expected.push(what);
        }
        Err(())
    }

    /// Consumes the next token if it has the given kind, otherwise records
    /// `what` and fails.
    fn eat(&mut self, kind: &TokenKind<'src>, what: &'static str) -> Result<(), ()> {
        if self.peek().kind.same_kind(kind) {
            self.bump();
            Ok(())
        } else {
            self.expected(what)
        }
    }

    /// Consumes the next token if it is a name, returning the name,
    /// otherwise records `what` and fails.
    ///
    /// The keyword tokens `true`/`false`/`null` match the name pattern and
    /// are reserved only inside the value grammar, so they count as names
    /// here (a field or fragment may be called `true`).
    fn eat_name(&mut self, what: &'static str) -> Result<String, ()> {
        let name = match &self.peek().kind {
            TokenKind::Name(name) => (*name).to_string(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            TokenKind::Null => "null".to_string(),
            _ => return self.expected(what),
        };
        self.bump();
        Ok(name)
    }

    /// Consumes the next token if it is the given keyword (a `Name` with
    /// exactly that text), otherwise records `what` and fails.
    fn eat_keyword(&mut self, keyword: &str, what: &'static str) -> Result<(), ()> {
        match &self.peek().kind {
            TokenKind::Name(name) if *name == keyword => {
                self.bump();
                Ok(())
            }
            _ => self.expected(what),
        }
    }

    /// Runs one alternative, restoring the cursor if it fails.
    ///
    /// This is the fail-without-consuming guarantee alternations rely on:
    /// after a failed attempt the cursor is exactly where it started, so
    /// the next alternative sees untouched input.
    fn backtrack<T>(
        &mut self,
        alternative: impl FnOnce(&mut Self) -> Result<T, ()>,
    ) -> Result<T, ()> {
        let saved_pos = self.pos;
        let result = alternative(self);
        if result.is_err() {
            self.pos = saved_pos;
        }
        result
    }

    /// Parses zero or more comma-separated items.
    ///
    /// An empty sequence is recognized by the closing delimiter `end`
    /// (which is *not* consumed). An element is required after every
    /// comma, so trailing commas fail.
    fn parse_comma_separated<T>(
        &mut self,
        end: &TokenKind<'src>,
        mut item: impl FnMut(&mut Self) -> Result<T, ()>,
    ) -> Result<Vec<T>, ()> {
        let mut items = Vec::new();
        if self.peek().kind.same_kind(end) {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if matches!(self.peek().kind, TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(items)
    }

    // =========================================================================
    // Document grammar
    // =========================================================================

    /// Parses top-level constructs until end of input, bucketing them into
    /// fragments and operations in first-seen order per bucket.
    fn parse_root(&mut self) -> Result<Root, ()> {
        let mut fragments = Vec::new();
        let mut operations = Vec::new();

        while !self.at_eof() {
            // Fragment first: both root objects start with unique leading
            // tokens, so the order only affects which fails faster.
            if let Ok(fragment) = self.backtrack(Self::parse_fragment) {
                fragments.push(fragment);
                continue;
            }
            operations.push(self.backtrack(Self::parse_operation)?);
        }

        Ok(Root {
            fragments,
            operations,
        })
    }

    /// Parses `fragment Name on TypeName SelectionSet`.
    fn parse_fragment(&mut self) -> Result<Fragment, ()> {
        self.eat_keyword("fragment", "`fragment`")?;
        let name = self.eat_name("a fragment name")?;
        self.eat_keyword("on", "`on`")?;
        let type_name = self.eat_name("a type name")?;
        let selections = self.parse_selection_set()?;
        Ok(Fragment {
            name,
            type_name,
            selections,
        })
    }

    /// Parses an operation: a header followed by a selection set.
    fn parse_operation(&mut self) -> Result<Operation, ()> {
        let (kind, name) = self.parse_operation_header();
        let selections = self.parse_selection_set()?;
        Ok(Operation {
            kind,
            name,
            selections,
        })
    }

    /// Parses an operation header.
    ///
    /// Either an explicit kind keyword followed by a mandatory name, or
    /// the bare shorthand — an optional `query` keyword with no name —
    /// which always yields `(Query, None)`. The shorthand consumes nothing
    /// it does not match, so this never fails.
    fn parse_operation_header(&mut self) -> (OperationKind, Option<String>) {
        if let Ok(header) = self.backtrack(Self::parse_named_operation_header) {
            return header;
        }
        if matches!(self.peek().kind, TokenKind::Name("query")) {
            self.bump();
        }
        (OperationKind::Query, None)
    }

    /// Parses `(query|mutation|subscription) Name`.
    fn parse_named_operation_header(&mut self) -> Result<(OperationKind, Option<String>), ()> {
        let kind = match &self.peek().kind {
            TokenKind::Name("query") => OperationKind::Query,
            TokenKind::Name("mutation") => OperationKind::Mutation,
            TokenKind::Name("subscription") => OperationKind::Subscription,
            _ => return self.expected("`query`, `mutation`, or `subscription`"),
        };
        self.bump();
        let name = self.eat_name("an operation name")?;
        Ok((kind, Some(name)))
    }

    // =========================================================================
    // Selection grammar
    // =========================================================================

    /// Parses `'{' oneOrMoreSelections '}'`.
    ///
    /// A selection set must be non-empty: `{}` fails.
    fn parse_selection_set(&mut self) -> Result<SelectionSet, ()> {
        self.eat(&TokenKind::CurlyBraceOpen, "`{`")?;

        let mut selections = vec![self.parse_selection()?];
        while let Ok(selection) = self.backtrack(Self::parse_selection) {
            selections.push(selection);
        }

        self.eat(&TokenKind::CurlyBraceClose, "`}`")?;
        Ok(SelectionSet { selections })
    }

    /// Parses one selection.
    ///
    /// The type conditional must be attempted before the inline fragment
    /// spread: both start with `...`, and the `on` keyword is what
    /// disambiguates them. Trying the spread first would consume the `...`
    /// and then fail deeper inside on `... on Type` input, leaving
    /// correctness at the mercy of the backtracking granularity; the more
    /// specific alternative goes first instead. The field alternative
    /// starts with a disjoint token, so its position is arbitrary.
    fn parse_selection(&mut self) -> Result<Selection, ()> {
        if let Ok(conditional) = self.backtrack(Self::parse_type_conditional) {
            return Ok(Selection::TypeConditional(conditional));
        }
        if let Ok(field) = self.backtrack(Self::parse_field_selection) {
            return Ok(Selection::Field(field));
        }
        let fragment_name = self.backtrack(Self::parse_inline_fragment)?;
        Ok(Selection::InlineFragment(fragment_name))
    }

    /// Parses `'...' 'on' TypeName SelectionSet`.
    fn parse_type_conditional(&mut self) -> Result<TypeConditional, ()> {
        self.eat(&TokenKind::Ellipsis, "`...`")?;
        self.eat_keyword("on", "`on`")?;
        let type_name = self.eat_name("a type name")?;
        let selections = self.parse_selection_set()?;
        Ok(TypeConditional {
            type_name,
            selections,
        })
    }

    /// Parses `'...' FragmentName`.
    fn parse_inline_fragment(&mut self) -> Result<String, ()> {
        self.eat(&TokenKind::Ellipsis, "`...`")?;
        self.eat_name("a fragment name")
    }

    /// Parses a field selection: optional alias, field name, optional
    /// parenthesized arguments, optional nested selection set.
    fn parse_field_selection(&mut self) -> Result<FieldSelection, ()> {
        // The alias form commits only when a colon follows the identifier;
        // otherwise the identifier is reinterpreted as the field name. One
        // token of lookahead (the colon) is all it takes.
        let alias = self.backtrack(Self::parse_alias).ok();
        let name = self.eat_name("a field name")?;

        let arguments = if matches!(self.peek().kind, TokenKind::ParenOpen) {
            self.bump();
            let arguments =
                self.parse_comma_separated(&TokenKind::ParenClose, Self::parse_argument)?;
            self.eat(&TokenKind::ParenClose, "`)`")?;
            arguments
        } else {
            Vec::new()
        };

        let selection = if matches!(self.peek().kind, TokenKind::CurlyBraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(FieldSelection {
            alias,
            name,
            arguments,
            selection,
        })
    }

    /// Parses the `Alias ':'` prefix of an aliased field.
    fn parse_alias(&mut self) -> Result<String, ()> {
        let alias = self.eat_name("a field name")?;
        self.eat(&TokenKind::Colon, "`:`")?;
        Ok(alias)
    }

    /// Parses `ArgumentName ':' Value`.
    fn parse_argument(&mut self) -> Result<Argument, ()> {
        let name = self.eat_name("an argument name")?;
        self.eat(&TokenKind::Colon, "`:`")?;
        let value = self.parse_value()?;
        Ok(Argument { name, value })
    }

    // =========================================================================
    // Value grammar
    // =========================================================================

    /// Parses one value expression.
    ///
    /// The grammar's alternatives apply in a fixed priority order:
    /// dictionary, array, variable, identifier, string, int, double, bool,
    /// null. Every alternative begins with a distinct token kind (the
    /// lexer splits `true`/`false`/`null` off from names, and floats off
    /// from ints), so the ordered alternation reduces to a single match on
    /// the next token.
    fn parse_value(&mut self) -> Result<Value, ()> {
        let value = match &self.peek().kind {
            TokenKind::CurlyBraceOpen => return self.parse_dictionary_value(),
            TokenKind::SquareBracketOpen => return self.parse_array_value(),
            TokenKind::Variable(name) => Value::Variable((*name).to_string()),
            TokenKind::Name(name) => Value::Identifier((*name).to_string()),
            TokenKind::String(value) => Value::String(value.clone().into_owned()),
            TokenKind::Int(value) => Value::Int(*value),
            TokenKind::Float(value) => Value::Double(*value),
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::Null => Value::Null,
            _ => return self.expected("a value"),
        };
        self.bump();
        Ok(value)
    }

    /// Parses `'{' (Key ':' Value),* '}'`.
    ///
    /// Keys may be quoted strings or bare identifiers. Duplicate keys
    /// collapse to the last occurrence.
    fn parse_dictionary_value(&mut self) -> Result<Value, ()> {
        self.eat(&TokenKind::CurlyBraceOpen, "`{`")?;
        let entries = self
            .parse_comma_separated(&TokenKind::CurlyBraceClose, Self::parse_dictionary_entry)?;
        self.eat(&TokenKind::CurlyBraceClose, "`}`")?;

        let mut dictionary = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            dictionary.insert(key, value);
        }
        Ok(Value::Dictionary(dictionary))
    }

    /// Parses one `Key ':' Value` dictionary entry.
    ///
    /// Keyword tokens are legal bare keys: `{null: 1}` has the key `"null"`.
    fn parse_dictionary_entry(&mut self) -> Result<(String, Value), ()> {
        let key = match &self.peek().kind {
            TokenKind::String(key) => key.clone().into_owned(),
            TokenKind::Name(key) => (*key).to_string(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            TokenKind::Null => "null".to_string(),
            _ => return self.expected("a dictionary key"),
        };
        self.bump();
        self.eat(&TokenKind::Colon, "`:`")?;
        let value = self.parse_value()?;
        Ok((key, value))
    }

    /// Parses `'[' Value,* ']'`.
    fn parse_array_value(&mut self) -> Result<Value, ()> {
        self.eat(&TokenKind::SquareBracketOpen, "`[`")?;
        let elements =
            self.parse_comma_separated(&TokenKind::SquareBracketClose, Self::parse_value)?;
        self.eat(&TokenKind::SquareBracketClose, "`]`")?;
        Ok(Value::Array(elements))
    }
}
