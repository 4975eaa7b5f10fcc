//! Token types produced by the lexer and consumed by the parser.

use crate::SourceSpan;
use std::borrow::Cow;

/// The kind of a lexed token, including the token's value where one exists.
///
/// String values borrow from the source text (`Cow::Borrowed`) whenever the
/// lexer did not have to rewrite them (e.g. a string literal containing no
/// escape sequences).
///
/// The keywords `true`, `false`, and `null` are emitted as distinct token
/// kinds rather than as `Name` tokens, so the value grammar's bare-identifier
/// alternative can never swallow them; outside the value grammar the parser
/// still accepts them wherever a name is expected. Grammar keywords that are legal
/// identifiers elsewhere (`query`, `fragment`, `on`, ...) are plain `Name`
/// tokens that the parser interprets contextually.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'src> {
    /// `{`
    CurlyBraceOpen,
    /// `}`
    CurlyBraceClose,
    /// `[`
    SquareBracketOpen,
    /// `]`
    SquareBracketClose,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `:`
    Colon,
    /// `,` — a significant separator token in this grammar, not trivia.
    Comma,
    /// `...` (three adjacent dots)
    Ellipsis,
    /// `[_A-Za-z][_0-9A-Za-z]*`
    Name(&'src str),
    /// `$name` with no space after the sigil; the value is the bare name
    /// without the `$`.
    Variable(&'src str),
    /// Integer literal
    Int(i64),
    /// Floating-point literal (has a fraction and/or an exponent)
    Float(f64),
    /// Double-quoted string literal, with escape sequences resolved.
    String(Cow<'src, str>),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// End of input
    Eof,
}

impl<'src> TokenKind<'src> {
    /// Returns whether `self` and `other` are the same variant, ignoring any
    /// carried value.
    pub fn same_kind(&self, other: &TokenKind<'src>) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Returns a human-readable description of this token, for use in the
    /// "found ..." clause of error messages.
    pub fn description(&self) -> Cow<'static, str> {
        match self {
            TokenKind::CurlyBraceOpen => Cow::Borrowed("`{`"),
            TokenKind::CurlyBraceClose => Cow::Borrowed("`}`"),
            TokenKind::SquareBracketOpen => Cow::Borrowed("`[`"),
            TokenKind::SquareBracketClose => Cow::Borrowed("`]`"),
            TokenKind::ParenOpen => Cow::Borrowed("`(`"),
            TokenKind::ParenClose => Cow::Borrowed("`)`"),
            TokenKind::Colon => Cow::Borrowed("`:`"),
            TokenKind::Comma => Cow::Borrowed("`,`"),
            TokenKind::Ellipsis => Cow::Borrowed("`...`"),
            TokenKind::Name(name) => Cow::Owned(format!("`{name}`")),
            TokenKind::Variable(name) => Cow::Owned(format!("`${name}`")),
            TokenKind::Int(value) => Cow::Owned(format!("`{value}`")),
            TokenKind::Float(value) => Cow::Owned(format!("`{value}`")),
            TokenKind::String(_) => Cow::Borrowed("a string literal"),
            TokenKind::True => Cow::Borrowed("`true`"),
            TokenKind::False => Cow::Borrowed("`false`"),
            TokenKind::Null => Cow::Borrowed("`null`"),
            TokenKind::Eof => Cow::Borrowed("end of document"),
        }
    }
}

/// A lexed token: a kind (with value) plus the source span it was lexed from.
///
/// The span tags which slice of the input produced which lexical category;
/// downstream tools (highlighters, linters) can use it without re-scanning
/// the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind<'src>,

    /// The source location span of this token.
    pub span: SourceSpan,
}

impl<'src> Token<'src> {
    /// Convenience constructor.
    pub fn new(kind: TokenKind<'src>, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}
