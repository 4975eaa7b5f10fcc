//! A zero-copy lexer over a `&str` input.
//!
//! Token values borrow directly from the source string using
//! `Cow::Borrowed`, avoiding allocations for names, variables, and strings
//! without escape sequences.
//!
//! Whitespace, newlines, and `#` comments are insignificant and skipped
//! between tokens. Commas are *not* trivia here: the value and argument
//! grammars treat them as required separators, so they are emitted as
//! ordinary tokens.
//!
//! There is no error recovery: the first lexical problem aborts the scan
//! with a [`SyntaxError`] anchored at the offending position.

use crate::SourcePosition;
use crate::SourceSpan;
use crate::SyntaxError;
use crate::token::Token;
use crate::token::TokenKind;
use std::borrow::Cow;

/// A lexer producing [`Token`]s from a `&str` input.
///
/// The `'src` lifetime ties token values to the source string.
pub struct Lexer<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    ///
    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current 0-based character column within the line.
    curr_col: usize,

    /// Whether the previous character was `\r`.
    ///
    /// Used to handle `\r\n` as a single newline: when we see `\r`, we set
    /// this flag; if the next character is `\n`, we skip it without
    /// incrementing the line number again.
    last_char_was_cr: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over a string slice.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col: 0,
            last_char_was_cr: false,
        }
    }

    /// Lexes the entire input into a token buffer.
    ///
    /// The returned buffer is never empty: it always ends with an `Eof`
    /// token. Fails on the first lexical problem.
    pub fn tokenize(source: &'src str) -> Result<Vec<Token<'src>>, SyntaxError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let at_end = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if at_end {
                return Ok(tokens);
            }
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    /// Returns the remaining source text to be lexed.
    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    /// Returns the current source position.
    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_col, self.curr_byte_offset)
    }

    /// Peeks at the next character without consuming it.
    ///
    /// Returns `None` if at end of input.
    fn peek_char(&self) -> Option<char> {
        self.peek_char_nth(0)
    }

    /// Peeks at the nth character ahead without consuming.
    ///
    /// `peek_char_nth(0)` is equivalent to `peek_char()`.
    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character and updates position tracking.
    ///
    /// Returns `None` if at end of input.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        let byte_len = ch.len_utf8();

        if ch == '\n' {
            if self.last_char_was_cr {
                // The \n of a \r\n pair; the line was already advanced when
                // the \r was consumed.
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += byte_len;
        Some(ch)
    }

    /// Creates a span from `start` to the current position.
    fn make_span(&self, start: SourcePosition) -> SourceSpan {
        SourceSpan::new(start, self.curr_position())
    }

    /// Creates a token spanning from `start` to the current position.
    fn make_token(&self, kind: TokenKind<'src>, start: SourcePosition) -> Token<'src> {
        let span = self.make_span(start);
        Token::new(kind, span)
    }

    /// Creates a syntax error anchored at `position`.
    fn error_at(&self, message: impl Into<String>, position: SourcePosition) -> SyntaxError {
        SyntaxError::new(message, position)
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    /// Advances to the next token, skipping whitespace and comments.
    fn next_token(&mut self) -> Result<Token<'src>, SyntaxError> {
        self.skip_insignificant();

        let start = self.curr_position();

        let Some(ch) = self.peek_char() else {
            return Ok(self.make_token(TokenKind::Eof, start));
        };

        match ch {
            // Single-character punctuators
            '{' => {
                self.consume();
                Ok(self.make_token(TokenKind::CurlyBraceOpen, start))
            }
            '}' => {
                self.consume();
                Ok(self.make_token(TokenKind::CurlyBraceClose, start))
            }
            '[' => {
                self.consume();
                Ok(self.make_token(TokenKind::SquareBracketOpen, start))
            }
            ']' => {
                self.consume();
                Ok(self.make_token(TokenKind::SquareBracketClose, start))
            }
            '(' => {
                self.consume();
                Ok(self.make_token(TokenKind::ParenOpen, start))
            }
            ')' => {
                self.consume();
                Ok(self.make_token(TokenKind::ParenClose, start))
            }
            ':' => {
                self.consume();
                Ok(self.make_token(TokenKind::Colon, start))
            }
            ',' => {
                self.consume();
                Ok(self.make_token(TokenKind::Comma, start))
            }

            // Ellipsis
            '.' => self.lex_ellipsis(start),

            // Variable reference
            '$' => self.lex_variable(start),

            // String literal
            '"' => self.lex_string(start),

            // Names and keywords
            c if is_name_start(c) => Ok(self.lex_name(start)),

            // Numbers (including negative)
            c if c == '-' || c.is_ascii_digit() => self.lex_number(start),

            c => {
                self.consume();
                Err(self.error_at(format!("unexpected character `{c}`"), start))
            }
        }
    }

    /// Skips whitespace (space, tab, newlines, BOM) and `#` comments.
    fn skip_insignificant(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | '\u{FEFF}' => {
                    self.consume();
                }
                '#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    /// Skips a `#` comment through the end of the line.
    ///
    /// The terminating newline is left for `skip_insignificant` to consume,
    /// so line tracking stays in one place.
    fn skip_comment(&mut self) {
        let rest = self.remaining();
        let len = memchr::memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        self.curr_col += rest[..len].chars().count();
        self.curr_byte_offset += len;
        // The comment text intervenes, so a `\n` after it is a newline of
        // its own even when a `\r` preceded the `#`.
        self.last_char_was_cr = false;
    }

    // =========================================================================
    // Ellipsis lexing
    // =========================================================================

    /// Lexes `...`. One or two dots, or dots separated by whitespace, are
    /// not a token in this grammar.
    fn lex_ellipsis(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            Ok(self.make_token(TokenKind::Ellipsis, start))
        } else {
            self.consume();
            Err(self.error_at("unexpected `.` (use `...` for a fragment spread)", start))
        }
    }

    // =========================================================================
    // Name and variable lexing
    // =========================================================================

    /// Consumes a run of name characters starting at the current position.
    ///
    /// The caller must have verified that the next character is a valid
    /// name-start character.
    fn consume_name(&mut self) -> &'src str {
        let name_start = self.curr_byte_offset;
        self.consume();
        while let Some(ch) = self.peek_char() {
            if is_name_continue(ch) {
                self.consume();
            } else {
                break;
            }
        }
        &self.source[name_start..self.curr_byte_offset]
    }

    /// Lexes a name matching `/[_A-Za-z][_0-9A-Za-z]*/`.
    ///
    /// The keywords `true`, `false`, and `null` are emitted as distinct
    /// token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> Token<'src> {
        let name = self.consume_name();
        let kind = match name {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Name(name),
        };
        self.make_token(kind, start)
    }

    /// Lexes a variable reference matching `/\$[_A-Za-z][_0-9A-Za-z]*/`.
    ///
    /// The name must immediately follow the sigil; `$ name` is an error.
    /// The token value is the bare name without the `$`.
    fn lex_variable(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        self.consume(); // the `$`
        match self.peek_char() {
            Some(ch) if is_name_start(ch) => {
                let name = self.consume_name();
                Ok(self.make_token(TokenKind::Variable(name), start))
            }
            _ => Err(self.error_at("expected a name immediately after `$`", start)),
        }
    }

    // =========================================================================
    // Number lexing
    // =========================================================================

    /// Lexes an integer or float literal.
    ///
    /// Handles:
    /// - Optional negative sign: `-`
    /// - Integer part: `0` or `[1-9][0-9]*`
    /// - Optional decimal part: `.[0-9]+`
    /// - Optional exponent: `[eE][+-]?[0-9]+`
    ///
    /// A decimal part or an exponent makes the token a `Float`; otherwise it
    /// is an `Int`.
    fn lex_number(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        // Optional negative sign
        if self.peek_char() == Some('-') {
            self.consume();
        }

        // Integer part
        match self.peek_char() {
            Some('0') => {
                self.consume();
                if let Some(ch) = self.peek_char()
                    && ch.is_ascii_digit()
                {
                    return Err(self.error_at("leading zeros are not allowed in numbers", start));
                }
            }
            Some(ch) if ch.is_ascii_digit() => {
                while let Some(ch) = self.peek_char() {
                    if ch.is_ascii_digit() {
                        self.consume();
                    } else {
                        break;
                    }
                }
            }
            // Just a `-` with no digits
            _ => return Err(self.error_at("unexpected `-`", start)),
        }

        // Optional decimal part. The lookahead for a digit keeps a trailing
        // `.` (or `..`) out of the number token.
        if self.peek_char() == Some('.')
            && let Some(ch) = self.peek_char_nth(1)
            && ch.is_ascii_digit()
        {
            is_float = true;
            self.consume(); // the `.`
            while let Some(ch) = self.peek_char() {
                if ch.is_ascii_digit() {
                    self.consume();
                } else {
                    break;
                }
            }
        }

        // Optional exponent part
        if let Some(ch) = self.peek_char()
            && (ch == 'e' || ch == 'E')
        {
            is_float = true;
            self.consume();

            if let Some(ch) = self.peek_char()
                && (ch == '+' || ch == '-')
            {
                self.consume();
            }

            let has_exponent_digits =
                matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit());
            if !has_exponent_digits {
                return Err(self.error_at("exponent must have at least one digit", start));
            }

            while let Some(ch) = self.peek_char() {
                if ch.is_ascii_digit() {
                    self.consume();
                } else {
                    break;
                }
            }
        }

        let num_text = &self.source[num_start..self.curr_byte_offset];

        if is_float {
            match num_text.parse::<f64>() {
                Ok(value) => Ok(self.make_token(TokenKind::Float(value), start)),
                Err(_) => Err(self.error_at(format!("invalid float `{num_text}`"), start)),
            }
        } else {
            match num_text.parse::<i64>() {
                Ok(value) => Ok(self.make_token(TokenKind::Int(value), start)),
                Err(_) => Err(self.error_at(
                    format!("integer `{num_text}` is out of range"),
                    start,
                )),
            }
        }
    }

    // =========================================================================
    // String lexing
    // =========================================================================

    /// Lexes a double-quoted string literal with the JSON escape set
    /// (`\" \\ \/ \b \f \n \r \t \uXXXX`).
    ///
    /// Escape sequences are resolved here, so the token value is the cooked
    /// string. When no escape is present, the value borrows from the source.
    fn lex_string(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        self.consume(); // the opening quote
        let content_start = self.curr_byte_offset;

        // Cooked content; allocated lazily on the first escape sequence.
        let mut cooked: Option<String> = None;

        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error_at("unterminated string literal", start));
                }
                Some('"') => {
                    let content_end = self.curr_byte_offset;
                    self.consume();
                    let value = match cooked {
                        Some(s) => Cow::Owned(s),
                        None => Cow::Borrowed(&self.source[content_start..content_end]),
                    };
                    return Ok(self.make_token(TokenKind::String(value), start));
                }
                Some('\\') => {
                    if cooked.is_none() {
                        cooked = Some(
                            self.source[content_start..self.curr_byte_offset].to_string(),
                        );
                    }
                    let escape_start = self.curr_position();
                    self.consume(); // the backslash
                    let resolved = self.lex_escape_sequence(escape_start)?;
                    // `cooked` was initialized above.
                    cooked.as_mut().unwrap().push(resolved);
                }
                Some(ch) => {
                    self.consume();
                    if let Some(cooked) = cooked.as_mut() {
                        cooked.push(ch);
                    }
                }
            }
        }
    }

    /// Resolves one escape sequence; the backslash has already been
    /// consumed.
    fn lex_escape_sequence(
        &mut self,
        escape_start: SourcePosition,
    ) -> Result<char, SyntaxError> {
        let Some(ch) = self.consume() else {
            return Err(self.error_at("unterminated string literal", escape_start));
        };
        match ch {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => {
                let mut code: u32 = 0;
                for _ in 0..4 {
                    let Some(digit) = self.consume().and_then(|c| c.to_digit(16)) else {
                        return Err(self.error_at(
                            "`\\u` escape must be followed by 4 hex digits",
                            escape_start,
                        ));
                    };
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or_else(|| {
                    self.error_at(
                        format!("`\\u{code:04x}` is not a valid character"),
                        escape_start,
                    )
                })
            }
            _ => Err(self.error_at(format!("invalid escape sequence `\\{ch}`"), escape_start)),
        }
    }
}

/// Returns whether `ch` can start a name (`[_A-Za-z]`).
pub(crate) fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Returns whether `ch` can continue a name (`[_0-9A-Za-z]`).
pub(crate) fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}
