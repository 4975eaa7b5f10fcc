use crate::SourcePosition;

/// The single error kind reported by this crate.
///
/// Lexical problems (an invalid character, an unterminated string), a
/// mandatory sub-rule that did not match (a missing closing brace), and
/// input that no grammar production can consume all collapse into this one
/// type: a message plus the position where no production matched.
///
/// The parser tries alternatives by backtracking, so the position reported
/// is the deepest point in the input that any attempted production reached
/// before the parse as a whole failed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("syntax error at {position}: {message}")]
pub struct SyntaxError {
    /// Human-readable description of what was expected and what was found.
    message: String,

    /// Where the failure was detected.
    position: SourcePosition,
}

impl SyntaxError {
    /// Creates a new syntax error.
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the position where the failure was detected.
    pub fn position(&self) -> &SourcePosition {
        &self.position
    }
}
