//! Error types shared by the lexer, the grammar analysis and the downstream
//! parser.
//!
//! [`LexingError`] and [`ParsingError`] are data-facing: they describe input
//! that could not be tokenized or parsed and carry a [`SourcePosition`].
//! [`ParserGeneratorError`] signals misuse while a grammar or a rule set is
//! being assembled and carries only a message.
//!
//! # Examples
//!
//! ```rust
//! # use gramlex::{LexingError, SourcePosition};
//! let err = LexingError::new("", SourcePosition::new(4, 1, 4));
//! assert_eq!(err.position().column, 4);
//! assert!(err.to_string().contains("1:4"));
//! ```

use crate::SourcePosition;
use thiserror::Error;

/// Raised by a lexer stream when no rule matches at the current offset.
///
/// The message is empty for errors produced by [`LexerStream`]; the field is
/// reserved for richer diagnostics.
///
/// [`LexerStream`]: crate::LexerStream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexing error at {position}: {message:?}")]
pub struct LexingError {
    /// Human-readable message.
    pub message: String,
    /// Where the stream was when matching failed.
    pub position: SourcePosition,
}

impl LexingError {
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    #[inline]
    pub fn position(&self) -> SourcePosition {
        self.position
    }
}

/// Raised by a parser when no production rule can be applied.
///
/// Nothing in this workspace produces it; the type exists so that a
/// table-driven parser built on top shares the same error shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing error{}: {message}", .position.map(|p| format!(" at {p}")).unwrap_or_default())]
pub struct ParsingError {
    /// Human-readable message.
    pub message: String,
    /// Position of the offending token, if it had one.
    pub position: Option<SourcePosition>,
}

impl ParsingError {
    pub fn new(message: impl Into<String>, position: Option<SourcePosition>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    #[inline]
    pub fn position(&self) -> Option<SourcePosition> {
        self.position
    }
}

/// Misuse of the grammar or lexer-rule construction API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserGeneratorError {
    /// A production was named after a declared terminal.
    #[error("illegal rule name {0:?}")]
    IllegalRuleName(String),

    /// A production referenced a precedence that was never declared.
    #[error("precedence {0:?} doesn't exist")]
    UnknownPrecedence(String),

    /// Precedence was declared twice for the same terminal.
    #[error("precedence already specified for {0:?}")]
    PrecedenceRedefined(String),

    /// Associativity literal other than `left`, `right` or `nonassoc`.
    #[error("precedence must be one of left, right, nonassoc; not {0:?}")]
    InvalidAssociativity(String),

    /// `set_start` was called before any production was added.
    #[error("grammar must contain at least one rule")]
    EmptyGrammar,

    /// An analysis step needs the start symbol but `set_start` was not called.
    #[error("grammar has no start symbol")]
    NoStartSymbol,

    /// FOLLOW sets were requested before FIRST sets were computed.
    #[error("FIRST sets must be computed before FOLLOW sets")]
    FirstNotComputed,

    /// A lexer rule pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The offending pattern as given.
        pattern: String,
        /// The regex engine's diagnostic.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexing_error_keeps_position() {
        let err = LexingError::new("", SourcePosition::new(0, 1, 1));
        assert_eq!(err.position(), SourcePosition::new(0, 1, 1));
        assert!(err.message.is_empty());
        assert_eq!(err.to_string(), "lexing error at 1:1: \"\"");
    }

    #[test]
    fn parsing_error_with_and_without_position() {
        let err = ParsingError::new("unexpected PLUS", Some(SourcePosition::new(3, 2, 1)));
        assert_eq!(err.to_string(), "parsing error at 2:1: unexpected PLUS");
        let err = ParsingError::new("unexpected end", None);
        assert_eq!(err.to_string(), "parsing error: unexpected end");
        assert!(err.position().is_none());
    }

    #[test]
    fn generator_error_messages() {
        let err = ParserGeneratorError::IllegalRuleName("NUMBER".into());
        assert!(err.to_string().contains("illegal rule name"));
        let err = ParserGeneratorError::InvalidAssociativity("up".into());
        assert!(err.to_string().contains("left, right, nonassoc"));
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<LexingError>();
        _assert_send_sync_static::<ParsingError>();
        _assert_send_sync_static::<ParserGeneratorError>();
    }
}
