//! # Tokens
//!
//! [`Token`] is the unit the lexer produces and the grammar consumes: a kind
//! (the terminal name of the rule that matched), the matched text, and the
//! [`SourcePosition`] of its first character.
//!
//! Two tokens compare equal when their kind and text are equal, wherever
//! they occurred.
use crate::SourcePosition;
use smartstring::alias::String;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A syntactically relevant piece of text.
///
/// # Example
/// ```rust
/// # use gramlex::{SourcePosition, Token};
/// let a = Token::new("NUMBER", "42", Some(SourcePosition::new(0, 1, 1)));
/// let b = Token::new("NUMBER", "42", Some(SourcePosition::new(9, 3, 2)));
/// assert_eq!(a, b);
/// assert_eq!(a.kind(), "NUMBER");
/// assert_eq!(a.text(), "42");
/// assert_eq!(b.position().unwrap().line, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    /// Name of the rule (terminal) that produced this token.
    pub kind: String,
    /// The matched text.
    pub text: String,
    /// Position of the first character, if known.
    pub position: Option<SourcePosition>,
}

impl Token {
    pub fn new(kind: &str, text: &str, position: Option<SourcePosition>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            position,
        }
    }

    /// Returns the token's kind (terminal name).
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the matched text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn position(&self) -> Option<SourcePosition> {
        self.position
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.text.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text.as_str())
    }
}
