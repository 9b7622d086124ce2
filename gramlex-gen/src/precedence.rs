//! Operator associativity and precedence declarations.
//!
//! Precedence is declared per terminal with [`Grammar::set_precedence`] and
//! inherited by productions, which carry it to the table builder for
//! shift/reduce conflict resolution.
//!
//! [`Grammar::set_precedence`]: crate::Grammar::set_precedence

use gramlex::ParserGeneratorError;
use std::fmt;
use std::str::FromStr;

/// How operators of equal precedence group.
///
/// | Variant | Literal |
/// |---------|---------|
/// | [`Assoc::Left`] | `left` |
/// | [`Assoc::Right`] | `right` |
/// | [`Assoc::Nonassoc`] | `nonassoc` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Assoc {
    /// Groups from left to right.
    Left = 0,
    /// Groups from right to left.
    Right = 1,
    /// Cannot chain with itself.
    Nonassoc = 2,
}

impl Assoc {
    /// Canonical string representations, indexed by discriminant.
    pub const STRS: &[&str] = &["left", "right", "nonassoc"];

    pub fn as_str(self) -> &'static str {
        Self::STRS[self as usize]
    }
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assoc {
    type Err = ParserGeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Assoc::Left),
            "right" => Ok(Assoc::Right),
            "nonassoc" => Ok(Assoc::Nonassoc),
            other => Err(ParserGeneratorError::InvalidAssociativity(other.to_owned())),
        }
    }
}

impl TryFrom<&str> for Assoc {
    type Error = ParserGeneratorError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Associativity and binding level of a terminal or production.
///
/// Higher levels bind tighter. Productions without any declared precedence
/// get the default, `(right, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precedence {
    pub assoc: Assoc,
    pub level: usize,
}

impl Precedence {
    pub const fn new(assoc: Assoc, level: usize) -> Self {
        Self { assoc, level }
    }
}

impl Default for Precedence {
    fn default() -> Self {
        Self::new(Assoc::Right, 0)
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.assoc, self.level)
    }
}
