//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Runtime half of `gramlex`: tokens, source positions, error types and a
//! rule-ordered lexer.
//!
//! Lexical rules are registered on a [`LexerGenerator`] at runtime, in
//! priority order, and frozen into a [`Lexer`]. Each call to
//! [`Lexer::lex`] returns a [`LexerStream`] that yields [`Token`]s one pull
//! at a time. Grammar analysis lives in the companion `gramlex-gen` crate.
//!
//! ```rust
//! # use gramlex::LexerGenerator;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut lg = LexerGenerator::new();
//! lg.add("NUMBER", r"\d+")?.add("PLUS", r"\+")?.ignore(r"\s+")?;
//! let lexer = lg.build();
//!
//! let mut stream = lexer.lex("2 +\n    37");
//! let mut last = None;
//! while let Some(token) = stream.try_next()? {
//!     last = Some(token);
//! }
//! let pos = last.unwrap().position().unwrap();
//! assert_eq!((pos.line, pos.column), (2, 5));
//! # Ok(())
//! # }
//! ```

mod cursor;
mod error;
mod generator;
mod lexer;
mod token;

pub use crate::cursor::SourcePosition;
pub use crate::error::{LexingError, ParserGeneratorError, ParsingError};
pub use crate::generator::{LexerGenerator, Rule, RuleFlags};
pub use crate::lexer::{Lexer, LexerStats, LexerStream};
pub use crate::token::Token;
