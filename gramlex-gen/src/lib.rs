//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Grammar analysis for LALR/SLR parser construction.
//!
//! `gramlex-gen` builds a context-free grammar at runtime and derives what a
//! parse-table builder needs from it:
//!  * productions numbered from 1, plus the augmented start production `S'`
//!    numbered 0,
//!  * per-production operator precedence, inherited from the rightmost
//!    terminal or given explicitly,
//!  * FIRST and FOLLOW sets, computed to a fixpoint,
//!  * the LR item chain of every production.
//!
//! Table construction itself and invoking semantic actions are left to the
//! caller; actions of type `A` are stored and returned untouched.
//!
//! # Example
//! ```rust
//! use gramlex_gen::{Grammar, END};
//!
//! # fn main() -> Result<(), gramlex::ParserGeneratorError> {
//! let sub: fn(i64, i64) -> i64 = |a, b| a - b;
//! let mut g = Grammar::new(["NUM", "MINUS"]);
//! g.set_precedence("MINUS", "left", 1)?;
//! g.add_production("expr", ["expr", "MINUS", "expr"], Some(sub), None)?;
//! g.add_production("expr", ["NUM"], None, None)?;
//! g.set_start()?;
//! g.compute_first();
//! g.compute_follow()?;
//! g.build_lr_items();
//!
//! assert_eq!(g.warn_unused(), 0);
//! assert!(g.follow()["expr"].contains(END));
//! let sub = g.production(1).unwrap().action().unwrap();
//! assert_eq!(sub(5, 3), 2);
//! # Ok(())
//! # }
//! ```

mod grammar;
mod lr_item;
mod precedence;
mod production;
pub mod report;
mod symtab;

/// FIRST-set member marking that a sequence can derive the empty string.
pub const EMPTY: &str = "<empty>";
/// End-of-input terminal.
pub const END: &str = "$end";
/// Terminal reserved for error recovery; present in every grammar.
pub const ERROR: &str = "error";
/// Left-hand side of production 0.
pub const AUGMENTED_START: &str = "S'";
/// Dot marker inside an [`LrItem`]'s dotted right-hand side.
pub const DOT: &str = ".";

pub use gramlex::ParserGeneratorError;
pub use grammar::{Grammar, SymbolSets};
pub use lr_item::LrItem;
pub use precedence::{Assoc, Precedence};
pub use production::Production;
pub use symtab::Symtab;
