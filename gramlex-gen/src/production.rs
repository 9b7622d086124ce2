use crate::{LrItem, Precedence};
use indexmap::IndexSet;
use smartstring::alias::String;
use std::fmt;

/// One grammar rule, `name -> symbols`.
///
/// `A` is the caller's semantic action handle. It is stored and handed back
/// untouched; nothing in this crate invokes it.
///
/// Productions are numbered in insertion order starting at 1. Number 0 is
/// the augmented start production `S' -> start` synthesized by
/// [`Grammar::set_start`](crate::Grammar::set_start).
#[derive(Debug, Clone)]
pub struct Production<A = ()> {
    number: usize,
    name: String,
    symbols: Vec<String>,
    precedence: Precedence,
    action: Option<A>,
    unique_syms: IndexSet<String>,
    pub(crate) lr_items: Vec<LrItem>,
}

impl<A> Production<A> {
    pub(crate) fn new(
        number: usize,
        name: &str,
        symbols: Vec<String>,
        precedence: Precedence,
        action: Option<A>,
    ) -> Self {
        let unique_syms = symbols.iter().cloned().collect();
        Self {
            number,
            name: name.into(),
            symbols,
            precedence,
            action,
            unique_syms,
            lr_items: Vec::new(),
        }
    }

    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Left-hand nonterminal.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Right-hand side symbols, possibly empty.
    #[inline]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    #[inline]
    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    #[inline]
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Distinct right-hand side symbols, in order of first occurrence.
    #[inline]
    pub fn unique_syms(&self) -> &IndexSet<String> {
        &self.unique_syms
    }

    /// Number of right-hand side symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// LR items for dot positions `0..=len()`, empty until
    /// [`Grammar::build_lr_items`](crate::Grammar::build_lr_items) runs.
    pub fn lr_items(&self) -> &[LrItem] {
        &self.lr_items
    }

    /// Mutable access for the table builder to fill in lookaheads.
    pub fn lr_items_mut(&mut self) -> &mut [LrItem] {
        &mut self.lr_items
    }

    pub fn lr_item(&self, index: usize) -> Option<&LrItem> {
        self.lr_items.get(index)
    }

    /// The first item of the chain (dot before the first symbol).
    pub fn lr_next(&self) -> Option<&LrItem> {
        self.lr_items.first()
    }
}

impl<A> fmt::Display for Production<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.name)?;
        for sym in &self.symbols {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}
