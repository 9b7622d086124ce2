use crate::{DOT, Production};
use indexmap::IndexMap;
use smartstring::alias::String;
use std::fmt;

/// A production with a dot marking how much of its right-hand side has been
/// recognized.
///
/// Items refer to their production by number; look it up with
/// [`Grammar::production`](crate::Grammar::production). For `E -> E + T` the
/// item at index 1 is `E -> E . + T`, with `lr_before` = `E` and `lr_after`
/// empty because `+` is a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrItem {
    name: String,
    number: usize,
    prod: Vec<String>,
    lr_index: usize,
    lr_before: Option<String>,
    lr_after: Vec<usize>,
    lookaheads: IndexMap<usize, Vec<String>>,
}

impl LrItem {
    /// Builds the item at dot position `index` of `p`.
    ///
    /// `prod_names` maps each nonterminal to the numbers of the productions
    /// that define it.
    pub(crate) fn new<A>(
        p: &Production<A>,
        index: usize,
        prod_names: &IndexMap<String, Vec<usize>>,
    ) -> Self {
        let mut prod = p.symbols().to_vec();
        prod.insert(index, DOT.into());
        let lr_before = match index {
            0 => None,
            i => p.symbols().get(i - 1).cloned(),
        };
        let lr_after = p
            .symbols()
            .get(index)
            .and_then(|sym| prod_names.get(sym))
            .cloned()
            .unwrap_or_default();
        Self {
            name: p.name().into(),
            number: p.number(),
            prod,
            lr_index: index,
            lr_before,
            lr_after,
            lookaheads: IndexMap::new(),
        }
    }

    /// Left-hand nonterminal of the source production.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of the source production.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Right-hand side with the dot marker inserted.
    #[inline]
    pub fn prod(&self) -> &[String] {
        &self.prod
    }

    /// Dot position, `0..=production.len()`.
    #[inline]
    pub fn lr_index(&self) -> usize {
        self.lr_index
    }

    /// The symbol immediately left of the dot.
    #[inline]
    pub fn lr_before(&self) -> Option<&str> {
        self.lr_before.as_deref()
    }

    /// Numbers of the productions deriving the symbol right of the dot.
    /// Empty at the final item or when that symbol is a terminal.
    #[inline]
    pub fn lr_after(&self) -> &[usize] {
        &self.lr_after
    }

    /// The symbol immediately right of the dot.
    pub fn next_symbol(&self) -> Option<&str> {
        self.prod.get(self.lr_index + 1).map(|s| s.as_str())
    }

    /// Lookahead terminals per parser state, as recorded by a table builder.
    pub fn lookaheads(&self) -> &IndexMap<usize, Vec<String>> {
        &self.lookaheads
    }

    pub fn lookaheads_mut(&mut self) -> &mut IndexMap<usize, Vec<String>> {
        &mut self.lookaheads
    }

    /// Length of the dotted sequence (production length + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.prod.len()
    }

    /// Always false: the dotted sequence holds at least the dot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prod.is_empty()
    }
}

impl fmt::Display for LrItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.name)?;
        for sym in &self.prod {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}
