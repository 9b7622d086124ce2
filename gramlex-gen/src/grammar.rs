//! The grammar model, FIRST/FOLLOW fixpoint computations and LR item chain
//! construction.

use crate::symtab::Symtab;
use crate::{AUGMENTED_START, Assoc, EMPTY, END, ERROR, LrItem, Precedence, Production};
use gramlex::ParserGeneratorError;
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;

/// Symbol name → set of terminal names (plus sentinels), in insertion order.
pub type SymbolSets = IndexMap<String, IndexSet<String>>;

/// A context-free grammar assembled at runtime.
///
/// Call order: [`add_production`] (and [`set_precedence`]) as often as
/// needed, then [`set_start`], [`compute_first`], [`compute_follow`] and
/// [`build_lr_items`]. The result is what a LALR/SLR table builder reads.
///
/// # Example
/// ```rust
/// # use gramlex_gen::Grammar;
/// # fn main() -> Result<(), gramlex::ParserGeneratorError> {
/// let mut g: Grammar = Grammar::new(["NUMBER", "PLUS"]);
/// g.set_precedence("PLUS", "left", 1)?;
/// g.add_production("expr", ["expr", "PLUS", "expr"], None, None)?;
/// g.add_production("expr", ["NUMBER"], None, None)?;
/// g.set_start()?;
/// g.compute_first();
/// g.compute_follow()?;
/// g.build_lr_items();
///
/// assert!(g.follow()["expr"].contains("$end"));
/// assert!(g.follow()["expr"].contains("PLUS"));
/// assert_eq!(g.production(1).unwrap().lr_items().len(), 4);
/// # Ok(())
/// # }
/// ```
///
/// [`add_production`]: Grammar::add_production
/// [`set_precedence`]: Grammar::set_precedence
/// [`set_start`]: Grammar::set_start
/// [`compute_first`]: Grammar::compute_first
/// [`compute_follow`]: Grammar::compute_follow
/// [`build_lr_items`]: Grammar::build_lr_items
#[derive(Debug, Clone)]
pub struct Grammar<A = ()> {
    terminals: Symtab,
    nonterminals: Symtab,
    start_production: Option<Production<A>>,
    rules: Vec<Production<A>>,
    prod_names: IndexMap<String, Vec<usize>>,
    precedence: IndexMap<String, Precedence>,
    first: SymbolSets,
    follow: SymbolSets,
    start: Option<String>,
}

impl<A> Grammar<A> {
    /// Creates an empty grammar over the given terminal alphabet. The
    /// synthetic `error` terminal is always added.
    pub fn new<I>(terminals: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut terminals: Symtab = terminals.into_iter().collect();
        terminals.add(ERROR);
        Self {
            terminals,
            nonterminals: Symtab::new(),
            start_production: None,
            rules: Vec::new(),
            prod_names: IndexMap::new(),
            precedence: IndexMap::new(),
            first: SymbolSets::new(),
            follow: SymbolSets::new(),
            start: None,
        }
    }

    /// Adds `name -> symbols` and returns the new production's number.
    ///
    /// Without an explicit `precedence` the production inherits the declared
    /// precedence of its rightmost terminal, or `(right, 0)`. With one, the
    /// named precedence must have been declared.
    pub fn add_production<I>(
        &mut self,
        name: &str,
        symbols: I,
        action: Option<A>,
        precedence: Option<&str>,
    ) -> Result<usize, ParserGeneratorError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.terminals.contains(name) {
            return Err(ParserGeneratorError::IllegalRuleName(name.to_owned()));
        }
        let symbols: Vec<String> = symbols.into_iter().map(|s| s.as_ref().into()).collect();

        let prec = match precedence {
            Some(term) => *self
                .precedence
                .get(term)
                .ok_or_else(|| ParserGeneratorError::UnknownPrecedence(term.to_owned()))?,
            None => self
                .rightmost_terminal(&symbols)
                .and_then(|term| self.precedence.get(term))
                .copied()
                .unwrap_or_default(),
        };

        let number = self.rules.len() + 1;
        self.nonterminals.add(name);
        for sym in &symbols {
            if self.terminals.contains(sym) {
                self.terminals.record(sym, number);
            } else {
                self.nonterminals.record(sym, number);
            }
        }

        let p = Production::new(number, name, symbols, prec, action);
        log::debug!("production #{}: {} {}", number, p, prec);
        self.rules.push(p);
        self.prod_names.entry(name.into()).or_default().push(number);
        Ok(number)
    }

    fn rightmost_terminal<'s>(&self, symbols: &'s [String]) -> Option<&'s str> {
        symbols
            .iter()
            .rev()
            .find(|sym| self.terminals.contains(sym))
            .map(|sym| sym.as_str())
    }

    /// Declares the precedence of terminal `term`.
    ///
    /// `assoc` is one of `left`, `right` or `nonassoc`. A terminal's
    /// precedence cannot be redefined.
    pub fn set_precedence(
        &mut self,
        term: &str,
        assoc: &str,
        level: usize,
    ) -> Result<(), ParserGeneratorError> {
        if self.precedence.contains_key(term) {
            return Err(ParserGeneratorError::PrecedenceRedefined(term.to_owned()));
        }
        let assoc: Assoc = assoc.parse()?;
        self.precedence.insert(term.into(), Precedence::new(assoc, level));
        Ok(())
    }

    /// Synthesizes the augmented production `S' -> start`, where `start`
    /// is the left-hand side of the first production added.
    pub fn set_start(&mut self) -> Result<(), ParserGeneratorError> {
        let start = self
            .rules
            .first()
            .ok_or(ParserGeneratorError::EmptyGrammar)?
            .name()
            .to_owned();
        self.start_production = Some(Production::new(
            0,
            AUGMENTED_START,
            vec![start.as_str().into()],
            Precedence::default(),
            None,
        ));
        if !self.nonterminals.uses(&start).is_some_and(|uses| uses.contains(&0)) {
            self.nonterminals.record(&start, 0);
        }
        log::debug!("start symbol: {}", start);
        self.start = Some(start.as_str().into());
        Ok(())
    }

    /// Declared terminals no production uses, `error` excluded.
    pub fn unused_terminals(&self) -> Vec<&str> {
        self.terminals
            .iter()
            .filter(|&(t, uses)| uses.is_empty() && t != ERROR)
            .map(|(t, _)| t)
            .collect()
    }

    /// Nonterminals that no production uses on its right-hand side.
    pub fn unused_productions(&self) -> Vec<&str> {
        self.nonterminals
            .iter()
            .filter(|(_, uses)| uses.is_empty())
            .map(|(n, _)| n)
            .collect()
    }

    /// Nonterminals used on some right-hand side but never defined.
    pub fn undefined_symbols(&self) -> Vec<&str> {
        self.nonterminals
            .names()
            .filter(|n| !self.prod_names.contains_key(*n))
            .collect()
    }

    /// Logs every unused or undefined symbol at `warn` level and returns
    /// how many were found.
    pub fn warn_unused(&self) -> usize {
        let unused_terms = self.unused_terminals();
        for t in &unused_terms {
            log::warn!("token {:?} is unused", t);
        }
        let unused_prods = self.unused_productions();
        for p in &unused_prods {
            log::warn!("production {:?} is unused", p);
        }
        let undefined = self.undefined_symbols();
        for s in &undefined {
            log::warn!("symbol {:?} is used but never defined", s);
        }
        unused_terms.len() + unused_prods.len() + undefined.len()
    }

    /// Builds the LR item chain of every production, the augmented one
    /// included. Replaces any chains built earlier.
    pub fn build_lr_items(&mut self) {
        let prod_names = &self.prod_names;
        for p in self.start_production.iter_mut().chain(self.rules.iter_mut()) {
            let items: Vec<LrItem> = (0..=p.len())
                .map(|i| LrItem::new(p, i, prod_names))
                .collect();
            p.lr_items = items;
        }
    }

    /// The item following `item` in its production's chain, or `None` after
    /// the final item.
    pub fn lr_next(&self, item: &LrItem) -> Option<&LrItem> {
        self.production(item.number())?.lr_item(item.lr_index() + 1)
    }

    /// FIRST of a symbol sequence.
    ///
    /// Collects the FIRST members of each symbol left to right, stopping after
    /// the first symbol that cannot derive the empty string. The result
    /// contains [`EMPTY`] when every symbol can (in particular for an empty
    /// sequence).
    pub fn first_of<S: AsRef<str>>(&self, beta: &[S]) -> IndexSet<String> {
        let mut result = IndexSet::new();
        for x in beta {
            let mut produces_empty = false;
            for f in self.first.get(x.as_ref()).into_iter().flatten() {
                if f.as_str() == EMPTY {
                    produces_empty = true;
                } else {
                    result.insert(f.clone());
                }
            }
            if !produces_empty {
                return result;
            }
        }
        result.insert(EMPTY.into());
        result
    }

    /// Computes FIRST for every terminal, `$end` and every nonterminal.
    pub fn compute_first(&mut self) {
        let mut first = SymbolSets::new();
        for t in self.terminals.names() {
            first.insert(t.into(), IndexSet::from([t.into()]));
        }
        first.insert(END.into(), IndexSet::from([END.into()]));
        for n in self.nonterminals.names() {
            first.insert(n.into(), IndexSet::new());
        }
        self.first = first;

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for n in self.nonterminals.names() {
                let Some(numbers) = self.prod_names.get(n) else {
                    continue;
                };
                for &number in numbers {
                    let fst = self.first_of(self.rules[number - 1].symbols());
                    let set = self.first.entry(n.into()).or_default();
                    for f in fst {
                        if set.insert(f) {
                            changed = true;
                        }
                    }
                }
            }
        }
        log::debug!("FIRST sets converged after {} passes", passes);
    }

    /// Computes FOLLOW for every nonterminal. Requires [`set_start`] and
    /// [`compute_first`].
    ///
    /// [`set_start`]: Grammar::set_start
    /// [`compute_first`]: Grammar::compute_first
    pub fn compute_follow(&mut self) -> Result<(), ParserGeneratorError> {
        let start = self.start.clone().ok_or(ParserGeneratorError::NoStartSymbol)?;
        if self.first.is_empty() {
            return Err(ParserGeneratorError::FirstNotComputed);
        }

        let mut follow: SymbolSets = self
            .nonterminals
            .names()
            .map(|n| (n.into(), IndexSet::new()))
            .collect();
        follow.insert(start, IndexSet::from([END.into()]));

        let mut passes = 0;
        let mut added = true;
        while added {
            added = false;
            passes += 1;
            for p in &self.rules {
                let symbols = p.symbols();
                for (i, b) in symbols.iter().enumerate() {
                    if !self.nonterminals.contains(b) {
                        continue;
                    }
                    let fst = self.first_of(&symbols[i + 1..]);
                    let mut has_empty = false;
                    let follow_b = follow.entry(b.clone()).or_default();
                    for f in fst {
                        if f.as_str() == EMPTY {
                            has_empty = true;
                        } else if follow_b.insert(f) {
                            added = true;
                        }
                    }
                    if has_empty || i == symbols.len() - 1 {
                        let follow_lhs: Vec<String> = follow
                            .get(p.name())
                            .map(|s| s.iter().cloned().collect())
                            .unwrap_or_default();
                        let follow_b = follow.entry(b.clone()).or_default();
                        for f in follow_lhs {
                            if follow_b.insert(f) {
                                added = true;
                            }
                        }
                    }
                }
            }
        }
        log::debug!("FOLLOW sets converged after {} passes", passes);
        self.follow = follow;
        Ok(())
    }

    /// Declared terminals (and `error`) with the productions using them.
    pub fn terminals(&self) -> &Symtab {
        &self.terminals
    }

    /// Nonterminals with the productions using them.
    pub fn nonterminals(&self) -> &Symtab {
        &self.nonterminals
    }

    pub fn is_terminal(&self, sym: &str) -> bool {
        self.terminals.contains(sym)
    }

    pub fn is_nonterminal(&self, sym: &str) -> bool {
        self.nonterminals.contains(sym)
    }

    /// The production numbered `number`; 0 is the augmented production.
    pub fn production(&self, number: usize) -> Option<&Production<A>> {
        match number {
            0 => self.start_production.as_ref(),
            n => self.rules.get(n - 1),
        }
    }

    pub fn production_mut(&mut self, number: usize) -> Option<&mut Production<A>> {
        match number {
            0 => self.start_production.as_mut(),
            n => self.rules.get_mut(n - 1),
        }
    }

    /// All productions in number order, starting with the augmented one once
    /// [`set_start`](Grammar::set_start) has run.
    pub fn productions(&self) -> impl Iterator<Item = &Production<A>> {
        self.start_production.iter().chain(self.rules.iter())
    }

    /// Numbers of the productions defining nonterminal `name`.
    pub fn productions_for(&self, name: &str) -> &[usize] {
        self.prod_names.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn precedence(&self) -> &IndexMap<String, Precedence> {
        &self.precedence
    }

    pub fn first(&self) -> &SymbolSets {
        &self.first
    }

    pub fn follow(&self) -> &SymbolSets {
        &self.follow
    }

    /// The start nonterminal, once [`set_start`](Grammar::set_start) has run.
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }
}
