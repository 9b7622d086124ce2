//! Lexer rule registration.
//!
//! A [`LexerGenerator`] collects two ordered lists of rules: content rules,
//! whose matches become tokens, and ignore rules, whose matches are consumed
//! silently. Patterns are compiled when they are registered; [`build`]
//! freezes both lists into a reusable [`Lexer`].
//!
//! Registration order is significant. At a given offset the first
//! registered rule that matches wins, and ignore rules are always tried
//! before content rules.
//!
//! [`build`]: LexerGenerator::build

use crate::{Lexer, ParserGeneratorError};
use regex_automata::{Anchored, Input, Span, meta::Regex, util::syntax};
use smartstring::alias::String;

/// Pattern compilation flags for a single rule.
///
/// All flags are off by default except `unicode`.
///
/// ```rust
/// # use gramlex::RuleFlags;
/// let flags = RuleFlags::new().dot_matches_new_line(true).case_insensitive(true);
/// assert!(flags.dot_matches_new_line);
/// assert!(flags.unicode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleFlags {
    /// `(?i)`: letters match both cases.
    pub case_insensitive: bool,
    /// `(?m)`: `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `(?s)`: `.` matches `\n`.
    pub dot_matches_new_line: bool,
    /// `(?x)`: whitespace and `#` comments in the pattern are ignored.
    pub ignore_whitespace: bool,
    /// `(?u)`: Unicode-aware classes such as `\d` and `\w`.
    pub unicode: bool,
}

impl RuleFlags {
    pub const fn new() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            unicode: true,
        }
    }

    pub const fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    pub const fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    pub const fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    pub const fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    pub const fn unicode(mut self, yes: bool) -> Self {
        self.unicode = yes;
        self
    }

    fn syntax_config(&self) -> syntax::Config {
        syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .unicode(self.unicode)
    }
}

impl Default for RuleFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, compiled pattern. Ignore rules have an empty name.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    regex: Regex,
}

impl Rule {
    pub fn new(name: &str, pattern: &str, flags: RuleFlags) -> Result<Self, ParserGeneratorError> {
        let regex = Regex::builder()
            .syntax(flags.syntax_config())
            .build(pattern)
            .map_err(|e| ParserGeneratorError::InvalidPattern {
                pattern: pattern.into(),
                message: e.to_string(),
            })?;
        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Matches the pattern anchored at byte offset `pos` of `input`.
    ///
    /// Look-around assertions such as `\b` see the text before `pos`.
    /// Returns `None` when `pos` is past the end of `input`.
    pub fn matches(&self, input: &str, pos: usize) -> Option<Span> {
        if pos > input.len() {
            return None;
        }
        let search = Input::new(input).range(pos..).anchored(Anchored::Yes);
        self.regex.search(&search).map(|m| m.span())
    }
}

/// Builder for a [`Lexer`].
///
/// ```rust
/// # use gramlex::LexerGenerator;
/// # fn main() -> Result<(), gramlex::ParserGeneratorError> {
/// let mut lg = LexerGenerator::new();
/// lg.add("NUMBER", r"\d+")?;
/// lg.add("ADD", r"\+")?;
/// lg.ignore(r"\s+")?;
/// let lexer = lg.build();
///
/// let kinds: Vec<_> = lexer
///     .lex("1 + 1")
///     .map(|t| t.map(|t| t.kind().to_string()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(kinds, ["NUMBER", "ADD", "NUMBER"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexerGenerator {
    rules: Vec<Rule>,
    ignore_rules: Vec<Rule>,
}

impl LexerGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a content rule. In case of ambiguity, the first rule added wins.
    pub fn add(&mut self, name: &str, pattern: &str) -> Result<&mut Self, ParserGeneratorError> {
        self.add_with_flags(name, pattern, RuleFlags::default())
    }

    pub fn add_with_flags(
        &mut self,
        name: &str,
        pattern: &str,
        flags: RuleFlags,
    ) -> Result<&mut Self, ParserGeneratorError> {
        self.rules.push(Rule::new(name, pattern, flags)?);
        log::debug!("lexer rule #{} {:?}: {:?}", self.rules.len() - 1, name, pattern);
        Ok(self)
    }

    /// Adds a rule whose matches are consumed and never emitted.
    /// Ignore rules are tried before content rules.
    pub fn ignore(&mut self, pattern: &str) -> Result<&mut Self, ParserGeneratorError> {
        self.ignore_with_flags(pattern, RuleFlags::default())
    }

    pub fn ignore_with_flags(
        &mut self,
        pattern: &str,
        flags: RuleFlags,
    ) -> Result<&mut Self, ParserGeneratorError> {
        self.ignore_rules.push(Rule::new("", pattern, flags)?);
        log::debug!("ignore rule #{}: {:?}", self.ignore_rules.len() - 1, pattern);
        Ok(self)
    }

    /// Freezes the registered rules into a [`Lexer`].
    ///
    /// The generator keeps its rules; later registrations do not affect
    /// lexers that were already built.
    pub fn build(&self) -> Lexer {
        Lexer::new(self.rules.clone(), self.ignore_rules.clone())
    }
}
