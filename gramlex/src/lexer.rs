use crate::cursor::LexerCursor;
use crate::generator::Rule;
use crate::{LexingError, SourcePosition, Token};
use std::iter::FusedIterator;

/// Counters kept by a [`LexerStream`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerStats {
    /// Tokens emitted.
    pub tokens: usize,
    /// Spans consumed by ignore rules.
    pub ignored: usize,
    /// Rule match attempts, ignore and content rules alike.
    pub attempts: usize,
}

/// An immutable set of content rules and ignore rules.
///
/// Built by [`LexerGenerator::build`]. A `Lexer` can be shared freely; every
/// call to [`lex`](Lexer::lex) starts an independent [`LexerStream`].
///
/// [`LexerGenerator::build`]: crate::LexerGenerator::build
#[derive(Debug, Clone)]
pub struct Lexer {
    rules: Vec<Rule>,
    ignore_rules: Vec<Rule>,
}

impl Lexer {
    pub fn new(rules: Vec<Rule>, ignore_rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ignore_rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn ignore_rules(&self) -> &[Rule] {
        &self.ignore_rules
    }

    /// Starts a fresh stream over `input` at offset 0.
    pub fn lex<'a>(&'a self, input: &'a str) -> LexerStream<'a> {
        LexerStream {
            lexer: self,
            input,
            cursor: LexerCursor::new(),
            stats: LexerStats::default(),
        }
    }
}

/// A single-pass cursor producing tokens from one input string.
///
/// Use [`try_next`](LexerStream::try_next) directly, or iterate: the
/// iterator yields `Result<Token, LexingError>` and ends at end of input.
/// A failed pull does not advance the stream, so pulling again reports the
/// same error.
#[derive(Debug, Clone)]
pub struct LexerStream<'a> {
    lexer: &'a Lexer,
    input: &'a str,
    cursor: LexerCursor,
    stats: LexerStats,
}

impl<'a> LexerStream<'a> {
    /// Produces the next token, `Ok(None)` at end of input, or a
    /// [`LexingError`] when no content rule matches.
    pub fn try_next(&mut self) -> Result<Option<Token>, LexingError> {
        loop {
            if self.cursor.idx >= self.input.len() {
                return Ok(None);
            }
            // Zero-width ignore matches would never advance; skip them.
            let mut skipped = false;
            for rule in &self.lexer.ignore_rules {
                self.stats.attempts += 1;
                match rule.matches(self.input, self.cursor.idx) {
                    Some(m) if !m.is_empty() => {
                        log::trace!(
                            "IGNORED: {:?} at {}..{}",
                            &self.input[m.start..m.end],
                            m.start,
                            m.end
                        );
                        self.cursor.advance(self.input, m.end);
                        self.stats.ignored += 1;
                        skipped = true;
                        break;
                    }
                    _ => (),
                }
            }
            if !skipped {
                break;
            }
        }

        for rule in &self.lexer.rules {
            self.stats.attempts += 1;
            if let Some(m) = rule.matches(self.input, self.cursor.idx) {
                // anchored, so the match starts at the cursor
                let (index, line) = (self.cursor.char_idx, self.cursor.line);
                self.cursor.column = self.cursor.advance(self.input, m.end);
                let position = SourcePosition::new(index, line, self.cursor.column);
                let text = &self.input[m.start..m.end];
                log::trace!("MATCHED: Rule: {:?}, Text: {:?}, Position: {}", rule.name(), text, position);
                self.stats.tokens += 1;
                return Ok(Some(Token::new(rule.name(), text, Some(position))));
            }
        }

        Err(LexingError::new("", self.cursor.position()))
    }

    /// Byte offset of the next unread character. Token positions count
    /// characters instead.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor.idx
    }

    pub fn stats(&self) -> LexerStats {
        self.stats.clone()
    }
}

impl Iterator for LexerStream<'_> {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

// Once the cursor reaches the end of input it stays there.
impl FusedIterator for LexerStream<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexerGenerator, RuleFlags};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn calc_lexer(ignore_space: bool) -> Lexer {
        let mut lg = LexerGenerator::new();
        lg.add("NUMBER", r"\d+").unwrap();
        lg.add("PLUS", r"\+").unwrap();
        if ignore_space {
            lg.ignore(r"\s+").unwrap();
        }
        lg.build()
    }

    fn pair(t: &Token) -> (&str, &str) {
        (t.kind(), t.text())
    }

    #[test]
    fn simple() {
        init_logger();
        let lexer = calc_lexer(false);
        let mut stream = lexer.lex("2+3");
        let t = stream.try_next().unwrap().unwrap();
        assert_eq!(pair(&t), ("NUMBER", "2"));
        let t = stream.try_next().unwrap().unwrap();
        assert_eq!(pair(&t), ("PLUS", "+"));
        let t = stream.try_next().unwrap().unwrap();
        assert_eq!(pair(&t), ("NUMBER", "3"));
        assert_eq!(t.position().unwrap().index, 2);
        assert_eq!(stream.try_next(), Ok(None));
        assert!(stream.next().is_none());
    }

    #[test]
    fn ignore() {
        init_logger();
        let lexer = calc_lexer(true);
        let toks: Vec<Token> = lexer.lex("2 + 3").collect::<Result<_, _>>().unwrap();
        let pairs: Vec<_> = toks.iter().map(pair).collect();
        assert_eq!(pairs, [("NUMBER", "2"), ("PLUS", "+"), ("NUMBER", "3")]);
        assert_eq!(toks[2].position().unwrap().index, 4);
    }

    #[test]
    fn position() {
        let lexer = calc_lexer(true);

        let cols: Vec<_> = lexer
            .lex("2 + 3")
            .map(|t| t.unwrap().position().unwrap())
            .map(|p| (p.line, p.column))
            .collect();
        assert_eq!(cols, [(1, 1), (1, 3), (1, 5)]);

        let cols: Vec<_> = lexer
            .lex("2 +\n    37")
            .map(|t| t.unwrap().position().unwrap())
            .map(|p| (p.line, p.column))
            .collect();
        assert_eq!(cols, [(1, 1), (1, 3), (2, 5)]);
    }

    #[test]
    fn newline_position() {
        let mut lg = LexerGenerator::new();
        lg.add("NEWLINE", r"\n").unwrap();
        lg.add("SPACE", r" ").unwrap();
        let lexer = lg.build();

        let positions: Vec<_> = lexer
            .lex(" \n ")
            .map(|t| t.unwrap().position().unwrap())
            .map(|p| (p.line, p.column))
            .collect();
        assert_eq!(positions, [(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn regex_flags() {
        let mut lg = LexerGenerator::new();
        lg.add_with_flags("ALL", r".*", RuleFlags::new().dot_matches_new_line(true))
            .unwrap();
        let lexer = lg.build();

        let mut stream = lexer.lex("test\ndotall");
        let t = stream.try_next().unwrap().unwrap();
        let pos = t.position().unwrap();
        assert_eq!((pos.line, pos.column), (1, 1));
        assert_eq!(t.text(), "test\ndotall");
        assert_eq!(stream.try_next(), Ok(None));
    }

    #[test]
    fn regex_flags_ignore() {
        let dotall = RuleFlags::new().dot_matches_new_line(true);
        let mut lg = LexerGenerator::new();
        lg.add_with_flags("ALL", r".*", dotall).unwrap();
        lg.ignore_with_flags(r".*", dotall).unwrap();
        let lexer = lg.build();

        let mut stream = lexer.lex("test\ndotall");
        assert_eq!(stream.try_next(), Ok(None));
        assert_eq!(stream.stats().ignored, 1);
    }

    #[test]
    fn ignore_many() {
        let mut lg = LexerGenerator::new();
        lg.ignore(r"\s").unwrap();
        let lexer = lg.build();

        let input = " ".repeat(2000);
        let mut stream = lexer.lex(&input);
        assert_eq!(stream.by_ref().count(), 0);
        assert_eq!(stream.stats().ignored, 2000);
    }

    #[test]
    fn zero_width_ignore_terminates() {
        let mut lg = LexerGenerator::new();
        lg.add("NUMBER", r"\d+").unwrap();
        lg.ignore(r"\s*").unwrap();
        let lexer = lg.build();

        let texts: Vec<_> = lexer
            .lex("1  2")
            .map(|t| t.unwrap().text().to_owned())
            .collect();
        assert_eq!(texts, ["1", "2"]);
    }

    #[test]
    fn first_registered_rule_wins() {
        let mut lg = LexerGenerator::new();
        lg.add("IDENT", r"[a-z]+").unwrap();
        lg.add("IF", r"if").unwrap();
        let lexer = lg.build();
        let t = lexer.lex("if").next().unwrap().unwrap();
        assert_eq!(t.kind(), "IDENT");
    }

    #[test]
    fn error() {
        let lexer = calc_lexer(false);
        let mut stream = lexer.lex("fail");
        let err = stream.try_next().unwrap_err();
        assert_eq!(err.position, SourcePosition::new(0, 1, 1));
        assert!(err.message.is_empty());
        // the stream does not move past the failure
        assert_eq!(stream.try_next().unwrap_err(), err);
    }

    #[test]
    fn error_line_number() {
        let mut lg = LexerGenerator::new();
        lg.add("NEW_LINE", r"\n").unwrap();
        let lexer = lg.build();

        let mut stream = lexer.lex("\nfail");
        stream.try_next().unwrap();
        let err = stream.try_next().unwrap_err();
        assert_eq!(err.position.line, 2);
        assert_eq!(err.position.index, 1);
    }

    #[test]
    fn error_column_is_that_of_last_token() {
        let lexer = calc_lexer(false);
        let mut stream = lexer.lex("1+2+fail");
        for _ in 0..4 {
            stream.try_next().unwrap();
        }
        let err = stream.try_next().unwrap_err();
        assert_eq!(err.position.column, 4);
        assert_eq!(err.position.index, 4);
    }

    #[test]
    fn multi_line_token_is_positioned_by_its_start() {
        let mut lg = LexerGenerator::new();
        lg.add("WORD", r"[a-z]+").unwrap();
        lg.add("BLOCK", r"\{[^}]*\}").unwrap();
        lg.ignore(r"\s+").unwrap();
        let lexer = lg.build();

        let toks: Vec<Token> = lexer
            .lex("ab\n  {x\ny}\nzz")
            .collect::<Result<_, _>>()
            .unwrap();
        let pos: Vec<_> = toks
            .iter()
            .map(|t| t.position().unwrap())
            .map(|p| (p.index, p.line, p.column))
            .collect();
        assert_eq!(pos, [(0, 1, 1), (5, 2, 3), (11, 4, 1)]);
    }

    #[test]
    fn lexer_is_reusable_and_shareable() {
        let lexer = calc_lexer(true);
        std::thread::scope(|s| {
            let a = s.spawn(|| lexer.lex("1 + 2").count());
            let b = s.spawn(|| lexer.lex("3").count());
            assert_eq!(a.join().unwrap(), 3);
            assert_eq!(b.join().unwrap(), 1);
        });
        assert_eq!(lexer.lex("4+4").count(), 3);
    }

    #[test]
    fn stream_stats() -> anyhow::Result<()> {
        init_logger();
        let lexer = calc_lexer(true);
        let mut stream = lexer.lex("1 + 2");
        let mut kinds = Vec::new();
        while let Some(tok) = stream.try_next()? {
            kinds.push(tok.kind().to_string());
        }
        assert_eq!(kinds, ["NUMBER", "PLUS", "NUMBER"]);
        assert_eq!(stream.offset(), 5);
        assert_eq!(
            stream.stats(),
            LexerStats {
                tokens: 3,
                ignored: 2,
                attempts: 9,
            }
        );
        assert!(stream.next().is_none());
        Ok(())
    }

    #[test]
    fn positions_count_characters_not_bytes() {
        let mut lg = LexerGenerator::new();
        lg.add("WORD", r"\w+").unwrap();
        lg.add("PLUS", r"\+").unwrap();
        lg.ignore(r"\s+").unwrap();
        let lexer = lg.build();

        let pos: Vec<_> = lexer
            .lex("héllo + x")
            .map(|t| t.unwrap().position().unwrap())
            .map(|p| (p.index, p.line, p.column))
            .collect();
        assert_eq!(pos, [(0, 1, 1), (6, 1, 7), (8, 1, 9)]);

        let pos: Vec<_> = lexer
            .lex("ünï\n  ö")
            .map(|t| t.unwrap().position().unwrap())
            .map(|p| (p.index, p.line, p.column))
            .collect();
        assert_eq!(pos, [(0, 1, 1), (6, 2, 3)]);
    }

    #[test]
    fn error_position_counts_characters() {
        let lexer = calc_lexer(true);
        let err = lexer.lex("1 + 2 € 3").find_map(Result::err).unwrap();
        assert_eq!(err.position(), SourcePosition::new(6, 1, 5));
    }
}
