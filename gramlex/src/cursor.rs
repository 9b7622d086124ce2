//! Source positions and the position bookkeeping used by [`LexerStream`].
//!
//! [`LexerStream`]: crate::LexerStream

use std::fmt;

/// A location in source text.
///
/// `index` is the character offset into the input; `line` and `column` are
/// 1-based (human-facing) and also counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    /// Character offset of the first character.
    pub index: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl SourcePosition {
    /// Creates a new `SourcePosition`.
    #[inline]
    pub const fn new(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Tracks the current offset, line and column of a stream over `&str` input.
///
/// `idx` is the byte offset handed to the regex engine; `char_idx` is the
/// same point counted in characters. `line` follows every consumed span.
/// `column` is only stored when the caller says so (content matches);
/// ignored spans leave it untouched.
#[derive(Debug, Clone)]
pub struct LexerCursor {
    pub idx: usize,
    pub char_idx: usize,
    pub line: usize,
    pub column: usize,
    /// Character offset of the first character of the current line.
    line_start: usize,
}

impl LexerCursor {
    pub fn new() -> Self {
        Self {
            idx: 0,
            char_idx: 0,
            line: 1,
            column: 1,
            line_start: 0,
        }
    }

    /// Consume `input[idx..end]` and return the column it started at.
    ///
    /// `end` must be a char boundary at or after `idx`.
    pub fn advance(&mut self, input: &str, end: usize) -> usize {
        let column = self.char_idx - self.line_start + 1;
        for ch in input[self.idx..end].chars() {
            self.char_idx += 1;
            if ch == '\n' {
                self.line += 1;
                self.line_start = self.char_idx;
            }
        }
        self.idx = end;
        column
    }

    /// Snapshot of the bookkeeping at the current offset.
    #[inline]
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.char_idx, self.line, self.column)
    }
}

impl Default for LexerCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cursor_starts_at_one_one() {
        let c = LexerCursor::new();
        assert_eq!(c.position(), SourcePosition::new(0, 1, 1));
    }

    #[test]
    fn advance_on_first_line() {
        let mut c = LexerCursor::new();
        let input = "ab cd";
        assert_eq!(c.advance(input, 2), 1);
        assert_eq!(c.advance(input, 3), 3);
        assert_eq!(c.advance(input, 5), 4);
        assert_eq!(c.idx, 5);
        assert_eq!(c.line, 1);
    }

    #[test]
    fn advance_counts_newlines_in_span() {
        let mut c = LexerCursor::new();
        let input = "a\n\nb";
        assert_eq!(c.advance(input, 3), 1);
        assert_eq!(c.line, 3);
        assert_eq!(c.advance(input, 4), 1);
        assert_eq!(c.line, 3);
    }

    #[test]
    fn column_is_measured_from_start_of_span() {
        let mut c = LexerCursor::new();
        let input = "x\n  yy\nzz";
        c.advance(input, 4);
        // `yy\nzz` starts two characters into line 2
        assert_eq!(c.advance(input, 9), 3);
        assert_eq!(c.line, 3);
    }

    #[test]
    fn offsets_and_columns_count_characters() {
        let mut c = LexerCursor::new();
        let input = "日本 héllo\nñx";
        // "日本 " is 7 bytes, 3 characters
        c.advance(input, 7);
        assert_eq!(c.char_idx, 3);
        assert_eq!(c.advance(input, 13), 4);
        // consume the newline and "ñ"
        c.advance(input, 16);
        assert_eq!(c.advance(input, 17), 2);
        assert_eq!(c.idx, 17);
        assert_eq!(c.char_idx, 11);
        assert_eq!(c.line, 2);
    }

    #[test]
    fn advance_does_not_store_column() {
        let mut c = LexerCursor::new();
        c.advance("  x", 2);
        assert_eq!(c.column, 1);
        assert_eq!(c.position(), SourcePosition::new(2, 1, 1));
    }

    #[test]
    fn display_is_line_colon_column() {
        assert_eq!(SourcePosition::new(7, 3, 4).to_string(), "3:4");
    }
}
