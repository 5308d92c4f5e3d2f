//! Character cursor shared by the hand-written scanners.

use cstlint_ast::Position;

/// Walks source text one `char` at a time while tracking line and column.
///
/// `\n`, `\r\n` and a lone `\r` each end a line.
pub(crate) struct Cursor<'s> {
    source: &'s str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'s> Cursor<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    pub(crate) fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    fn rest(&self) -> &'s str {
        &self.source[self.offset..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn peek_second(&self) -> Option<char> {
        self.peek_nth(1)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        let ends_line = c == '\n' || (c == '\r' && self.peek() != Some('\n'));
        if ends_line {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes `count` characters.
    pub(crate) fn bump_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consumes characters while `predicate` holds.
    pub(crate) fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.bump();
        }
    }

    /// Consumes up to and including `terminator`. Returns `false` if the
    /// input ran out first.
    pub(crate) fn eat_through(&mut self, terminator: &str) -> bool {
        while !self.is_eof() {
            if self.starts_with(terminator) {
                self.bump_n(terminator.chars().count());
                return true;
            }
            self.bump();
        }
        false
    }

    /// Source text between `start` and the current offset.
    pub(crate) fn slice_from(&self, start: usize) -> &'s str {
        &self.source[start..self.offset]
    }
}
