//! Running indentation state shared by the per-format indentation checks.

use cstlint_ast::{NodeRef, TokenKind};

use crate::check::CheckContext;

pub const MSG_KEY: &str = "indentation.error";

pub const DEFAULT_INDENTATION: u32 = 4;

/// Expected column of the next line-leading node, moved up and down as the
/// walk enters and leaves indenting nodes.
#[derive(Debug, Clone)]
pub struct IndentationTracker {
    strict: bool,
    expected: i64,
    last_line: Option<u32>,
}

impl IndentationTracker {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            expected: 0,
            last_line: None,
        }
    }

    pub fn reset(&mut self) {
        self.expected = 0;
        self.last_line = None;
    }

    pub fn expected(&self) -> i64 {
        self.expected
    }

    pub fn increase(&mut self, amount: u32) {
        self.expected += i64::from(amount);
    }

    pub fn decrease(&mut self, amount: u32) {
        self.expected -= i64::from(amount);
    }

    /// True when `line` differs from the last line a node was checked on.
    pub fn is_new_line(&self, line: Option<u32>) -> bool {
        self.last_line != line
    }

    pub fn mark_line(&mut self, line: Option<u32>) {
        self.last_line = line;
    }

    /// Compares the tab-expanded column of `node` with the expected column.
    ///
    /// Strict mode wants the exact column, lenient mode only rejects nodes
    /// to the left of it.
    pub fn verify<K: TokenKind>(&self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, K>) {
        let actual = ctx.expanded_column(node) as i64;
        let misplaced = if self.strict {
            actual != self.expected
        } else {
            actual < self.expected
        };
        if misplaced {
            ctx.log(node, MSG_KEY, [actual, self.expected]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_and_decrease_restore() {
        let mut tracker = IndentationTracker::new(false);
        tracker.increase(4);
        tracker.increase(2);
        assert_eq!(tracker.expected(), 6);
        tracker.decrease(2);
        tracker.decrease(4);
        assert_eq!(tracker.expected(), 0);
    }

    #[test]
    fn test_line_tracking() {
        let mut tracker = IndentationTracker::new(true);
        assert!(tracker.is_new_line(Some(1)));
        tracker.mark_line(Some(1));
        assert!(!tracker.is_new_line(Some(1)));
        assert!(tracker.is_new_line(Some(2)));
        tracker.reset();
        assert!(tracker.is_new_line(Some(1)));
    }
}
