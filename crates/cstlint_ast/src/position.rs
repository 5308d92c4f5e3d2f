//! Source positions.

use serde::{Deserialize, Serialize};

/// A position in source text.
///
/// Lines are 1-indexed, columns are 0-indexed character offsets within the
/// line (not bytes, not tab-expanded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position one character to the right on the same line.
    #[inline]
    pub const fn next_column(self) -> Self {
        Self {
            line: self.line,
            column: self.column + 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_order() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(3, 1) < Position::new(3, 2));
    }

    #[test]
    fn test_next_column() {
        assert_eq!(Position::new(4, 7).next_column(), Position::new(4, 8));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 0).to_string(), "12:0");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Position::new(2, 5)).unwrap();
        assert_eq!(json, r#"{"line":2,"column":5}"#);
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Position::new(2, 5));
    }
}
