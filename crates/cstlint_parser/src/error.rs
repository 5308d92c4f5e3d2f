//! Parse error types.

use cstlint_ast::Position;
use thiserror::Error;

/// Errors that can occur while turning source text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source text does not match the grammar.
    #[error("{line}:{column}: {message}")]
    Syntax {
        /// Line of the offending input (1-indexed).
        line: u32,
        /// Column of the offending input (0-indexed).
        column: u32,
        message: String,
    },

    /// The parse tree handed to the builder was malformed.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a syntax error at `position`.
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::Syntax {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Where the error occurred, if it points into the source.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { line, column, .. } => Some(Position::new(*line, *column)),
            Self::Internal(_) => None,
        }
    }
}
