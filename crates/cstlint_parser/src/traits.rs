//! Parser trait definition.

use cstlint_ast::{AstArena, TokenKind, Tree};

use crate::ParseError;

/// Turns source text of one format into a node tree.
///
/// # Example
///
/// ```rust
/// use cstlint_ast::AstArena;
/// use cstlint_parser::{Parser, PropertyParser};
///
/// let arena = AstArena::new();
/// let tree = PropertyParser::new().parse(&arena, "key=value\n").unwrap();
/// assert!(tree.root().is_some());
/// ```
pub trait Parser {
    type Kind: TokenKind;

    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// File extensions handled by this parser, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses `source` into a tree whose text lives in `arena`.
    ///
    /// An empty source yields a tree without a root.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Tree<'a, Self::Kind>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
