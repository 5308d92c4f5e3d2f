//! How grammar rules map onto tree nodes.

use std::fmt;

use cstlint_ast::TokenKind;

/// What the [`TreeBuilder`](crate::TreeBuilder) does with a rule application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction<K> {
    /// One imaginary node of this kind holding the rule's children.
    Node(K),
    /// Like [`RuleAction::Node`], but adjacent plain-text children are
    /// merged into one node and whitespace counts as plain text.
    MergeText(K),
    /// An escape sequence: marker first, escaped character second. A
    /// multi-character escaped run is split after its first character.
    Escape(K),
    /// No node; the children are attached to the enclosing node directly.
    Flatten,
}

/// A format's rule set as seen by the builder.
pub trait Grammar {
    type Kind: TokenKind;
    type Rule: Copy + fmt::Debug;

    fn action(&self, rule: Self::Rule) -> RuleAction<Self::Kind>;

    /// The plain-text kind that merging and escape splitting act on.
    fn text_kind(&self) -> Self::Kind;

    /// Kinds rewritten to [`Grammar::text_kind`] inside merge rules.
    fn folds_to_text(&self, kind: Self::Kind) -> bool {
        let _ = kind;
        false
    }
}
