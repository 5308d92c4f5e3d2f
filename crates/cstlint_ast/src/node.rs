//! Node handles.

use std::fmt;

use crate::position::Position;
use crate::token::TokenKind;
use crate::tree::Tree;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Read-only view of one node, handed to checks during a walk.
pub struct NodeRef<'t, K> {
    tree: &'t Tree<'t, K>,
    id: NodeId,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<'t, K: TokenKind> NodeRef<'t, K> {
    pub(crate) fn new(tree: &'t Tree<'t, K>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.tree, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree<'t, K> {
        self.tree
    }

    pub fn kind(&self) -> K {
        self.tree.kind(self.id)
    }

    pub fn text(&self) -> &'t str {
        self.tree.text(self.id)
    }

    pub fn line(&self) -> Option<u32> {
        self.tree.line(self.id)
    }

    pub fn column(&self) -> Option<u32> {
        self.tree.column(self.id)
    }

    pub fn position(&self) -> Option<Position> {
        self.tree.position(self.id)
    }

    pub fn parent(&self) -> Option<Self> {
        self.wrap(self.tree.parent(self.id))
    }

    pub fn first_child(&self) -> Option<Self> {
        self.wrap(self.tree.first_child(self.id))
    }

    pub fn last_child(&self) -> Option<Self> {
        self.wrap(self.tree.last_child(self.id))
    }

    pub fn next_sibling(&self) -> Option<Self> {
        self.wrap(self.tree.next_sibling(self.id))
    }

    pub fn previous_sibling(&self) -> Option<Self> {
        self.wrap(self.tree.previous_sibling(self.id))
    }

    pub fn has_children(&self) -> bool {
        self.tree.has_children(self.id)
    }

    pub fn child_count(&self) -> usize {
        self.tree.child_count(self.id)
    }

    pub fn child_count_of(&self, kind: K) -> usize {
        self.tree.child_count_of(self.id, kind)
    }

    pub fn find_first(&self, kind: K) -> Option<Self> {
        self.wrap(self.tree.find_first(self.id, kind))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t, K>> + 't {
        let tree = self.tree;
        tree.children(self.id).map(move |id| NodeRef::new(tree, id))
    }

    /// This node and everything below it, in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'t, K>> + 't {
        let tree = self.tree;
        tree.descendants(self.id).map(move |id| NodeRef::new(tree, id))
    }

    /// Concatenated text of every leaf below this node, in source order.
    ///
    /// For a leaf this is its own text.
    pub fn leaf_text(&self) -> String {
        self.tree
            .descendants(self.id)
            .filter(|&id| !self.tree.has_children(id))
            .map(|id| self.tree.text(id))
            .collect()
    }
}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.tree, other.tree)
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: TokenKind> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind().name(), self.text())?;
        match self.position() {
            Some(position) => write!(f, " @ {position}"),
            None => Ok(()),
        }
    }
}

/// Direct children of a node, following `next_sibling` links.
pub struct Children<'t, 'a, K> {
    tree: &'t Tree<'a, K>,
    next: Option<NodeId>,
}

impl<'t, 'a, K> Children<'t, 'a, K> {
    pub(crate) fn new(tree: &'t Tree<'a, K>, first: Option<NodeId>) -> Self {
        Self { tree, next: first }
    }
}

impl<K: TokenKind> Iterator for Children<'_, '_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Pre-order walk of a subtree without recursion or an explicit stack.
pub struct PreOrder<'t, 'a, K> {
    tree: &'t Tree<'a, K>,
    start: NodeId,
    next: Option<NodeId>,
}

impl<'t, 'a, K> PreOrder<'t, 'a, K> {
    pub(crate) fn new(tree: &'t Tree<'a, K>, start: NodeId) -> Self {
        Self {
            tree,
            start,
            next: Some(start),
        }
    }
}

impl<K: TokenKind> Iterator for PreOrder<'_, '_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = match self.tree.first_child(current) {
            Some(child) => Some(child),
            None => {
                let mut node = current;
                loop {
                    if node == self.start {
                        break None;
                    }
                    if let Some(sibling) = self.tree.next_sibling(node) {
                        break Some(sibling);
                    }
                    match self.tree.parent(node) {
                        Some(parent) => node = parent,
                        None => break None,
                    }
                }
            }
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tokens::XmlToken as T;
    use crate::{AstArena, Position, Tree};

    #[test]
    fn test_node_ref_navigation() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let attribute = tree.create_imaginary(T::Attribute);
        let name = tree.create_token(T::Name, "id", Position::new(2, 5));
        let equals = tree.create_token(T::Equals, "=", Position::new(2, 7));
        let string = tree.create_token(T::String, "\"a\"", Position::new(2, 8));
        for id in [name, equals, string] {
            tree.add_child(attribute, id);
        }

        let node = tree.node(attribute);
        assert_eq!(node.child_count(), 3);
        assert_eq!(node.position(), Some(Position::new(2, 5)));
        assert_eq!(node.first_child().map(|n| n.text()), Some("id"));
        assert_eq!(node.last_child().map(|n| n.kind()), Some(T::String));
        assert_eq!(node.find_first(T::Equals).and_then(|n| n.next_sibling()), Some(tree.node(string)));
        assert_eq!(tree.node(equals).parent(), Some(node));
        assert_eq!(tree.node(name).previous_sibling(), None);
        assert_eq!(node.leaf_text(), "id=\"a\"");
        assert_eq!(tree.node(name).leaf_text(), "id");
        let kinds: Vec<_> = node.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![T::Name, T::Equals, T::String]);
    }

    #[test]
    fn test_debug_format() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let name = tree.create_token(T::Name, "root", Position::new(1, 1));
        let element = tree.create_imaginary(T::Element);
        insta::assert_snapshot!(format!("{:?}", tree.node(name)), @r#"NAME "root" @ 1:1"#);
        insta::assert_snapshot!(format!("{:?}", tree.node(element)), @r#"ELEMENT "ELEMENT""#);
    }
}
