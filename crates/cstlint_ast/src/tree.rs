//! Arena-indexed concrete syntax tree.
//!
//! Nodes live in a `Vec` owned by the [`Tree`] and refer to each other by
//! [`NodeId`]. Every node keeps its parent, first child and both sibling
//! links, so navigation never depends on a traversal's call stack.

use std::cell::Cell;

use crate::arena::AstArena;
use crate::node::{Children, NodeId, NodeRef, PreOrder};
use crate::position::Position;
use crate::token::TokenKind;

pub(crate) struct NodeData<'a, K> {
    pub(crate) kind: K,
    pub(crate) text: &'a str,
    pub(crate) line: Option<u32>,
    pub(crate) column: Option<u32>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) previous_sibling: Option<NodeId>,
    /// `None` until counted; reset on every change to the child chain.
    child_count: Cell<Option<usize>>,
}

/// A concrete syntax tree for one file.
///
/// Text is borrowed from the [`AstArena`] the tree was created with; both
/// are dropped together once the file has been walked.
pub struct Tree<'a, K> {
    arena: &'a AstArena,
    nodes: Vec<NodeData<'a, K>>,
    root: Option<NodeId>,
}

impl<'a, K: TokenKind> Tree<'a, K> {
    pub fn new(arena: &'a AstArena) -> Self {
        Self {
            arena,
            nodes: Vec::new(),
            root: None,
        }
    }

    fn push(&mut self, kind: K, text: &'a str, position: Option<Position>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            text,
            line: position.map(|p| p.line),
            column: position.map(|p| p.column),
            parent: None,
            first_child: None,
            next_sibling: None,
            previous_sibling: None,
            child_count: Cell::new(None),
        });
        id
    }

    /// Creates a synthetic node for a grammar rule.
    ///
    /// Its text is the kind's symbolic name and its position is taken from
    /// its first child.
    pub fn create_imaginary(&mut self, kind: K) -> NodeId {
        self.push(kind, kind.name(), None)
    }

    /// Creates a leaf for a source token.
    pub fn create_token(&mut self, kind: K, text: &str, position: Position) -> NodeId {
        let arena = self.arena;
        self.push(kind, arena.alloc_str(text), Some(position))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub fn root_node(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_, K> {
        NodeRef::new(self, id)
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData<'a, K> {
        &self.nodes[id.index()]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData<'a, K> {
        &mut self.nodes[id.index()]
    }

    // ---- attributes ----

    pub fn kind(&self, id: NodeId) -> K {
        self.data(id).kind
    }

    pub fn set_kind(&mut self, id: NodeId, kind: K) {
        self.data_mut(id).kind = kind;
    }

    pub fn text(&self, id: NodeId) -> &'a str {
        self.data(id).text
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let arena = self.arena;
        self.data_mut(id).text = arena.alloc_str(text);
    }

    /// Line of the node, falling back to its first descendant with a position.
    ///
    /// `None` means neither the node nor its leftmost descendants were ever
    /// given a position.
    pub fn line(&self, id: NodeId) -> Option<u32> {
        let mut current = id;
        loop {
            let data = self.data(current);
            if let Some(line) = data.line {
                return Some(line);
            }
            current = data.first_child?;
        }
    }

    /// Column of the node, resolved like [`Tree::line`].
    pub fn column(&self, id: NodeId) -> Option<u32> {
        let mut current = id;
        loop {
            let data = self.data(current);
            if let Some(column) = data.column {
                return Some(column);
            }
            current = data.first_child?;
        }
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        Some(Position::new(self.line(id)?, self.column(id)?))
    }

    pub fn set_line(&mut self, id: NodeId, line: u32) {
        self.data_mut(id).line = Some(line);
    }

    pub fn set_column(&mut self, id: NodeId, column: u32) {
        self.data_mut(id).column = Some(column);
    }

    // ---- navigation ----

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).next_sibling
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).previous_sibling
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.data(id).first_child.is_some()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.first_child(id).map(|first| self.last_in_chain(first))
    }

    /// Last node of the sibling chain starting at `id`.
    pub fn last_in_chain(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(next) = self.data(current).next_sibling {
            current = next;
        }
        current
    }

    pub fn children(&self, id: NodeId) -> Children<'_, 'a, K> {
        Children::new(self, self.first_child(id))
    }

    /// Pre-order walk of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> PreOrder<'_, 'a, K> {
        PreOrder::new(self, id)
    }

    /// Number of direct children, counted once and cached until the child
    /// chain changes.
    pub fn child_count(&self, id: NodeId) -> usize {
        let cache = &self.data(id).child_count;
        if let Some(count) = cache.get() {
            return count;
        }
        let count = self.children(id).count();
        cache.set(Some(count));
        count
    }

    /// Number of direct children of `kind`. Not cached.
    pub fn child_count_of(&self, id: NodeId, kind: K) -> usize {
        self.children(id)
            .filter(|&child| self.kind(child) == kind)
            .count()
    }

    /// First direct child of `kind`.
    pub fn find_first(&self, id: NodeId, kind: K) -> Option<NodeId> {
        self.children(id).find(|&child| self.kind(child) == kind)
    }

    // ---- structure ----

    fn invalidate_child_count(&self, id: Option<NodeId>) {
        if let Some(id) = id {
            self.data(id).child_count.set(None);
        }
    }

    /// Points every node of the chain starting at `start` to `parent`.
    fn set_parent_chain(&mut self, start: NodeId, parent: Option<NodeId>) {
        let mut current = Some(start);
        while let Some(id) = current {
            let data = self.data_mut(id);
            data.parent = parent;
            current = data.next_sibling;
        }
    }

    /// Replaces the child list of `parent` with the chain starting at `child`.
    pub fn set_first_child(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.invalidate_child_count(Some(parent));
        self.data_mut(parent).first_child = child;
        if let Some(child) = child {
            self.set_parent_chain(child, Some(parent));
            self.data_mut(child).previous_sibling = None;
        }
    }

    /// Links `next` (and whatever follows it) directly after `id`.
    ///
    /// The new chain inherits `id`'s parent when it has one.
    pub fn set_next_sibling(&mut self, id: NodeId, next: Option<NodeId>) {
        let parent = self.data(id).parent;
        self.invalidate_child_count(parent);
        self.data_mut(id).next_sibling = next;
        if let Some(next) = next {
            if parent.is_some() {
                self.set_parent_chain(next, parent);
            }
            self.data_mut(next).previous_sibling = Some(id);
        }
    }

    /// Appends `child`, and any siblings already chained after it, to the
    /// end of `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.invalidate_child_count(Some(parent));
        let last = self.last_child(parent);
        self.set_parent_chain(child, Some(parent));
        self.data_mut(child).previous_sibling = last;
        match last {
            None => self.data_mut(parent).first_child = Some(child),
            Some(last) => self.set_next_sibling(last, Some(child)),
        }
    }

    /// Inserts `sibling` right after `id`, keeping the rest of the chain.
    pub fn add_next_sibling(&mut self, id: NodeId, sibling: NodeId) {
        self.invalidate_child_count(self.data(id).parent);
        if let Some(after) = self.data(id).next_sibling {
            self.set_next_sibling(sibling, Some(after));
        }
        self.set_next_sibling(id, Some(sibling));
    }

    /// Inserts `sibling` right before `id`, becoming the first child when
    /// `id` was.
    pub fn add_previous_sibling(&mut self, id: NodeId, sibling: NodeId) {
        let parent = self.data(id).parent;
        self.invalidate_child_count(parent);
        match self.data(id).previous_sibling {
            Some(before) => self.set_next_sibling(before, Some(sibling)),
            None => {
                if let Some(parent) = parent {
                    self.set_first_child(parent, Some(sibling));
                }
            }
        }
        self.set_next_sibling(sibling, Some(id));
    }

    /// Unlinks `child` from `parent`. Does nothing if `child` belongs elsewhere.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.data(child).parent != Some(parent) {
            return;
        }
        self.invalidate_child_count(Some(parent));
        let next = self.data(child).next_sibling;
        if self.data(parent).first_child == Some(child) {
            self.data_mut(parent).first_child = next;
            if let Some(next) = next {
                self.data_mut(next).previous_sibling = None;
            }
        } else if let Some(before) = self.data(child).previous_sibling {
            self.set_next_sibling(before, next);
        }

        let data = self.data_mut(child);
        data.parent = None;
        data.next_sibling = None;
        data.previous_sibling = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tokens::PropertyToken as T;

    fn texts(tree: &Tree<'_, T>, parent: NodeId) -> Vec<&'static str> {
        tree.children(parent)
            .map(|id| match tree.kind(id) {
                T::Key => "key",
                T::Value => "value",
                T::Text => "text",
                T::Ws => "ws",
                _ => "other",
            })
            .collect()
    }

    fn assert_links(tree: &Tree<'_, T>, parent: NodeId) {
        let children: Vec<_> = tree.children(parent).collect();
        assert_eq!(tree.child_count(parent), children.len());
        for (index, &child) in children.iter().enumerate() {
            assert_eq!(tree.parent(child), Some(parent));
            let expected_previous = index.checked_sub(1).map(|i| children[i]);
            assert_eq!(tree.previous_sibling(child), expected_previous);
        }
    }

    #[test]
    fn test_imaginary_node_text_is_kind_name() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let row = tree.create_imaginary(T::Row);
        assert_eq!(tree.text(row), "ROW");
        assert_eq!(tree.line(row), None);
        assert_eq!(tree.column(row), None);
    }

    #[test]
    fn test_position_falls_back_to_first_child() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let decl = tree.create_imaginary(T::Decl);
        let key = tree.create_imaginary(T::Key);
        let text = tree.create_token(T::Text, "name", Position::new(3, 2));
        tree.add_child(decl, key);
        tree.add_child(key, text);

        assert_eq!(tree.position(decl), Some(Position::new(3, 2)));

        tree.set_line(key, 7);
        assert_eq!(tree.line(decl), Some(7));
        assert_eq!(tree.column(decl), Some(2));
    }

    #[test]
    fn test_add_child_appends_whole_chain() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let parent = tree.create_imaginary(T::ValueText);
        let first = tree.create_token(T::Text, "a", Position::new(1, 0));
        let second = tree.create_token(T::Text, "b", Position::new(1, 1));
        let third = tree.create_token(T::Ws, " ", Position::new(1, 2));
        tree.add_child(parent, first);
        tree.set_next_sibling(second, Some(third));
        tree.add_child(parent, second);

        assert_eq!(texts(&tree, parent), vec!["text", "text", "ws"]);
        assert_eq!(tree.parent(third), Some(parent));
        assert_links(&tree, parent);
    }

    #[test]
    fn test_set_first_child_propagates_parent() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let parent = tree.create_imaginary(T::Decl);
        let nodes: Vec<_> = (0..4)
            .map(|i| tree.create_token(T::Text, "x", Position::new(1, i)))
            .collect();
        for pair in nodes.windows(2) {
            tree.set_next_sibling(pair[0], Some(pair[1]));
        }
        tree.set_first_child(parent, Some(nodes[0]));

        for &node in &nodes {
            assert_eq!(tree.parent(node), Some(parent));
        }
        assert_eq!(tree.child_count(parent), 4);
    }

    #[test]
    fn test_child_count_cache_invalidation() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let parent = tree.create_imaginary(T::Decl);
        let key = tree.create_imaginary(T::Key);
        let value = tree.create_imaginary(T::Value);
        let ws = tree.create_token(T::Ws, " ", Position::new(1, 3));

        assert_eq!(tree.child_count(parent), 0);
        tree.add_child(parent, key);
        assert_eq!(tree.child_count(parent), 1);
        tree.add_child(parent, value);
        assert_eq!(tree.child_count(parent), 2);
        tree.add_next_sibling(key, ws);
        assert_eq!(tree.child_count(parent), 3);
        assert_eq!(texts(&tree, parent), vec!["key", "ws", "value"]);
        tree.remove_child(parent, ws);
        assert_eq!(tree.child_count(parent), 2);
        assert_links(&tree, parent);
    }

    #[test]
    fn test_add_previous_sibling() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let parent = tree.create_imaginary(T::Decl);
        let key = tree.create_imaginary(T::Key);
        let value = tree.create_imaginary(T::Value);
        let ws = tree.create_token(T::Ws, " ", Position::new(1, 0));
        let text = tree.create_token(T::Text, "t", Position::new(1, 1));
        tree.add_child(parent, key);
        tree.add_child(parent, value);

        tree.add_previous_sibling(key, ws);
        assert_eq!(tree.first_child(parent), Some(ws));
        tree.add_previous_sibling(value, text);

        assert_eq!(texts(&tree, parent), vec!["ws", "key", "text", "value"]);
        assert_links(&tree, parent);
    }

    #[test]
    fn test_remove_first_and_last_child() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let parent = tree.create_imaginary(T::Decl);
        let key = tree.create_imaginary(T::Key);
        let ws = tree.create_token(T::Ws, " ", Position::new(1, 0));
        let value = tree.create_imaginary(T::Value);
        for node in [key, ws, value] {
            tree.add_child(parent, node);
        }

        tree.remove_child(parent, key);
        assert_eq!(tree.first_child(parent), Some(ws));
        assert_eq!(tree.previous_sibling(ws), None);
        tree.remove_child(parent, value);
        assert_eq!(tree.last_child(parent), Some(ws));
        assert_eq!(tree.next_sibling(ws), None);
        assert_eq!(tree.parent(value), None);
        assert_links(&tree, parent);
    }

    #[test]
    fn test_remove_child_of_other_parent_is_ignored() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let a = tree.create_imaginary(T::Decl);
        let b = tree.create_imaginary(T::Decl);
        let key = tree.create_imaginary(T::Key);
        tree.add_child(a, key);
        tree.remove_child(b, key);
        assert_eq!(tree.parent(key), Some(a));
        assert_eq!(tree.child_count(a), 1);
    }

    #[test]
    fn test_child_count_of_and_find_first() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let parent = tree.create_imaginary(T::ValueText);
        let kinds = [T::Text, T::Ws, T::Text, T::EscapedCharacter];
        let ids: Vec<_> = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| tree.create_token(kind, "x", Position::new(1, i as u32)))
            .collect();
        for &id in &ids {
            tree.add_child(parent, id);
        }

        assert_eq!(tree.child_count_of(parent, T::Text), 2);
        assert_eq!(tree.child_count_of(parent, T::Key), 0);
        assert_eq!(tree.find_first(parent, T::Ws), Some(ids[1]));
        assert_eq!(tree.find_first(parent, T::Value), None);
    }

    #[test]
    fn test_set_text() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let text = tree.create_token(T::Text, "ab", Position::new(1, 0));
        assert_eq!(tree.text(text), "ab");
        tree.set_text(text, "a");
        assert_eq!(tree.text(text), "a");
    }

    #[test]
    fn test_descendants_pre_order() {
        let arena = AstArena::new();
        let mut tree = Tree::new(&arena);
        let file = tree.create_imaginary(T::File);
        let row = tree.create_imaginary(T::Row);
        let decl = tree.create_imaginary(T::Decl);
        let key = tree.create_imaginary(T::Key);
        let term = tree.create_token(T::Terminator, "\n", Position::new(1, 3));
        tree.add_child(file, row);
        tree.add_child(row, decl);
        tree.add_child(decl, key);
        tree.add_child(row, term);

        let order: Vec<_> = tree.descendants(file).collect();
        assert_eq!(order, vec![file, row, decl, key, term]);
        let order: Vec<_> = tree.descendants(decl).collect();
        assert_eq!(order, vec![decl, key]);
    }
}
