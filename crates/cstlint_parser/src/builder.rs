//! Converts a [`ParseTree`] into a [`Tree`].

use std::slice;

use cstlint_ast::{AstArena, NodeId, TokenKind, Tree};
use tracing::trace;

use crate::ParseError;
use crate::grammar::{Grammar, RuleAction};
use crate::parse_tree::{ParseTree, Token};

/// Builds node trees for one grammar.
///
/// Rule applications become imaginary nodes, terminals become leaves, and
/// end-of-input markers are dropped. The conversion uses an explicit stack,
/// so nesting depth is bounded only by memory.
pub struct TreeBuilder<'g, G> {
    grammar: &'g G,
}

/// A node under construction.
struct Open {
    id: NodeId,
    merge: bool,
    escape: bool,
    /// Last node of the child chain, where the next child is linked.
    tail: Option<NodeId>,
    /// Head of the most recently attached chain; merge candidate.
    last_attached: Option<NodeId>,
    /// Text of `last_attached` while a run is being merged into it. Written
    /// to the tree once, when the run ends.
    merged: Option<String>,
}

impl Open {
    fn flush(&mut self, tree: &mut Tree<'_, impl TokenKind>) {
        if let (Some(text), Some(node)) = (self.merged.take(), self.last_attached) {
            tree.set_text(node, &text);
        }
    }
}

enum Slot {
    Node(Open),
    /// Flattened rule; children go to the frame at this stack index.
    Flatten(usize),
}

struct Frame<'p, 's, K, R> {
    children: slice::Iter<'p, ParseTree<'s, K, R>>,
    slot: Slot,
}

impl<'g, G: Grammar> TreeBuilder<'g, G> {
    pub fn new(grammar: &'g G) -> Self {
        Self { grammar }
    }

    /// Builds the tree. A root with no content besides end-of-input yields
    /// a tree without a root.
    pub fn build<'a>(
        &self,
        arena: &'a AstArena,
        parse_tree: &ParseTree<'_, G::Kind, G::Rule>,
    ) -> Result<Tree<'a, G::Kind>, ParseError> {
        let mut tree = Tree::new(arena);
        let (rule, children) = match parse_tree {
            ParseTree::Eof(_) => return Ok(tree),
            ParseTree::Terminal(token) => {
                let leaf = tree.create_token(token.kind, token.text, token.position);
                tree.set_root(Some(leaf));
                return Ok(tree);
            }
            ParseTree::Rule { rule, children } => (*rule, children),
        };

        let root = self
            .open(&mut tree, rule)
            .ok_or_else(|| ParseError::internal(format!("root rule {rule:?} cannot be flattened")))?;
        let mut stack = vec![Frame {
            children: children.iter(),
            slot: Slot::Node(root),
        }];
        let mut finished_root = None;

        while let Some(depth) = stack.len().checked_sub(1) {
            let next = stack[depth].children.next();
            match next {
                Some(ParseTree::Eof(_)) => {}
                Some(ParseTree::Terminal(token)) => {
                    let target = Self::target_of(&mut stack, depth)?;
                    self.attach_token(&mut tree, target, token);
                }
                Some(ParseTree::Rule { rule, children }) => {
                    let slot = match self.open(&mut tree, *rule) {
                        Some(open) => Slot::Node(open),
                        None => Slot::Flatten(Self::target_index(&stack, depth)),
                    };
                    stack.push(Frame {
                        children: children.iter(),
                        slot,
                    });
                }
                None => {
                    let Some(frame) = stack.pop() else { break };
                    let Slot::Node(mut open) = frame.slot else { continue };
                    open.flush(&mut tree);
                    if open.escape {
                        self.split_escape(&mut tree, open.id);
                    }
                    match stack.len().checked_sub(1) {
                        Some(parent_depth) => {
                            let target = Self::target_of(&mut stack, parent_depth)?;
                            Self::attach(&mut tree, target, open.id);
                        }
                        None => finished_root = Some(open.id),
                    }
                }
            }
        }

        let root = finished_root.filter(|&root| tree.has_children(root));
        trace!("Built tree with {} nodes (empty: {})", tree.len(), root.is_none());
        tree.set_root(root);
        Ok(tree)
    }

    /// Creates the node for `rule`, or `None` when the rule is flattened.
    fn open(&self, tree: &mut Tree<'_, G::Kind>, rule: G::Rule) -> Option<Open> {
        let (kind, merge, escape) = match self.grammar.action(rule) {
            RuleAction::Node(kind) => (kind, false, false),
            RuleAction::MergeText(kind) => (kind, true, false),
            RuleAction::Escape(kind) => (kind, false, true),
            RuleAction::Flatten => return None,
        };
        Some(Open {
            id: tree.create_imaginary(kind),
            merge,
            escape,
            tail: None,
            last_attached: None,
            merged: None,
        })
    }

    fn target_index<K, R>(stack: &[Frame<'_, '_, K, R>], depth: usize) -> usize {
        match stack[depth].slot {
            Slot::Node(_) => depth,
            Slot::Flatten(target) => target,
        }
    }

    fn target_of<'f, K, R>(
        stack: &'f mut [Frame<'_, '_, K, R>],
        depth: usize,
    ) -> Result<&'f mut Open, ParseError> {
        let index = Self::target_index(stack, depth);
        match &mut stack[index].slot {
            Slot::Node(open) => Ok(open),
            Slot::Flatten(_) => Err(ParseError::internal("flattened rule has no enclosing node")),
        }
    }

    fn attach_token(&self, tree: &mut Tree<'_, G::Kind>, target: &mut Open, token: &Token<'_, G::Kind>) {
        let text_kind = self.grammar.text_kind();
        let mut kind = token.kind;
        if target.merge {
            if self.grammar.folds_to_text(kind) {
                kind = text_kind;
            }
            if kind == text_kind
                && let Some(last) = target.last_attached
                && tree.kind(last) == text_kind
            {
                target
                    .merged
                    .get_or_insert_with(|| tree.text(last).to_string())
                    .push_str(token.text);
                return;
            }
        }
        let leaf = tree.create_token(kind, token.text, token.position);
        Self::attach(tree, target, leaf);
    }

    /// Links `child`, plus any siblings already chained after it, as the
    /// last children of `target`.
    fn attach(tree: &mut Tree<'_, G::Kind>, target: &mut Open, child: NodeId) {
        target.flush(tree);
        match target.tail {
            None => tree.set_first_child(target.id, Some(child)),
            Some(tail) => tree.set_next_sibling(tail, Some(child)),
        }
        target.tail = Some(tree.last_in_chain(child));
        target.last_attached = Some(child);
    }

    /// Keeps only the first character of the escaped run under the escape
    /// node and moves the remainder into a new node following it.
    fn split_escape(&self, tree: &mut Tree<'_, G::Kind>, escape: NodeId) {
        let text_kind = self.grammar.text_kind();
        let Some(character) = tree.first_child(escape).and_then(|marker| tree.next_sibling(marker)) else {
            return;
        };
        let kind = tree.kind(character);
        if tree.has_children(character) || (kind != text_kind && !self.grammar.folds_to_text(kind)) {
            return;
        }
        let text = tree.text(character);
        let mut chars = text.chars();
        let Some(first) = chars.next() else { return };
        let rest = chars.as_str();
        if rest.is_empty() {
            return;
        }
        let Some(position) = tree.position(character) else {
            return;
        };

        let remainder = tree.create_token(kind, rest, position.next_column());
        let mut head = [0u8; 4];
        tree.set_text(character, first.encode_utf8(&mut head));
        tree.set_next_sibling(escape, Some(remainder));
    }
}

#[cfg(test)]
mod tests {
    use cstlint_ast::{Position, PropertyToken as K, TokenKind, print_tree};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Rule {
        File,
        Row,
        Text,
        Escape,
        Group,
    }

    struct TestGrammar;

    impl Grammar for TestGrammar {
        type Kind = K;
        type Rule = Rule;

        fn action(&self, rule: Rule) -> RuleAction<K> {
            match rule {
                Rule::File => RuleAction::Node(K::File),
                Rule::Row => RuleAction::Node(K::Row),
                Rule::Text => RuleAction::MergeText(K::ValueText),
                Rule::Escape => RuleAction::Escape(K::EscapedCharacter),
                Rule::Group => RuleAction::Flatten,
            }
        }

        fn text_kind(&self) -> K {
            K::Text
        }

        fn folds_to_text(&self, kind: K) -> bool {
            kind == K::Ws
        }
    }

    type P = ParseTree<'static, K, Rule>;

    fn t(kind: K, text: &'static str, column: u32) -> P {
        ParseTree::terminal(kind, text, Position::new(1, column))
    }

    fn build(parse_tree: &P) -> String {
        let arena = AstArena::new();
        let tree = TreeBuilder::new(&TestGrammar).build(&arena, parse_tree).unwrap();
        print_tree(&tree)
    }

    #[test]
    fn test_eof_only_file_has_no_root() {
        let arena = AstArena::new();
        let parse_tree: P = ParseTree::rule(Rule::File, vec![ParseTree::Eof(Position::new(1, 0))]);
        let tree = TreeBuilder::new(&TestGrammar).build(&arena, &parse_tree).unwrap();
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_trailing_eof_is_dropped() {
        let parse_tree: P = ParseTree::rule(
            Rule::File,
            vec![
                ParseTree::rule(Rule::Row, vec![t(K::Terminator, "\n", 0)]),
                ParseTree::Eof(Position::new(2, 0)),
            ],
        );
        let expected = "\
FILE -> FILE [1:0]
`--ROW -> ROW [1:0]
    `--TERMINATOR -> \\n [1:0]
";
        assert_eq!(build(&parse_tree), expected);
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let parse_tree: P = ParseTree::rule(
            Rule::Text,
            vec![t(K::Text, "ab", 0), t(K::Text, "cd", 2), t(K::Ws, " ", 4), t(K::Text, "e", 5)],
        );
        assert_eq!(build(&parse_tree), "VALUE_TEXT -> VALUE_TEXT [1:0]\n`--TEXT -> abcd e [1:0]\n");
    }

    #[test]
    fn test_merged_run_is_allocated_once() {
        let parts: Vec<P> = (0..10_000).map(|i| t(K::Text, "ab", i * 2)).collect();
        let parse_tree: P = ParseTree::rule(Rule::Text, parts);
        let arena = AstArena::new();
        let tree = TreeBuilder::new(&TestGrammar).build(&arena, &parse_tree).unwrap();

        let text = tree.root_node().and_then(|root| root.first_child()).unwrap();
        assert_eq!(text.text().len(), 20_000);
        assert!(arena.allocated_bytes() < 20_000 * 8, "{} bytes", arena.allocated_bytes());
    }

    #[test]
    fn test_text_outside_merge_rule_stays_split() {
        let parse_tree: P = ParseTree::rule(Rule::Row, vec![t(K::Text, "ab", 0), t(K::Ws, " ", 2)]);
        let expected = "\
ROW -> ROW [1:0]
|--TEXT -> ab [1:0]
`--WS ->   [1:2]
";
        assert_eq!(build(&parse_tree), expected);
    }

    #[test]
    fn test_escape_split() {
        let parse_tree: P = ParseTree::rule(
            Rule::Text,
            vec![
                t(K::Text, "a", 0),
                ParseTree::rule(Rule::Escape, vec![t(K::Backslash, "\\", 1), t(K::Text, "xyz", 2)]),
                t(K::Text, "b", 5),
            ],
        );
        let expected = "\
VALUE_TEXT -> VALUE_TEXT [1:0]
|--TEXT -> a [1:0]
|--ESCAPED_CHARACTER -> ESCAPED_CHARACTER [1:1]
|   |--BACKSLASH -> \\ [1:1]
|   `--TEXT -> x [1:2]
|--TEXT -> yz [1:3]
`--TEXT -> b [1:5]
";
        assert_eq!(build(&parse_tree), expected);
    }

    #[test]
    fn test_single_char_escape_is_untouched() {
        let parse_tree: P = ParseTree::rule(
            Rule::Escape,
            vec![t(K::Backslash, "\\", 0), t(K::Equals, "=", 1)],
        );
        let expected = "\
ESCAPED_CHARACTER -> ESCAPED_CHARACTER [1:0]
|--BACKSLASH -> \\ [1:0]
`--EQUALS -> = [1:1]
";
        assert_eq!(build(&parse_tree), expected);
    }

    #[test]
    fn test_flattened_rule_children_join_enclosing_node() {
        let parse_tree: P = ParseTree::rule(
            Rule::Row,
            vec![
                t(K::Pound, "#", 0),
                ParseTree::rule(Rule::Group, vec![t(K::Text, "x", 1), t(K::Ws, " ", 2)]),
                t(K::Terminator, "\n", 3),
            ],
        );
        let arena = AstArena::new();
        let tree = TreeBuilder::new(&TestGrammar).build(&arena, &parse_tree).unwrap();
        let root = tree.root_node().unwrap();
        let kinds: Vec<_> = root.children().map(|n| n.kind().name()).collect();
        assert_eq!(kinds, vec!["POUND", "TEXT", "WS", "TERMINATOR"]);
        assert_eq!(root.child_count(), 4);
    }

    #[test]
    fn test_flattened_root_is_rejected() {
        let arena = AstArena::new();
        let parse_tree: P = ParseTree::rule(Rule::Group, vec![t(K::Text, "x", 0)]);
        let result = TreeBuilder::new(&TestGrammar).build(&arena, &parse_tree);
        assert!(matches!(result, Err(ParseError::Internal(_))));
    }

    #[test]
    fn test_deep_nesting_builds_iteratively() {
        let mut parse_tree: P = t(K::Text, "x", 0);
        for _ in 0..100_000 {
            parse_tree = ParseTree::rule(Rule::Row, vec![parse_tree]);
        }
        let arena = AstArena::new();
        let tree = TreeBuilder::new(&TestGrammar).build(&arena, &parse_tree).unwrap();
        assert_eq!(tree.len(), 100_001);
        assert!(tree.root().is_some());
    }
}
