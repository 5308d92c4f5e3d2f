//! Text dump of a tree, one line per node.
//!
//! ```text
//! FILE -> FILE [1:0]
//! `--ROW -> ROW [1:0]
//!     |--DECL -> DECL [1:0]
//!     |   |--KEY -> KEY [1:0]
//!     |   |   `--TEXT -> key [1:0]
//!     ...
//! ```
//!
//! The format is stable and used for regression tests, so changes to it
//! break golden files.

use crate::node::NodeRef;
use crate::token::TokenKind;
use crate::tree::Tree;

/// Dumps the whole tree in pre-order. An empty tree prints nothing.
pub fn print_tree<K: TokenKind>(tree: &Tree<'_, K>) -> String {
    let mut out = String::new();
    let Some(root) = tree.root_node() else {
        return out;
    };
    push_line(&mut out, root);

    // Each entry carries the prefix shared by the node and its siblings.
    let mut stack: Vec<(NodeRef<'_, K>, String)> = Vec::new();
    if let Some(first) = root.first_child() {
        stack.push((first, String::new()));
    }
    while let Some((node, prefix)) = stack.pop() {
        let is_last = node.next_sibling().is_none();
        out.push_str(&prefix);
        out.push_str(connector(is_last));
        push_line(&mut out, node);

        let child_prefix = node
            .first_child()
            .map(|child| (child, format!("{prefix}{}", continuation(is_last))));
        if let Some(next) = node.next_sibling() {
            stack.push((next, prefix));
        }
        stack.extend(child_prefix);
    }
    out
}

/// Dumps the chain of ancestors from the root down to `node`, inclusive.
pub fn print_branch<K: TokenKind>(node: NodeRef<'_, K>) -> String {
    let mut branch = vec![node];
    let mut current = node;
    while let Some(parent) = current.parent() {
        branch.push(parent);
        current = parent;
    }

    let mut out = String::new();
    let mut prefix = String::new();
    for (depth, node) in branch.into_iter().rev().enumerate() {
        if depth > 0 {
            let is_last = node.next_sibling().is_none();
            out.push_str(&prefix);
            out.push_str(connector(is_last));
            prefix.push_str(continuation(is_last));
        }
        push_line(&mut out, node);
    }
    out
}

/// Marker in front of a node: `` `-- `` for the last sibling, `|--`
/// otherwise.
fn connector(is_last: bool) -> &'static str {
    if is_last { "`--" } else { "|--" }
}

/// What a node contributes to its descendants' prefix.
fn continuation(is_last: bool) -> &'static str {
    if is_last { "    " } else { "|   " }
}

fn push_line<K: TokenKind>(out: &mut String, node: NodeRef<'_, K>) {
    out.push_str(node.kind().name());
    out.push_str(" -> ");
    escape_control_chars(out, node.text());
    let line = node.line().map_or(-1, i64::from);
    let column = node.column().map_or(-1, i64::from);
    out.push_str(&format!(" [{line}:{column}]\n"));
}

fn escape_control_chars(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
}
