//! Grammar-level parse tree, the input of the [`TreeBuilder`](crate::TreeBuilder).

use cstlint_ast::Position;

/// A lexical token borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s, K> {
    pub kind: K,
    pub text: &'s str,
    pub position: Position,
}

/// Terminals and rule applications as produced by a grammar.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseTree<'s, K, R> {
    Terminal(Token<'s, K>),
    Rule {
        rule: R,
        children: Vec<ParseTree<'s, K, R>>,
    },
    /// End-of-input marker; never becomes a node.
    Eof(Position),
}

impl<'s, K, R> ParseTree<'s, K, R> {
    pub fn terminal(kind: K, text: &'s str, position: Position) -> Self {
        Self::Terminal(Token {
            kind,
            text,
            position,
        })
    }

    pub fn rule(rule: R, children: Vec<Self>) -> Self {
        Self::Rule { rule, children }
    }

    /// Concatenated text of every terminal, in order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            match tree {
                Self::Terminal(token) => out.push_str(token.text),
                Self::Rule { children, .. } => stack.extend(children.iter().rev()),
                Self::Eof(_) => {}
            }
        }
        out
    }
}

// Nested documents can be arbitrarily deep, so children are released with
// an explicit stack instead of recursive drops.
impl<K, R> Drop for ParseTree<'_, K, R> {
    fn drop(&mut self) {
        let Self::Rule { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut tree) = pending.pop() {
            if let Self::Rule { children, .. } = &mut tree {
                pending.append(children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Tree<'s> = ParseTree<'s, &'static str, &'static str>;

    #[test]
    fn test_text_concatenates_terminals() {
        let tree: Tree<'_> = ParseTree::rule(
            "row",
            vec![
                ParseTree::terminal("TEXT", "key", Position::new(1, 0)),
                ParseTree::rule(
                    "assignment",
                    vec![ParseTree::terminal("EQUALS", "=", Position::new(1, 3))],
                ),
                ParseTree::terminal("TEXT", "value", Position::new(1, 4)),
                ParseTree::Eof(Position::new(1, 9)),
            ],
        );
        assert_eq!(tree.text(), "key=value");
    }

    #[test]
    fn test_deep_tree_drops_without_overflow() {
        let mut tree: Tree<'_> = ParseTree::terminal("TEXT", "x", Position::new(1, 0));
        for _ in 0..200_000 {
            tree = ParseTree::rule("nested", vec![tree]);
        }
        drop(tree);
    }
}
