//! # cstlint_ast
//!
//! Concrete syntax tree types for cstlint.
//!
//! A [`Tree`] stores every node of one file in a flat `Vec`, addressed by
//! [`NodeId`]. Nodes keep parent, first-child and sibling links, so a walk
//! can move through the tree without recursion. Node text lives in an
//! [`AstArena`] and is freed together with the tree.
//!
//! Each supported format has a closed set of node kinds
//! ([`PropertyToken`], [`XmlToken`]) implementing [`TokenKind`], with a
//! shared [`TokenCatalog`] for name and id lookups.
//!
//! ## Example
//!
//! ```rust
//! use cstlint_ast::{AstArena, Position, PropertyToken, Tree, print_tree};
//!
//! let arena = AstArena::new();
//! let mut tree = Tree::new(&arena);
//! let key = tree.create_imaginary(PropertyToken::Key);
//! let text = tree.create_token(PropertyToken::Text, "name", Position::new(1, 0));
//! tree.add_child(key, text);
//! tree.set_root(Some(key));
//!
//! assert_eq!(print_tree(&tree), "KEY -> KEY [1:0]\n`--TEXT -> name [1:0]\n");
//! ```

mod arena;
mod node;
mod position;
mod printer;
mod token;
pub mod tokens;
mod tree;

pub use arena::AstArena;
pub use node::{Children, NodeId, NodeRef, PreOrder};
pub use position::Position;
pub use printer::{print_branch, print_tree};
pub use token::{CatalogError, TokenCatalog, TokenKind};
pub use tokens::{PropertyToken, XmlToken};
pub use tree::Tree;
