//! # cstlint_parser
//!
//! From source text to [`cstlint_ast::Tree`].
//!
//! This crate provides:
//! - [`ParseTree`], the grammar-level input: terminals, rule applications
//!   and an end-of-input marker
//! - [`Grammar`] and [`RuleAction`], describing how each rule becomes nodes
//! - [`TreeBuilder`], which turns a parse tree into a node tree, merging
//!   adjacent text and splitting multi-character escapes
//! - Built-in grammars and parsers for property files and XML
//!
//! ## Example
//!
//! ```rust
//! use cstlint_ast::{AstArena, print_tree};
//! use cstlint_parser::{Parser, XmlParser};
//!
//! let arena = AstArena::new();
//! let tree = XmlParser::new().parse(&arena, "<a/>").unwrap();
//! assert!(print_tree(&tree).starts_with("DOCUMENT -> DOCUMENT [1:0]"));
//! ```

mod builder;
mod cursor;
mod error;
mod grammar;
mod parse_tree;
mod property;
mod traits;
mod xml;

pub use builder::TreeBuilder;
pub use error::ParseError;
pub use grammar::{Grammar, RuleAction};
pub use parse_tree::{ParseTree, Token};
pub use property::{PropertyGrammar, PropertyParseTree, PropertyParser, PropertyRule};
pub use traits::Parser;
pub use xml::{XmlGrammar, XmlParseTree, XmlParser, XmlRule};
