//! Property-file grammar.
//!
//! ```text
//! file             : row* EOF
//! row              : WS? (comment | decl)? TERMINATOR?
//! comment          : (POUND | EXCLAMATION) (TEXT | WS)*
//! decl             : key? assignment? value?
//! key              : (TEXT | escapedCharacter)+
//! assignment       : WS? (EQUALS | COLON) WS? | WS
//! value            : (valueText | continuation)+
//! valueText        : (TEXT | WS | escapedCharacter)+
//! continuation     : BACKSLASH TERMINATOR WS?
//! escapedCharacter : BACKSLASH (TEXT | WS | EQUALS | COLON | BACKSLASH)?
//! ```
//!
//! Every character of the input ends up in exactly one token, so the text of
//! the leaves read in order is the original file.

use cstlint_ast::{AstArena, PropertyToken, Tree};

use crate::ParseError;
use crate::builder::TreeBuilder;
use crate::cursor::Cursor;
use crate::grammar::{Grammar, RuleAction};
use crate::parse_tree::ParseTree;
use crate::traits::Parser;

/// Rules of the property grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRule {
    File,
    Row,
    Comment,
    Decl,
    Key,
    Assignment,
    Value,
    ValueText,
    Continuation,
    EscapedCharacter,
}

pub type PropertyParseTree<'s> = ParseTree<'s, PropertyToken, PropertyRule>;

/// Maps property rules onto tree nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyGrammar;

impl PropertyGrammar {
    /// Scans `source` into a parse tree. Every input is accepted.
    pub fn parse_tree(source: &str) -> PropertyParseTree<'_> {
        Scanner {
            cursor: Cursor::new(source),
        }
        .file()
    }
}

impl Grammar for PropertyGrammar {
    type Kind = PropertyToken;
    type Rule = PropertyRule;

    fn action(&self, rule: PropertyRule) -> RuleAction<PropertyToken> {
        match rule {
            PropertyRule::File => RuleAction::Node(PropertyToken::File),
            PropertyRule::Row => RuleAction::Node(PropertyToken::Row),
            PropertyRule::Comment => RuleAction::MergeText(PropertyToken::Comment),
            PropertyRule::Decl => RuleAction::Node(PropertyToken::Decl),
            PropertyRule::Key => RuleAction::Node(PropertyToken::Key),
            PropertyRule::Assignment => RuleAction::Node(PropertyToken::Assignment),
            PropertyRule::Value => RuleAction::Node(PropertyToken::Value),
            PropertyRule::ValueText => RuleAction::MergeText(PropertyToken::ValueText),
            PropertyRule::Continuation => RuleAction::Node(PropertyToken::Continuation),
            PropertyRule::EscapedCharacter => RuleAction::Escape(PropertyToken::EscapedCharacter),
        }
    }

    fn text_kind(&self) -> PropertyToken {
        PropertyToken::Text
    }

    fn folds_to_text(&self, kind: PropertyToken) -> bool {
        kind == PropertyToken::Ws
    }
}

/// Parser for `.properties` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyParser;

impl PropertyParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for PropertyParser {
    type Kind = PropertyToken;

    fn name(&self) -> &str {
        "properties"
    }

    fn extensions(&self) -> &[&str] {
        &["properties"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Tree<'a, PropertyToken>, ParseError> {
        let parse_tree = PropertyGrammar::parse_tree(source);
        TreeBuilder::new(&PropertyGrammar).build(arena, &parse_tree)
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn is_line_end(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_key_char(c: char) -> bool {
    !is_space(c) && !is_line_end(c) && !matches!(c, '=' | ':' | '\\')
}

fn is_value_char(c: char) -> bool {
    !is_space(c) && !is_line_end(c) && c != '\\'
}

#[derive(Clone, Copy)]
enum EscapeContext {
    Key,
    Value,
}

struct Scanner<'s> {
    cursor: Cursor<'s>,
}

impl<'s> Scanner<'s> {
    fn token(
        &mut self,
        kind: PropertyToken,
        consume: impl FnOnce(&mut Cursor<'s>),
    ) -> PropertyParseTree<'s> {
        let start = self.cursor.offset();
        let position = self.cursor.position();
        consume(&mut self.cursor);
        ParseTree::terminal(kind, self.cursor.slice_from(start), position)
    }

    fn single(&mut self, kind: PropertyToken) -> PropertyParseTree<'s> {
        self.token(kind, |cursor| {
            cursor.bump();
        })
    }

    fn at_line_end(&self) -> bool {
        self.cursor.peek().is_none_or(is_line_end)
    }

    /// Backslash immediately followed by a line terminator.
    fn at_continuation(&self) -> bool {
        self.cursor.peek() == Some('\\') && self.cursor.peek_second().is_some_and(is_line_end)
    }

    fn whitespace(&mut self) -> Option<PropertyParseTree<'s>> {
        if !self.cursor.peek().is_some_and(is_space) {
            return None;
        }
        Some(self.token(PropertyToken::Ws, |cursor| cursor.eat_while(is_space)))
    }

    fn terminator(&mut self) -> Option<PropertyParseTree<'s>> {
        match self.cursor.peek()? {
            '\r' => Some(self.token(PropertyToken::Terminator, |cursor| {
                cursor.bump();
                if cursor.peek() == Some('\n') {
                    cursor.bump();
                }
            })),
            '\n' => Some(self.single(PropertyToken::Terminator)),
            _ => None,
        }
    }

    fn file(mut self) -> PropertyParseTree<'s> {
        let mut rows = Vec::new();
        while !self.cursor.is_eof() {
            rows.push(self.row());
        }
        rows.push(ParseTree::Eof(self.cursor.position()));
        ParseTree::rule(PropertyRule::File, rows)
    }

    fn row(&mut self) -> PropertyParseTree<'s> {
        let mut children = Vec::new();
        children.extend(self.whitespace());
        match self.cursor.peek() {
            None => {}
            Some(c) if is_line_end(c) => {}
            Some('#' | '!') => children.push(self.comment()),
            Some(_) => children.push(self.decl()),
        }
        children.extend(self.terminator());
        ParseTree::rule(PropertyRule::Row, children)
    }

    fn comment(&mut self) -> PropertyParseTree<'s> {
        let marker = if self.cursor.peek() == Some('#') {
            PropertyToken::Pound
        } else {
            PropertyToken::Exclamation
        };
        let mut children = vec![self.single(marker)];
        while !self.at_line_end() {
            match self.whitespace() {
                Some(ws) => children.push(ws),
                None => children.push(self.token(PropertyToken::Text, |cursor| {
                    cursor.eat_while(|c| !is_space(c) && !is_line_end(c))
                })),
            }
        }
        ParseTree::rule(PropertyRule::Comment, children)
    }

    fn decl(&mut self) -> PropertyParseTree<'s> {
        let mut children = Vec::new();
        children.extend(self.key());
        children.extend(self.assignment());
        children.extend(self.value());
        ParseTree::rule(PropertyRule::Decl, children)
    }

    fn key(&mut self) -> Option<PropertyParseTree<'s>> {
        let mut children = Vec::new();
        loop {
            match self.cursor.peek() {
                Some('\\') => {
                    if self.cursor.peek_second().is_none_or(is_line_end) {
                        break;
                    }
                    children.push(self.escaped_character(EscapeContext::Key));
                }
                Some(c) if is_key_char(c) => {
                    children.push(self.token(PropertyToken::Text, |cursor| cursor.eat_while(is_key_char)));
                }
                _ => break,
            }
        }
        (!children.is_empty()).then(|| ParseTree::rule(PropertyRule::Key, children))
    }

    fn assignment(&mut self) -> Option<PropertyParseTree<'s>> {
        let mut children = Vec::new();
        children.extend(self.whitespace());
        let separator = match self.cursor.peek() {
            Some('=') => PropertyToken::Equals,
            Some(':') => PropertyToken::Colon,
            _ => {
                return (!children.is_empty()).then(|| ParseTree::rule(PropertyRule::Assignment, children));
            }
        };
        children.push(self.single(separator));
        children.extend(self.whitespace());
        Some(ParseTree::rule(PropertyRule::Assignment, children))
    }

    fn value(&mut self) -> Option<PropertyParseTree<'s>> {
        let mut children = Vec::new();
        while !self.at_line_end() {
            if self.at_continuation() {
                children.push(self.continuation());
            } else {
                children.push(self.value_text());
            }
        }
        (!children.is_empty()).then(|| ParseTree::rule(PropertyRule::Value, children))
    }

    fn continuation(&mut self) -> PropertyParseTree<'s> {
        let mut children = vec![self.single(PropertyToken::Backslash)];
        children.extend(self.terminator());
        children.extend(self.whitespace());
        ParseTree::rule(PropertyRule::Continuation, children)
    }

    fn value_text(&mut self) -> PropertyParseTree<'s> {
        let mut children = Vec::new();
        while !self.at_line_end() && !self.at_continuation() {
            if let Some(ws) = self.whitespace() {
                children.push(ws);
            } else if self.cursor.peek() == Some('\\') {
                children.push(self.escaped_character(EscapeContext::Value));
            } else {
                children.push(self.token(PropertyToken::Text, |cursor| cursor.eat_while(is_value_char)));
            }
        }
        ParseTree::rule(PropertyRule::ValueText, children)
    }

    fn escaped_character(&mut self, context: EscapeContext) -> PropertyParseTree<'s> {
        let mut children = vec![self.single(PropertyToken::Backslash)];
        let escaped = match (self.cursor.peek(), context) {
            (None, _) => None,
            (Some(c), _) if is_line_end(c) => None,
            (Some(c), _) if is_space(c) => self.whitespace(),
            (Some('\\'), _) => Some(self.single(PropertyToken::Backslash)),
            (Some('='), EscapeContext::Key) => Some(self.single(PropertyToken::Equals)),
            (Some(':'), EscapeContext::Key) => Some(self.single(PropertyToken::Colon)),
            (Some(_), EscapeContext::Key) => {
                Some(self.token(PropertyToken::Text, |cursor| cursor.eat_while(is_key_char)))
            }
            (Some(_), EscapeContext::Value) => {
                Some(self.token(PropertyToken::Text, |cursor| cursor.eat_while(is_value_char)))
            }
        };
        children.extend(escaped);
        ParseTree::rule(PropertyRule::EscapedCharacter, children)
    }
}

#[cfg(test)]
mod tests {
    use cstlint_ast::print_tree;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn dump(source: &str) -> String {
        let arena = AstArena::new();
        let tree = PropertyParser::new().parse(&arena, source).unwrap();
        print_tree(&tree)
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank_lines("\n\n\r\n")]
    #[case::plain("key=value\n")]
    #[case::no_trailing_newline("a: b")]
    #[case::space_assignment("key value with spaces\n")]
    #[case::comments("# one\n  ! two\n")]
    #[case::continuation("key = first \\\n    second \\\r\n\tthird\n")]
    #[case::escapes("a\\ b\\=c = \\u00e9\\\\\\t\\")]
    #[case::missing_key("=orphan\n")]
    #[case::trailing_spaces("key \t\n   \n")]
    fn test_scanner_is_lossless(#[case] source: &str) {
        assert_eq!(PropertyGrammar::parse_tree(source).text(), source);

        let arena = AstArena::new();
        let tree = PropertyParser::new().parse(&arena, source).unwrap();
        let leaves = tree.root_node().map(|root| root.leaf_text()).unwrap_or_default();
        assert_eq!(leaves, source);
    }

    #[test]
    fn test_empty_file_has_no_root() {
        let arena = AstArena::new();
        let tree = PropertyParser::new().parse(&arena, "").unwrap();
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_comment_and_continuation() {
        let expected = r"FILE -> FILE [1:0]
|--ROW -> ROW [1:0]
|   |--COMMENT -> COMMENT [1:0]
|   |   |--POUND -> # [1:0]
|   |   `--TEXT ->  c [1:1]
|   `--TERMINATOR -> \n [1:3]
`--ROW -> ROW [2:0]
    |--DECL -> DECL [2:0]
    |   |--KEY -> KEY [2:0]
    |   |   `--TEXT -> key [2:0]
    |   |--ASSIGNMENT -> ASSIGNMENT [2:3]
    |   |   |--WS ->   [2:3]
    |   |   |--EQUALS -> = [2:4]
    |   |   `--WS ->   [2:5]
    |   `--VALUE -> VALUE [2:6]
    |       |--VALUE_TEXT -> VALUE_TEXT [2:6]
    |       |   `--TEXT -> v1  [2:6]
    |       |--CONTINUATION -> CONTINUATION [2:9]
    |       |   |--BACKSLASH -> \ [2:9]
    |       |   |--TERMINATOR -> \n [2:10]
    |       |   `--WS ->      [3:0]
    |       `--VALUE_TEXT -> VALUE_TEXT [3:4]
    |           `--TEXT -> v2 [3:4]
    `--TERMINATOR -> \n [3:6]
";
        assert_eq!(dump("# c\nkey = v1 \\\n    v2\n"), expected);
    }

    #[test]
    fn test_escapes_are_split() {
        let expected = r"FILE -> FILE [1:0]
`--ROW -> ROW [1:0]
    `--DECL -> DECL [1:0]
        |--KEY -> KEY [1:0]
        |   |--TEXT -> a [1:0]
        |   |--ESCAPED_CHARACTER -> ESCAPED_CHARACTER [1:1]
        |   |   |--BACKSLASH -> \ [1:1]
        |   |   `--TEXT -> b [1:2]
        |   `--TEXT -> c [1:3]
        |--ASSIGNMENT -> ASSIGNMENT [1:4]
        |   `--EQUALS -> = [1:4]
        `--VALUE -> VALUE [1:5]
            `--VALUE_TEXT -> VALUE_TEXT [1:5]
                |--TEXT -> x [1:5]
                |--ESCAPED_CHARACTER -> ESCAPED_CHARACTER [1:6]
                |   |--BACKSLASH -> \ [1:6]
                |   `--TEXT -> : [1:7]
                `--TEXT -> y [1:8]
";
        assert_eq!(dump(r"a\bc=x\:y"), expected);
    }

    #[test]
    fn test_long_comment_allocates_linearly() {
        let source = format!("#{}\n", " a".repeat(50_000));
        let arena = AstArena::new();
        let tree = PropertyParser::new().parse(&arena, &source).unwrap();

        let comment = tree
            .root_node()
            .and_then(|file| file.find_first(PropertyToken::Comment))
            .unwrap();
        let text = comment.last_child().unwrap();
        assert_eq!(text.kind(), PropertyToken::Text);
        assert_eq!(text.text().len(), 100_000);
        assert!(
            arena.allocated_bytes() < source.len() * 8,
            "{} arena bytes for {} source bytes",
            arena.allocated_bytes(),
            source.len()
        );
    }

    #[test]
    fn test_whitespace_only_line() {
        let expected = r"FILE -> FILE [1:0]
`--ROW -> ROW [1:0]
    |--WS ->  \t  [1:0]
    `--TERMINATOR -> \r\n [1:3]
";
        assert_eq!(dump(" \t \r\n"), expected);
    }

    #[test]
    fn test_decl_without_assignment() {
        let arena = AstArena::new();
        let tree = PropertyParser::new().parse(&arena, "lonely\n").unwrap();
        let decl = tree
            .root_node()
            .and_then(|file| file.first_child())
            .and_then(|row| row.first_child())
            .unwrap();
        assert_eq!(decl.kind(), PropertyToken::Decl);
        assert_eq!(decl.child_count(), 1);
        assert!(decl.find_first(PropertyToken::Assignment).is_none());
    }

    #[test]
    fn test_dump_is_stable_across_reparse() {
        let source = "# header\nk\\ ey : v\\=1 \\\n  tail\n\nother=x\n";
        let arena = AstArena::new();
        let tree = PropertyParser::new().parse(&arena, source).unwrap();
        let first = print_tree(&tree);
        let regenerated = tree.root_node().unwrap().leaf_text();

        let second_arena = AstArena::new();
        let reparsed = PropertyParser::new().parse(&second_arena, &regenerated).unwrap();
        assert_eq!(print_tree(&reparsed), first);
    }

    #[test]
    fn test_parser_metadata() {
        let parser = PropertyParser::new();
        assert_eq!(parser.name(), "properties");
        assert!(parser.can_parse("PROPERTIES"));
        assert!(!parser.can_parse("xml"));
    }
}
