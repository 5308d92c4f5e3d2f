//! XML grammar.
//!
//! ```text
//! document     : prolog? misc* element? misc* EOF
//! prolog       : XML_DECL_OPEN attribute* XML_DECL_CLOSE
//! content      : chardata? ((element | reference | CDATA | PI | COMMENT) chardata?)*
//! element      : startElement content? endElement | emptyElement
//! startElement : OPEN NAME attribute* CLOSE
//! endElement   : OPEN SLASH NAME CLOSE
//! emptyElement : OPEN NAME attribute* SLASH_CLOSE
//! reference    : ENTITY_REF | CHAR_REF
//! attribute    : NAME EQUALS STRING
//! chardata     : TEXT | SEA_WS
//! misc         : COMMENT | PI | SEA_WS | DTD
//! ```
//!
//! Whitespace between the parts of a tag is skipped. Elements are parsed
//! with an explicit stack of open tags.

use cstlint_ast::{AstArena, Position, Tree, XmlToken};

use crate::ParseError;
use crate::builder::TreeBuilder;
use crate::cursor::Cursor;
use crate::grammar::{Grammar, RuleAction};
use crate::parse_tree::{ParseTree, Token};
use crate::traits::Parser;

/// Rules of the XML grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlRule {
    Document,
    Prolog,
    Content,
    Element,
    StartElement,
    EndElement,
    EmptyElement,
    Reference,
    Attribute,
    Chardata,
    Misc,
}

pub type XmlParseTree<'s> = ParseTree<'s, XmlToken, XmlRule>;

/// Maps XML rules onto tree nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlGrammar;

impl XmlGrammar {
    /// Lexes and parses `source`.
    pub fn parse_tree(source: &str) -> Result<XmlParseTree<'_>, ParseError> {
        let (tokens, eof) = Lexer::new(source).tokenize()?;
        Structure {
            tokens,
            index: 0,
            eof,
        }
        .document()
    }
}

impl Grammar for XmlGrammar {
    type Kind = XmlToken;
    type Rule = XmlRule;

    fn action(&self, rule: XmlRule) -> RuleAction<XmlToken> {
        match rule {
            XmlRule::Document => RuleAction::Node(XmlToken::Document),
            XmlRule::Prolog => RuleAction::Node(XmlToken::Prolog),
            XmlRule::Content => RuleAction::Node(XmlToken::Content),
            XmlRule::Element => RuleAction::Node(XmlToken::Element),
            XmlRule::StartElement => RuleAction::Node(XmlToken::StartElement),
            XmlRule::EndElement => RuleAction::Node(XmlToken::EndElement),
            XmlRule::EmptyElement => RuleAction::Node(XmlToken::EmptyElement),
            XmlRule::Reference => RuleAction::Node(XmlToken::Reference),
            XmlRule::Attribute => RuleAction::Node(XmlToken::Attribute),
            XmlRule::Chardata => RuleAction::Flatten,
            XmlRule::Misc => RuleAction::Node(XmlToken::Misc),
        }
    }

    fn text_kind(&self) -> XmlToken {
        XmlToken::Text
    }
}

/// Parser for `.xml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for XmlParser {
    type Kind = XmlToken;

    fn name(&self) -> &str {
        "xml"
    }

    fn extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Tree<'a, XmlToken>, ParseError> {
        let parse_tree = XmlGrammar::parse_tree(source)?;
        TreeBuilder::new(&XmlGrammar).build(arena, &parse_tree)
    }
}

fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_alphanumeric() || matches!(c, '-' | '.' | '\u{b7}')
}

struct Lexer<'s> {
    cursor: Cursor<'s>,
    inside_tag: bool,
    tokens: Vec<Token<'s, XmlToken>>,
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            cursor: Cursor::new(source),
            inside_tag: false,
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Result<(Vec<Token<'s, XmlToken>>, Position), ParseError> {
        while !self.cursor.is_eof() {
            if self.inside_tag {
                self.inside()?;
            } else {
                self.outside()?;
            }
        }
        if self.inside_tag {
            return Err(ParseError::syntax(self.cursor.position(), "unterminated tag"));
        }
        Ok((self.tokens, self.cursor.position()))
    }

    fn push(&mut self, kind: XmlToken, start: usize, position: Position) {
        self.tokens.push(Token {
            kind,
            text: self.cursor.slice_from(start),
            position,
        });
    }

    /// Consumes through `terminator` or fails with `message` at the token start.
    fn delimited(&mut self, terminator: &str, position: Position, message: &str) -> Result<(), ParseError> {
        if self.cursor.eat_through(terminator) {
            Ok(())
        } else {
            Err(ParseError::syntax(position, message))
        }
    }

    fn outside(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.offset();
        let position = self.cursor.position();
        let kind = if self.cursor.starts_with("<!--") {
            self.delimited("-->", position, "unterminated comment")?;
            XmlToken::Comment
        } else if self.cursor.starts_with("<![CDATA[") {
            self.delimited("]]>", position, "unterminated CDATA section")?;
            XmlToken::Cdata
        } else if self.cursor.starts_with("<!") {
            self.delimited(">", position, "unterminated document type declaration")?;
            XmlToken::Dtd
        } else if self.cursor.starts_with("<?xml") && self.cursor.peek_nth(5).is_some_and(is_xml_space) {
            self.cursor.bump_n(5);
            self.inside_tag = true;
            XmlToken::XmlDeclOpen
        } else if self.cursor.starts_with("<?") {
            self.delimited("?>", position, "unterminated processing instruction")?;
            XmlToken::Pi
        } else if self.cursor.starts_with("<") {
            self.cursor.bump();
            self.inside_tag = true;
            XmlToken::Open
        } else if self.cursor.starts_with("&") {
            self.reference(position)?
        } else {
            self.cursor.eat_while(|c| c != '<' && c != '&');
            if self.cursor.slice_from(start).chars().all(is_xml_space) {
                XmlToken::SeaWs
            } else {
                XmlToken::Text
            }
        };
        self.push(kind, start, position);
        Ok(())
    }

    fn reference(&mut self, position: Position) -> Result<XmlToken, ParseError> {
        self.cursor.bump();
        let kind = if self.cursor.peek() == Some('#') {
            self.cursor.bump();
            let before = self.cursor.offset();
            if self.cursor.peek() == Some('x') {
                self.cursor.bump();
                self.cursor.eat_while(|c| c.is_ascii_hexdigit());
                if self.cursor.offset() == before + 1 {
                    return Err(ParseError::syntax(position, "malformed character reference"));
                }
            } else {
                self.cursor.eat_while(|c| c.is_ascii_digit());
            }
            if self.cursor.offset() == before {
                return Err(ParseError::syntax(position, "malformed character reference"));
            }
            XmlToken::CharRef
        } else {
            if !self.cursor.peek().is_some_and(is_name_start) {
                return Err(ParseError::syntax(position, "'&' must start an entity reference"));
            }
            self.cursor.eat_while(is_name_char);
            XmlToken::EntityRef
        };
        if self.cursor.peek() != Some(';') {
            return Err(ParseError::syntax(position, "reference is missing its ';'"));
        }
        self.cursor.bump();
        Ok(kind)
    }

    fn inside(&mut self) -> Result<(), ParseError> {
        self.cursor.eat_while(is_xml_space);
        let Some(c) = self.cursor.peek() else {
            return Ok(());
        };
        let start = self.cursor.offset();
        let position = self.cursor.position();
        let kind = match c {
            '>' => {
                self.cursor.bump();
                self.inside_tag = false;
                XmlToken::Close
            }
            '/' if self.cursor.peek_second() == Some('>') => {
                self.cursor.bump_n(2);
                self.inside_tag = false;
                XmlToken::SlashClose
            }
            '/' => {
                self.cursor.bump();
                XmlToken::Slash
            }
            '?' if self.cursor.peek_second() == Some('>') => {
                self.cursor.bump_n(2);
                self.inside_tag = false;
                XmlToken::XmlDeclClose
            }
            '=' => {
                self.cursor.bump();
                XmlToken::Equals
            }
            '"' | '\'' => {
                self.cursor.bump();
                self.cursor.eat_while(|next| next != c);
                if self.cursor.bump().is_none() {
                    return Err(ParseError::syntax(position, "unterminated attribute value"));
                }
                XmlToken::String
            }
            c if is_name_start(c) => {
                self.cursor.eat_while(is_name_char);
                XmlToken::Name
            }
            c => {
                return Err(ParseError::syntax(position, format!("unexpected character '{c}' in tag")));
            }
        };
        self.push(kind, start, position);
        Ok(())
    }
}

/// A start tag whose end tag has not been seen yet.
struct OpenElement<'s> {
    start: XmlParseTree<'s>,
    name: &'s str,
    content: Vec<XmlParseTree<'s>>,
}

/// Recursive-descent parser over the token list, except for element
/// nesting which is tracked on an explicit stack.
struct Structure<'s> {
    tokens: Vec<Token<'s, XmlToken>>,
    index: usize,
    eof: Position,
}

impl<'s> Structure<'s> {
    fn peek_kind(&self) -> Option<XmlToken> {
        self.peek_kind_at(0)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<XmlToken> {
        self.tokens.get(self.index + offset).map(|token| token.kind)
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let position = self.tokens.get(self.index).map_or(self.eof, |token| token.position);
        ParseError::syntax(position, message)
    }

    fn found(&self) -> String {
        match self.tokens.get(self.index) {
            Some(token) => format!("'{}'", token.text),
            None => "end of input".to_string(),
        }
    }

    fn take(&mut self) -> Option<Token<'s, XmlToken>> {
        let token = self.tokens.get(self.index).cloned()?;
        self.index += 1;
        Some(token)
    }

    fn expect(&mut self, kind: XmlToken, what: &str) -> Result<Token<'s, XmlToken>, ParseError> {
        if self.peek_kind() != Some(kind) {
            return Err(self.error_here(format!("expected {what} but found {}", self.found())));
        }
        self.take()
            .ok_or_else(|| ParseError::internal("token vanished after peek"))
    }

    fn terminal(&mut self, kind: XmlToken, what: &str) -> Result<XmlParseTree<'s>, ParseError> {
        self.expect(kind, what).map(ParseTree::Terminal)
    }

    fn document(mut self) -> Result<XmlParseTree<'s>, ParseError> {
        let mut children = Vec::new();
        if self.peek_kind() == Some(XmlToken::XmlDeclOpen) {
            children.push(self.prolog()?);
        }
        self.misc(&mut children)?;
        if self.peek_kind() == Some(XmlToken::Open) {
            children.push(self.element()?);
            self.misc(&mut children)?;
        }
        if self.peek_kind().is_some() {
            return Err(self.error_here(format!("unexpected {} at document level", self.found())));
        }
        children.push(ParseTree::Eof(self.eof));
        Ok(ParseTree::rule(XmlRule::Document, children))
    }

    fn misc(&mut self, children: &mut Vec<XmlParseTree<'s>>) -> Result<(), ParseError> {
        while let Some(kind @ (XmlToken::Comment | XmlToken::Pi | XmlToken::SeaWs | XmlToken::Dtd)) =
            self.peek_kind()
        {
            let token = self.terminal(kind, "misc")?;
            children.push(ParseTree::rule(XmlRule::Misc, vec![token]));
        }
        Ok(())
    }

    fn prolog(&mut self) -> Result<XmlParseTree<'s>, ParseError> {
        let mut children = vec![self.terminal(XmlToken::XmlDeclOpen, "'<?xml'")?];
        while self.peek_kind() == Some(XmlToken::Name) {
            children.push(self.attribute()?);
        }
        children.push(self.terminal(XmlToken::XmlDeclClose, "'?>'")?);
        Ok(ParseTree::rule(XmlRule::Prolog, children))
    }

    fn attribute(&mut self) -> Result<XmlParseTree<'s>, ParseError> {
        let children = vec![
            self.terminal(XmlToken::Name, "attribute name")?,
            self.terminal(XmlToken::Equals, "'='")?,
            self.terminal(XmlToken::String, "quoted attribute value")?,
        ];
        Ok(ParseTree::rule(XmlRule::Attribute, children))
    }

    /// Parses `OPEN NAME attribute* (CLOSE | SLASH_CLOSE)`.
    ///
    /// Returns the tag, the element name and whether the tag was self-closing.
    fn tag(&mut self) -> Result<(XmlParseTree<'s>, &'s str, bool), ParseError> {
        let open = self.terminal(XmlToken::Open, "'<'")?;
        let name = self.expect(XmlToken::Name, "element name")?;
        let element_name = name.text;
        let mut children = vec![open, ParseTree::Terminal(name)];
        while self.peek_kind() == Some(XmlToken::Name) {
            children.push(self.attribute()?);
        }
        match self.peek_kind() {
            Some(XmlToken::Close) => {
                children.push(self.terminal(XmlToken::Close, "'>'")?);
                Ok((ParseTree::rule(XmlRule::StartElement, children), element_name, false))
            }
            Some(XmlToken::SlashClose) => {
                children.push(self.terminal(XmlToken::SlashClose, "'/>'")?);
                Ok((ParseTree::rule(XmlRule::EmptyElement, children), element_name, true))
            }
            _ => Err(self.error_here(format!("expected '>' or '/>' but found {}", self.found()))),
        }
    }

    fn end_tag(&mut self, expected_name: &str) -> Result<XmlParseTree<'s>, ParseError> {
        let open = self.terminal(XmlToken::Open, "'<'")?;
        let slash = self.terminal(XmlToken::Slash, "'/'")?;
        if self.tokens.get(self.index).is_some_and(|token| token.kind == XmlToken::Name && token.text != expected_name) {
            return Err(self.error_here(format!(
                "mismatched end tag: expected </{expected_name}> but found </{}>",
                self.tokens[self.index].text
            )));
        }
        let name = self.terminal(XmlToken::Name, "element name")?;
        let close = self.terminal(XmlToken::Close, "'>'")?;
        Ok(ParseTree::rule(XmlRule::EndElement, vec![open, slash, name, close]))
    }

    fn element(&mut self) -> Result<XmlParseTree<'s>, ParseError> {
        let mut open: Vec<OpenElement<'s>> = Vec::new();
        loop {
            let (tag, name, self_closing) = self.tag()?;
            let mut finished = if self_closing {
                Some(ParseTree::rule(XmlRule::Element, vec![tag]))
            } else {
                open.push(OpenElement {
                    start: tag,
                    name,
                    content: Vec::new(),
                });
                None
            };

            loop {
                if let Some(element) = finished.take() {
                    match open.last_mut() {
                        Some(parent) => parent.content.push(element),
                        None => return Ok(element),
                    }
                }
                let Some(current) = open.last_mut() else {
                    return Err(ParseError::internal("element stack is empty"));
                };
                match self.peek_kind() {
                    Some(XmlToken::Open) if self.peek_kind_at(1) == Some(XmlToken::Slash) => {
                        let end = self.end_tag(current.name)?;
                        let Some(closed) = open.pop() else {
                            return Err(ParseError::internal("element stack is empty"));
                        };
                        let mut children = vec![closed.start];
                        if !closed.content.is_empty() {
                            children.push(ParseTree::rule(XmlRule::Content, closed.content));
                        }
                        children.push(end);
                        finished = Some(ParseTree::rule(XmlRule::Element, children));
                    }
                    Some(XmlToken::Open) => break,
                    Some(kind @ (XmlToken::Text | XmlToken::SeaWs)) => {
                        let text = self.terminal(kind, "character data")?;
                        current.content.push(ParseTree::rule(XmlRule::Chardata, vec![text]));
                    }
                    Some(kind @ (XmlToken::EntityRef | XmlToken::CharRef)) => {
                        let reference = self.terminal(kind, "reference")?;
                        current.content.push(ParseTree::rule(XmlRule::Reference, vec![reference]));
                    }
                    Some(kind @ (XmlToken::Cdata | XmlToken::Pi | XmlToken::Comment)) => {
                        let item = self.terminal(kind, "content")?;
                        current.content.push(item);
                    }
                    Some(_) => {
                        return Err(self.error_here(format!("unexpected {} in element content", self.found())));
                    }
                    None => {
                        return Err(self.error_here(format!("element <{}> is never closed", current.name)));
                    }
                }
            }
        }
    }
}
