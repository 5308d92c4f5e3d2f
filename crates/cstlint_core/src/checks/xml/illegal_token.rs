use cstlint_ast::{NodeRef, TokenKind, XmlToken};

use crate::check::{Check, CheckContext};
use crate::checks::escape_control_chars;

pub const MSG_KEY: &str = "illegal.token";

/// Reports every node of the configured kinds. Registered for nothing
/// unless `tokens` is set.
#[derive(Debug, Default)]
pub struct IllegalTokenXmlCheck;

impl IllegalTokenXmlCheck {
    pub const NAME: &'static str = "IllegalTokenXml";
}

impl Check<XmlToken> for IllegalTokenXmlCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [XmlToken] {
        &[]
    }

    fn acceptable_tokens(&self) -> &'static [XmlToken] {
        XmlToken::ALL
    }

    fn required_tokens(&self) -> &'static [XmlToken] {
        &[]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        let text = match node.kind() {
            XmlToken::Comment => escape_control_chars(node.text()),
            _ => node.text().to_string(),
        };
        ctx.log(node, MSG_KEY, [text]);
    }
}
