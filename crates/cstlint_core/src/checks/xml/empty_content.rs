use cstlint_ast::{NodeRef, XmlToken};

use crate::check::{Check, CheckContext};

pub const MSG_KEY: &str = "empty.content";

/// Reports `<a></a>` pairs that could be written as `<a/>`.
#[derive(Debug, Default)]
pub struct EmptyContentXmlCheck;

impl EmptyContentXmlCheck {
    pub const NAME: &'static str = "EmptyContentXml";
}

impl Check<XmlToken> for EmptyContentXmlCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::StartElement]
    }

    fn acceptable_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::StartElement]
    }

    fn required_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::StartElement]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        let empty = node
            .next_sibling()
            .is_some_and(|sibling| sibling.kind() == XmlToken::EndElement);
        if empty {
            let name = node.find_first(XmlToken::Name).map(|n| n.text()).unwrap_or_default();
            ctx.log(node, MSG_KEY, [name]);
        }
    }
}
