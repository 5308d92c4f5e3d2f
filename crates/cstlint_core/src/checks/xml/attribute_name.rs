use cstlint_ast::{NodeRef, XmlToken};
use regex::Regex;
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::compile_pattern;
use crate::error::LinterError;

pub const MSG_KEY: &str = "name.invalidPattern";

const DEFAULT_FORMAT: &str = "^[a-z][a-zA-Z0-9]*$";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AttributeNameXmlOptions {
    pub format: String,
}

impl Default for AttributeNameXmlOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Reports attribute names that do not match `format`. Element names are
/// not checked.
#[derive(Debug)]
pub struct AttributeNameXmlCheck {
    format: Regex,
}

impl AttributeNameXmlCheck {
    pub const NAME: &'static str = "AttributeNameXml";

    pub fn new(options: AttributeNameXmlOptions) -> Result<Self, LinterError> {
        Ok(Self {
            format: compile_pattern(Self::NAME, &options.format, false)?,
        })
    }
}

impl Check<XmlToken> for AttributeNameXmlCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::Name]
    }

    fn acceptable_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::Name]
    }

    fn required_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::Name]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        let in_attribute = node
            .parent()
            .is_some_and(|parent| parent.kind() == XmlToken::Attribute);
        if in_attribute && !self.format.is_match(node.text()) {
            ctx.log(node, MSG_KEY, [node.text(), self.format.as_str()]);
        }
    }
}
