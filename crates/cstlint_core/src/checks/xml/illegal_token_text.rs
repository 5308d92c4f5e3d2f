use cstlint_ast::{NodeRef, XmlToken};
use regex::Regex;
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::compile_pattern;
use crate::error::LinterError;

pub const MSG_KEY: &str = "illegal.token.text";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct IllegalTokenTextXmlOptions {
    pub format: String,
    pub ignore_case: bool,
    /// Message key or literal message used instead of the default one.
    pub message: String,
}

impl Default for IllegalTokenTextXmlOptions {
    fn default() -> Self {
        Self {
            format: "^$".to_string(),
            ignore_case: false,
            message: String::new(),
        }
    }
}

/// Reports names, text and other leaves whose text contains a match of
/// `format`. Nothing is checked until tokens are configured.
#[derive(Debug)]
pub struct IllegalTokenTextXmlCheck {
    format: Regex,
    message: Option<String>,
}

impl IllegalTokenTextXmlCheck {
    pub const NAME: &'static str = "IllegalTokenTextXml";

    pub fn new(options: IllegalTokenTextXmlOptions) -> Result<Self, LinterError> {
        Ok(Self {
            format: compile_pattern(Self::NAME, &options.format, options.ignore_case)?,
            message: Some(options.message).filter(|m| !m.is_empty()),
        })
    }
}

impl Check<XmlToken> for IllegalTokenTextXmlCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [XmlToken] {
        &[]
    }

    fn acceptable_tokens(&self) -> &'static [XmlToken] {
        &[
            XmlToken::Name,
            XmlToken::Text,
            XmlToken::String,
            XmlToken::Comment,
            XmlToken::Cdata,
            XmlToken::SeaWs,
            XmlToken::Dtd,
            XmlToken::Pi,
            XmlToken::EntityRef,
            XmlToken::CharRef,
        ]
    }

    fn required_tokens(&self) -> &'static [XmlToken] {
        &[]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        if self.format.is_match(node.text()) {
            let key = self.message.as_deref().unwrap_or(MSG_KEY);
            ctx.log(node, key, [self.format.as_str()]);
        }
    }
}
