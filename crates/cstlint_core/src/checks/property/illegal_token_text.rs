use cstlint_ast::{NodeRef, PropertyToken};
use regex::Regex;
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::compile_pattern;
use crate::error::LinterError;

pub const MSG_KEY: &str = "illegal.token.text";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct IllegalTokenTextPropertyOptions {
    /// Pattern searched for in the token text.
    pub format: String,
    pub ignore_case: bool,
    /// Message key or literal message used instead of the default one.
    pub message: String,
}

impl Default for IllegalTokenTextPropertyOptions {
    fn default() -> Self {
        Self {
            format: "^$".to_string(),
            ignore_case: false,
            message: String::new(),
        }
    }
}

/// Reports text tokens containing a match of `format`.
#[derive(Debug)]
pub struct IllegalTokenTextPropertyCheck {
    format: Regex,
    message: Option<String>,
}

impl IllegalTokenTextPropertyCheck {
    pub const NAME: &'static str = "IllegalTokenTextProperty";

    pub fn new(options: IllegalTokenTextPropertyOptions) -> Result<Self, LinterError> {
        Ok(Self {
            format: compile_pattern(Self::NAME, &options.format, options.ignore_case)?,
            message: Some(options.message).filter(|m| !m.is_empty()),
        })
    }
}

impl Check<PropertyToken> for IllegalTokenTextPropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        &[]
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Text]
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        &[]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        if self.format.is_match(node.text()) {
            let key = self.message.as_deref().unwrap_or(MSG_KEY);
            ctx.log(node, key, [self.format.as_str()]);
        }
    }
}
