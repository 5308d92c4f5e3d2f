use cstlint_ast::{NodeRef, PropertyToken};
use regex::Regex;
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::compile_pattern;
use crate::error::LinterError;

pub const MSG_KEY: &str = "name.invalidPattern";

const DEFAULT_FORMAT: &str = r"^[a-z][a-zA-Z0-9]*(\.[a-z][a-zA-Z0-9]*)*$";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KeyNamePropertyOptions {
    pub format: String,
}

impl Default for KeyNamePropertyOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Reports keys that do not match `format`.
#[derive(Debug)]
pub struct KeyNamePropertyCheck {
    format: Regex,
}

impl KeyNamePropertyCheck {
    pub const NAME: &'static str = "KeyNameProperty";

    pub fn new(options: KeyNamePropertyOptions) -> Result<Self, LinterError> {
        Ok(Self {
            format: compile_pattern(Self::NAME, &options.format, false)?,
        })
    }
}

impl Check<PropertyToken> for KeyNamePropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Key]
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Key]
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Key]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        let key = node.leaf_text();
        if !self.format.is_match(&key) {
            ctx.log(node, MSG_KEY, [key.as_str(), self.format.as_str()]);
        }
    }
}
