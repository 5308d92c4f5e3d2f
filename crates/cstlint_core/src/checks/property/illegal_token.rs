use cstlint_ast::{NodeRef, PropertyToken, TokenKind};

use crate::check::{Check, CheckContext};
use crate::checks::escape_control_chars;

pub const MSG_KEY: &str = "illegal.token";

/// Reports every node of the configured kinds. Registered for nothing
/// unless `tokens` is set.
#[derive(Debug, Default)]
pub struct IllegalTokenPropertyCheck;

impl IllegalTokenPropertyCheck {
    pub const NAME: &'static str = "IllegalTokenProperty";
}

impl Check<PropertyToken> for IllegalTokenPropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        &[]
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        PropertyToken::ALL
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        &[]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        let text = match node.kind() {
            PropertyToken::Comment => escape_control_chars(node.text()),
            _ => node.text().to_string(),
        };
        ctx.log(node, MSG_KEY, [text]);
    }
}
