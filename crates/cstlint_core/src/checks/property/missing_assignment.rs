use cstlint_ast::{NodeRef, PropertyToken};

use crate::check::{Check, CheckContext};

pub const MSG_KEY: &str = "missing.assignment";

/// Reports declarations without a separator between key and value.
#[derive(Debug, Default)]
pub struct MissingAssignmentPropertyCheck;

impl MissingAssignmentPropertyCheck {
    pub const NAME: &'static str = "MissingAssignmentProperty";
}

impl Check<PropertyToken> for MissingAssignmentPropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Decl]
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Decl]
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Decl]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        if node.find_first(PropertyToken::Assignment).is_none() {
            ctx.log(node, MSG_KEY, std::iter::empty::<&str>());
        }
    }
}
