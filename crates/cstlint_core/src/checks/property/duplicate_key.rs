use std::collections::HashSet;

use cstlint_ast::{NodeRef, PropertyToken};

use crate::check::{Check, CheckContext};

pub const MSG_KEY: &str = "duplicate.key";

/// Reports a key that was already declared earlier in the file.
#[derive(Debug, Default)]
pub struct DuplicateKeyPropertyCheck {
    keys: HashSet<String>,
}

impl DuplicateKeyPropertyCheck {
    pub const NAME: &'static str = "DuplicateKeyProperty";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Check<PropertyToken> for DuplicateKeyPropertyCheck {
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

    fn begin_tree(&mut self, _ctx: &mut CheckContext<'_, '_>, _root: Option<NodeRef<'_, PropertyToken>>) {
        self.keys.clear();
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        let key = node.leaf_text();
        if !self.keys.insert(key.clone()) {
            ctx.log(node, MSG_KEY, [key]);
        }
    }
}
