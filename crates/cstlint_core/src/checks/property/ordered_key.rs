use std::cmp::Ordering;

use cstlint_ast::{NodeRef, PropertyToken};
use serde::Deserialize;

use crate::check::{Check, CheckContext};

pub const MSG_KEY: &str = "unordered.key";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct OrderedKeyPropertyOptions {
    pub ignore_case: bool,
}

/// Reports a key that sorts before the key declared just above it.
#[derive(Debug, Default)]
pub struct OrderedKeyPropertyCheck {
    ignore_case: bool,
    previous: Option<String>,
}

impl OrderedKeyPropertyCheck {
    pub const NAME: &'static str = "OrderedKeyProperty";

    pub fn new(options: OrderedKeyPropertyOptions) -> Self {
        Self {
            ignore_case: options.ignore_case,
            previous: None,
        }
    }

    fn compare(&self, previous: &str, key: &str) -> Ordering {
        if self.ignore_case {
            previous.to_lowercase().cmp(&key.to_lowercase())
        } else {
            previous.cmp(key)
        }
    }
}

impl Check<PropertyToken> for OrderedKeyPropertyCheck {
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
        self.previous = None;
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        let key = node.leaf_text();
        if let Some(previous) = &self.previous
            && self.compare(previous, &key) == Ordering::Greater
        {
            ctx.log(node, MSG_KEY, [key.as_str(), previous.as_str()]);
        }
        self.previous = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::checks::property::tests::run;

    #[test]
    fn test_compares_with_the_previous_key_only() {
        let source = "b=1\na=2\nc=3\nB=4\n";
        let check = OrderedKeyPropertyCheck::new(OrderedKeyPropertyOptions::default());
        assert_eq!(run(check, source), vec!["2:1 [a, b]", "4:1 [B, c]"]);
    }

    #[test]
    fn test_ignore_case() {
        let source = "alpha=1\nBeta=2\ngamma=3\n";
        let sensitive = OrderedKeyPropertyCheck::new(OrderedKeyPropertyOptions::default());
        assert_eq!(run(sensitive, source), vec!["2:1 [Beta, alpha]"]);

        let insensitive = OrderedKeyPropertyCheck::new(OrderedKeyPropertyOptions { ignore_case: true });
        assert!(run(insensitive, source).is_empty());
    }
}
