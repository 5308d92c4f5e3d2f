use cstlint_ast::{NodeRef, PropertyToken};
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::token_kinds;
use crate::error::LinterError;

pub const MSG_KEY: &str = "illegal.comment.text";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct IllegalCommentTextPropertyOptions {
    /// Token names allowed to start a comment.
    pub allowed_comments: Vec<String>,
}

impl Default for IllegalCommentTextPropertyOptions {
    fn default() -> Self {
        Self {
            allowed_comments: vec!["POUND".to_string()],
        }
    }
}

/// Restricts the character a comment may start with.
#[derive(Debug)]
pub struct IllegalCommentTextPropertyCheck {
    allowed: Vec<PropertyToken>,
}

impl IllegalCommentTextPropertyCheck {
    pub const NAME: &'static str = "IllegalCommentTextProperty";

    pub fn new(options: IllegalCommentTextPropertyOptions) -> Result<Self, LinterError> {
        Ok(Self {
            allowed: token_kinds(&options.allowed_comments)?,
        })
    }
}

impl Check<PropertyToken> for IllegalCommentTextPropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Comment]
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Comment]
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Comment]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        if let Some(marker) = node.first_child()
            && !self.allowed.contains(&marker.kind())
        {
            ctx.log(node, MSG_KEY, [marker.text()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    use crate::checks::property::tests::run;

    #[test]
    fn test_exclamation_rejected_by_default() {
        let check =
            IllegalCommentTextPropertyCheck::new(IllegalCommentTextPropertyOptions::default())
                .unwrap();
        let source = "# fine\n! legacy\nkey=value\n  ! indented\n";
        assert_eq!(run(check, source), vec!["2:1 [!]", "4:3 [!]"]);
    }

    #[test]
    fn test_both_markers_allowed() {
        let check = IllegalCommentTextPropertyCheck::new(IllegalCommentTextPropertyOptions {
            allowed_comments: vec!["POUND".to_string(), "EXCLAMATION".to_string()],
        })
        .unwrap();
        assert!(run(check, "# a\n! b\n").is_empty());
    }
}
