use cstlint_ast::{NodeRef, PropertyToken};
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::token_kinds;
use crate::error::LinterError;

pub const MSG_KEY: &str = "illegal.assignment.text";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct IllegalAssignmentTextPropertyOptions {
    /// Token names allowed as the separator.
    pub allowed_assignments: Vec<String>,
}

impl Default for IllegalAssignmentTextPropertyOptions {
    fn default() -> Self {
        Self {
            allowed_assignments: vec!["EQUALS".to_string()],
        }
    }
}

/// Restricts which separator may sit between a key and its value.
///
/// Violations point at the separator. A separator made only of whitespace
/// is reported as the whitespace itself.
#[derive(Debug)]
pub struct IllegalAssignmentTextPropertyCheck {
    allowed: Vec<PropertyToken>,
}

impl IllegalAssignmentTextPropertyCheck {
    pub const NAME: &'static str = "IllegalAssignmentTextProperty";

    pub fn new(options: IllegalAssignmentTextPropertyOptions) -> Result<Self, LinterError> {
        Ok(Self {
            allowed: token_kinds(&options.allowed_assignments)?,
        })
    }
}

impl Check<PropertyToken> for IllegalAssignmentTextPropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Assignment]
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Assignment]
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        &[PropertyToken::Assignment]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        let separator = node
            .children()
            .find(|child| child.kind() != PropertyToken::Ws)
            .or_else(|| node.first_child());
        if let Some(separator) = separator
            && !self.allowed.contains(&separator.kind())
        {
            ctx.log(separator, MSG_KEY, [separator.text()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::checks::property::tests::run;

    fn check(allowed: &[&str]) -> IllegalAssignmentTextPropertyCheck {
        IllegalAssignmentTextPropertyCheck::new(IllegalAssignmentTextPropertyOptions {
            allowed_assignments: allowed.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_default_allows_equals_only() {
        let source = "a=1\nb : 2\nc 3\nd\t= 4\n";
        assert_eq!(
            run(check(&["EQUALS"]), source),
            vec!["2:3 [:]", "3:2 [ ]"]
        );
    }

    #[test]
    fn test_colon_and_whitespace_allowed() {
        let source = "a=1\nb : 2\nc 3\n";
        assert_eq!(run(check(&["COLON", "WS"]), source), vec!["1:2 [=]"]);
    }

    #[test]
    fn test_violation_is_reported_at_the_separator() {
        assert_eq!(run(check(&["EQUALS"]), "key  : v\n"), vec!["1:6 [:]"]);
        assert_eq!(run(check(&["EQUALS"]), "key:v\n"), vec!["1:4 [:]"]);
    }

    #[test]
    fn test_declaration_without_separator_is_ignored() {
        assert!(run(check(&["EQUALS"]), "lonely\n").is_empty());
    }
}
