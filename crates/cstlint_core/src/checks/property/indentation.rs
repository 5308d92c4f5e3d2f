use cstlint_ast::{NodeRef, PropertyToken, TokenKind};
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::indentation::{DEFAULT_INDENTATION, IndentationTracker};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct IndentationPropertyOptions {
    /// Require the exact column instead of a minimum.
    pub force_strict_indentation: bool,
    /// Indentation of continuation lines of a value.
    pub wrapping_indentation: u32,
}

impl Default for IndentationPropertyOptions {
    fn default() -> Self {
        Self {
            force_strict_indentation: false,
            wrapping_indentation: DEFAULT_INDENTATION,
        }
    }
}

/// Validates the column of the first leaf on every line.
///
/// Keys and comments belong at column 0; continuation lines of a value are
/// indented by `wrappingIndentation`. Whitespace leaves are never checked,
/// so leading whitespace is judged by the node that follows it.
pub struct IndentationPropertyCheck {
    wrapping_indentation: u32,
    tracker: IndentationTracker,
}

impl IndentationPropertyCheck {
    pub const NAME: &'static str = "IndentationProperty";

    pub fn new(options: IndentationPropertyOptions) -> Self {
        Self {
            wrapping_indentation: options.wrapping_indentation,
            tracker: IndentationTracker::new(options.force_strict_indentation),
        }
    }

    fn increase_before(&self, kind: PropertyToken) -> u32 {
        match kind {
            PropertyToken::Value => self.wrapping_indentation,
            _ => 0,
        }
    }

    fn decrease(&self, kind: PropertyToken) -> u32 {
        match kind {
            PropertyToken::Value => self.wrapping_indentation,
            _ => 0,
        }
    }
}

impl Check<PropertyToken> for IndentationPropertyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [PropertyToken] {
        PropertyToken::ALL
    }

    fn acceptable_tokens(&self) -> &'static [PropertyToken] {
        PropertyToken::ALL
    }

    fn required_tokens(&self) -> &'static [PropertyToken] {
        PropertyToken::ALL
    }

    fn begin_tree(&mut self, _ctx: &mut CheckContext<'_, '_>, _root: Option<NodeRef<'_, PropertyToken>>) {
        self.tracker.reset();
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        self.tracker.increase(self.increase_before(node.kind()));

        if self.tracker.is_new_line(node.line())
            && !node.has_children()
            && node.kind() != PropertyToken::Ws
        {
            self.tracker.verify(ctx, node);
            self.tracker.mark_line(node.line());
        }
    }

    fn leave_token(&mut self, _ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, PropertyToken>) {
        self.tracker.decrease(self.decrease(node.kind()));
    }
}
