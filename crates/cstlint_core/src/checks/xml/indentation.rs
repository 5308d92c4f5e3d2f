use cstlint_ast::{NodeRef, TokenKind, XmlToken};
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::indentation::{DEFAULT_INDENTATION, IndentationTracker};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct IndentationXmlOptions {
    /// Require the exact column instead of a minimum.
    pub force_strict_indentation: bool,
    /// Indentation of attributes wrapped onto their own lines.
    pub wrapping_indentation: u32,
    /// Indentation added for each level of element content.
    pub nested_indentation: u32,
}

impl Default for IndentationXmlOptions {
    fn default() -> Self {
        Self {
            force_strict_indentation: false,
            wrapping_indentation: DEFAULT_INDENTATION,
            nested_indentation: DEFAULT_INDENTATION,
        }
    }
}

/// Validates the column of the node starting each line.
///
/// Element content is nested one level deeper than its element. Inside a
/// tag, anything after `<` or `<?xml` that wraps onto a new line is
/// indented by `wrappingIndentation` until the tag closes. Text nodes are
/// never checked.
pub struct IndentationXmlCheck {
    wrapping_indentation: u32,
    nested_indentation: u32,
    tracker: IndentationTracker,
}

impl IndentationXmlCheck {
    pub const NAME: &'static str = "IndentationXml";

    pub fn new(options: IndentationXmlOptions) -> Self {
        Self {
            wrapping_indentation: options.wrapping_indentation,
            nested_indentation: options.nested_indentation,
            tracker: IndentationTracker::new(options.force_strict_indentation),
        }
    }

    fn increase_before(&self, kind: XmlToken) -> u32 {
        match kind {
            XmlToken::Content => self.nested_indentation,
            _ => 0,
        }
    }

    fn increase_after(&self, kind: XmlToken) -> u32 {
        match kind {
            XmlToken::XmlDeclOpen | XmlToken::Open => self.wrapping_indentation,
            _ => 0,
        }
    }

    fn decrease(&self, kind: XmlToken) -> u32 {
        match kind {
            XmlToken::XmlDeclClose | XmlToken::Close | XmlToken::SlashClose => {
                self.wrapping_indentation
            }
            XmlToken::Content => self.nested_indentation,
            _ => 0,
        }
    }

    fn starts_line(ctx: &CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) -> bool {
        match (node.line(), node.column()) {
            (Some(line), Some(column)) => ctx.file().line_start(line) == column,
            _ => false,
        }
    }
}

impl Check<XmlToken> for IndentationXmlCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [XmlToken] {
        XmlToken::ALL
    }

    fn acceptable_tokens(&self) -> &'static [XmlToken] {
        XmlToken::ALL
    }

    fn required_tokens(&self) -> &'static [XmlToken] {
        XmlToken::ALL
    }

    fn begin_tree(&mut self, _ctx: &mut CheckContext<'_, '_>, _root: Option<NodeRef<'_, XmlToken>>) {
        self.tracker.reset();
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        self.tracker.increase(self.increase_before(node.kind()));

        if self.tracker.is_new_line(node.line()) {
            if node.kind() != XmlToken::Text && Self::starts_line(ctx, node) {
                self.tracker.verify(ctx, node);
            }
            self.tracker.mark_line(node.line());
        }

        self.tracker.increase(self.increase_after(node.kind()));
    }

    fn leave_token(&mut self, _ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        self.tracker.decrease(self.decrease(node.kind()));
    }
}
