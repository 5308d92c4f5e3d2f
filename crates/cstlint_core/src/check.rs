//! The check capability contract and the context handed to every callback.

use std::collections::{BTreeSet, HashMap};

use cstlint_ast::{NodeRef, TokenKind};

use crate::file_text::FileText;
use crate::violation::{Severity, Violation};

/// A unit of analysis over the nodes of one format.
///
/// The walker calls [`Check::visit_token`] when it enters a node of a kind
/// the check is registered for and [`Check::leave_token`] once all of that
/// node's children have been left. Checks never mutate the tree; they report
/// through the [`CheckContext`] passed to each callback.
///
/// A check instance is used by one walker, and a walker by one thread.
/// State kept in the check between callbacks is per file once
/// [`Check::begin_tree`] resets it.
pub trait Check<K: TokenKind>: Send {
    /// Stable name, used for configuration and ordering.
    fn name(&self) -> &'static str;

    /// Kinds the check listens to when the user configures none.
    fn default_tokens(&self) -> &'static [K];

    /// Kinds the user may configure the check for.
    fn acceptable_tokens(&self) -> &'static [K];

    /// Kinds the check is always registered for, whatever the user
    /// configures.
    fn required_tokens(&self) -> &'static [K];

    /// Called once when the check is registered.
    fn init(&mut self) {}

    /// Called once when the check's walker is dropped.
    fn destroy(&mut self) {}

    /// Called before the walk of each file. `root` is `None` for a file
    /// without content.
    fn begin_tree(&mut self, _ctx: &mut CheckContext<'_, '_>, _root: Option<NodeRef<'_, K>>) {}

    fn visit_token(&mut self, _ctx: &mut CheckContext<'_, '_>, _node: NodeRef<'_, K>) {}

    fn leave_token(&mut self, _ctx: &mut CheckContext<'_, '_>, _node: NodeRef<'_, K>) {}

    /// Called after the walk of each file.
    fn finish_tree(&mut self, _ctx: &mut CheckContext<'_, '_>, _root: Option<NodeRef<'_, K>>) {}
}

/// User settings of one registered check.
#[derive(Debug, Clone, Default)]
pub struct CheckSettings {
    pub id: Option<String>,
    pub severity: Severity,
    /// Token names overriding the check's default tokens.
    pub tokens: Vec<String>,
    /// Message templates by message key.
    pub messages: HashMap<String, String>,
}

/// Per-file state handed to a check callback.
pub struct CheckContext<'c, 's> {
    check_name: &'static str,
    settings: &'c CheckSettings,
    file: &'c FileText<'s>,
    tab_width: usize,
    violations: &'c mut BTreeSet<Violation>,
}

impl<'c, 's> CheckContext<'c, 's> {
    pub(crate) fn new(
        check_name: &'static str,
        settings: &'c CheckSettings,
        file: &'c FileText<'s>,
        tab_width: usize,
        violations: &'c mut BTreeSet<Violation>,
    ) -> Self {
        Self {
            check_name,
            settings,
            file,
            tab_width,
            violations,
        }
    }

    pub fn file(&self) -> &FileText<'s> {
        self.file
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Column of `node` with tabs expanded (0-indexed).
    pub fn expanded_column<K: TokenKind>(&self, node: NodeRef<'_, K>) -> usize {
        match (node.line(), node.column()) {
            (Some(line), Some(column)) => self.file.expanded_column(line, column, self.tab_width),
            _ => 0,
        }
    }

    /// Reports a violation located at `node`.
    pub fn log<K, I, S>(&mut self, node: NodeRef<'_, K>, key: &str, args: I)
    where
        K: TokenKind,
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let line = node.line().unwrap_or(0);
        let column_raw = node.column().unwrap_or(0);
        let column = 1 + self.file.expanded_column(line, column_raw, self.tab_width) as u32;
        let violation = self
            .violation(key, line, column, args)
            .with_token(node.kind().name(), column_raw);
        self.violations.insert(violation);
    }

    /// Reports a violation for a whole line.
    pub fn log_line<I, S>(&mut self, line: u32, key: &str, args: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let violation = self.violation(key, line, 0, args);
        self.violations.insert(violation);
    }

    fn violation<I, S>(&self, key: &str, line: u32, column: u32, args: I) -> Violation
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Violation::new(self.check_name, key, line, column)
            .with_args(args)
            .with_severity(self.settings.severity)
            .with_check_id(self.settings.id.clone())
            .with_custom_message(self.settings.messages.get(key).cloned())
    }
}
