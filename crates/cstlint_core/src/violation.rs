//! Violation types for lint results.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level for violations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// One reported check failure.
///
/// Violations sort by position first, then by the reporting check and the
/// message, so two walks over the same tree report them in the same order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Line of the offending node (1-indexed).
    pub line: u32,

    /// Column with tabs expanded (1-indexed), or 0 for line-only violations.
    pub column: u32,

    /// Column as a character offset into the line (0-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_raw: Option<u32>,

    /// Name of the node kind the violation was reported on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'static str>,

    /// Message key, e.g. `indentation.error`.
    pub key: String,

    /// Message arguments, substituted for `{0}`, `{1}`, ...
    pub args: Vec<String>,

    pub severity: Severity,

    /// Name of the check that reported this violation.
    pub check_name: &'static str,

    /// User-assigned id of the reporting check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,

    /// Message template configured for this key, replacing the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

impl Violation {
    /// Creates a new violation with error severity and no arguments.
    pub fn new(check_name: &'static str, key: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            column_raw: None,
            token: None,
            key: key.into(),
            args: Vec::new(),
            severity: Severity::Error,
            check_name,
            check_id: None,
            custom_message: None,
        }
    }

    /// Sets the message arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.args = args.into_iter().map(|arg| arg.to_string()).collect();
        self
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the id of the reporting check.
    pub fn with_check_id(mut self, id: Option<String>) -> Self {
        self.check_id = id;
        self
    }

    /// Records the node the violation was reported on.
    pub fn with_token(mut self, token: &'static str, column_raw: u32) -> Self {
        self.token = Some(token);
        self.column_raw = Some(column_raw);
        self
    }

    /// Sets a custom message template.
    pub fn with_custom_message(mut self, message: Option<String>) -> Self {
        self.custom_message = message;
        self
    }

    /// Renders the human readable message.
    pub fn message(&self) -> String {
        let template = self
            .custom_message
            .as_deref()
            .or_else(|| builtin_template(&self.key))
            .unwrap_or(&self.key);
        format_message(template, &self.args)
    }

    fn sort_key(&self) -> (u32, u32, &str, Option<&str>, &str, &[String]) {
        (
            self.line,
            self.column,
            self.check_name,
            self.check_id.as_deref(),
            &self.key,
            &self.args,
        )
    }
}

impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Violation {}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Violation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

fn builtin_template(key: &str) -> Option<&'static str> {
    let template = match key {
        "indentation.error" => "Line is indented to column {0}, expected column {1}.",
        "duplicate.key" => "Duplicate key '{0}'.",
        "unordered.key" => "Key '{0}' should come before '{1}'.",
        "name.invalidPattern" => "Name '{0}' must match pattern '{1}'.",
        "missing.assignment" => "Key is missing an assignment.",
        "illegal.assignment.text" => "Assignment '{0}' is not allowed.",
        "illegal.comment.text" => "Comment marker '{0}' is not allowed.",
        "illegal.token" => "Using '{0}' is not allowed.",
        "illegal.token.text" => "Token text matches the illegal pattern '{0}'.",
        "empty.content" => "Element '{0}' has no content, use an empty element instead.",
        "attribute.order" => "Attributes are not in the order {0}.",
        _ => return None,
    };
    Some(template)
}

/// Replaces `{n}` placeholders with the matching argument. Placeholders
/// without an argument are kept as written.
fn format_message(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let argument = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            Some((args.get(index)?, close))
        });
        match argument {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
