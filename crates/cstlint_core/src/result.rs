//! Lint result types.

use std::path::PathBuf;

use serde::Serialize;

use crate::violation::{Severity, Violation};

/// Result of linting a single file.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    /// Path to the linted file.
    pub path: PathBuf,

    /// Violations found in the file, in report order.
    pub violations: Vec<Violation>,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(path: PathBuf, violations: Vec<Violation>) -> Self {
        Self { path, violations }
    }

    /// Returns true if any violation has error severity.
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns the number of error-severity violations.
    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }
}

/// Summary of linting multiple files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LintSummary {
    /// Total files processed.
    pub files_checked: usize,

    /// Total violations found.
    pub total_violations: usize,

    /// Violations with error severity.
    pub errors: usize,

    /// Files with at least one error.
    pub files_with_errors: usize,
}

impl LintSummary {
    /// Creates a summary from results.
    pub fn from_results(results: &[LintResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            summary.files_checked += 1;
            summary.total_violations += result.violations.len();
            summary.errors += result.error_count();
            if result.has_errors() {
                summary.files_with_errors += 1;
            }
        }

        summary
    }
}
