//! # cstlint_core
//!
//! Check engine for cstlint.
//!
//! This crate provides:
//! - The [`Check`] contract and the per-file [`CheckContext`]
//! - The [`Walker`], which dispatches tree events to registered checks
//! - Built-in checks for property files and XML
//! - Configuration loading
//! - The multi-file [`Linter`], with file discovery and parallel processing
//!
//! ## Example
//!
//! ```rust,no_run
//! use cstlint_core::{Linter, LinterConfig};
//!
//! let config = LinterConfig::from_file(".cstlint.json")?;
//! let linter = Linter::new(config)?;
//!
//! let (results, _failures) = linter.lint_patterns(&["**/*.properties".to_string()])?;
//! for result in results {
//!     println!("{}: {} issues", result.path.display(), result.violations.len());
//! }
//! # Ok::<(), cstlint_core::LinterError>(())
//! ```

mod check;
pub mod checks;
mod config;
mod error;
pub mod file_finder;
mod file_linter;
mod file_text;
mod format;
mod linter;
mod parallel_linter;
mod result;
mod violation;
pub mod walker;

pub use check::{Check, CheckContext, CheckSettings};
pub use config::{CONFIG_FILES, CheckConfig, LinterConfig};
pub use error::LinterError;
pub use file_linter::MAX_FILE_SIZE;
pub use file_text::{FileText, expand_tabs};
pub use format::SourceFormat;
pub use linter::Linter;
pub use parallel_linter::LintFilesResult;
pub use result::{LintResult, LintSummary};
pub use violation::{Severity, Violation};
pub use walker::{FilterEvent, ViolationFilter, Walker};
