//! Core linter engine.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::config::LinterConfig;
use crate::error::LinterError;
use crate::file_finder::FileFinder;
use crate::file_linter::{FormatWalkers, lint_file};
use crate::parallel_linter::{self, LintFilesResult};
use crate::result::LintResult;
use crate::walker::ViolationFilter;

/// The core linter engine.
///
/// Orchestrates file discovery, parsing and check execution. All
/// configuration problems surface from [`Linter::new`]; afterwards only
/// individual files can fail.
pub struct Linter {
    /// Linter configuration.
    config: LinterConfig,
    /// Include and exclude patterns.
    finder: FileFinder,
    /// Filters applied to every walk.
    filters: Vec<Arc<dyn ViolationFilter>>,
    /// Walkers for the sequential entry points.
    walkers: Mutex<FormatWalkers>,
}

impl Linter {
    /// Creates a new linter with the given configuration.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let finder = FileFinder::new(&config.include, &config.exclude)?;
        let walkers = FormatWalkers::new(&config, &[])?;

        info!("Configured {} checks", config.checks.len());

        Ok(Self {
            config,
            finder,
            filters: Vec::new(),
            walkers: Mutex::new(walkers),
        })
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Adds a filter deciding which violations are reported.
    pub fn add_filter(&mut self, filter: Arc<dyn ViolationFilter>) {
        self.walkers
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .add_filter(Arc::clone(&filter));
        self.filters.push(filter);
    }

    /// Lints in-memory `source` as if it were the content of `path`.
    pub fn lint_source(&self, path: impl AsRef<Path>, source: &str) -> Result<LintResult, LinterError> {
        let mut walkers = self
            .walkers
            .lock()
            .map_err(|_| LinterError::Internal("Walker mutex poisoned".to_string()))?;
        walkers.lint_source(path.as_ref(), source)
    }

    /// Lints a single file from disk.
    pub fn lint_file(&self, path: impl AsRef<Path>) -> Result<LintResult, LinterError> {
        let mut walkers = self
            .walkers
            .lock()
            .map_err(|_| LinterError::Internal("Walker mutex poisoned".to_string()))?;
        lint_file(path.as_ref(), &mut walkers)
    }

    /// Lints files matching the given patterns.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_patterns(&self, patterns: &[String]) -> LintFilesResult {
        let base_dir = self
            .config
            .base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let files = self.finder.discover_files(patterns, &base_dir)?;
        self.lint_files(&files)
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        debug!("Linting {} files", paths.len());
        parallel_linter::lint_files(paths, &self.config, &self.filters)
    }
}
