//! Parallel file linting logic.

use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::warn;

use crate::config::LinterConfig;
use crate::error::LinterError;
use crate::file_linter::{FormatWalkers, lint_file};
use crate::result::LintResult;
use crate::walker::ViolationFilter;

pub type LintFilesResult = Result<(Vec<LintResult>, Vec<(PathBuf, LinterError)>), LinterError>;

/// Lints `paths` on the rayon pool. Every worker builds its own walkers,
/// so no check instance is shared between threads.
pub fn lint_files(
    paths: &[PathBuf],
    config: &LinterConfig,
    filters: &[Arc<dyn ViolationFilter>],
) -> LintFilesResult {
    let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
        .par_iter()
        .map_init(
            || FormatWalkers::new(config, filters),
            |walkers, path| {
                let walkers = match walkers.as_mut() {
                    Ok(w) => w,
                    Err(e) => {
                        return Err((
                            path.clone(),
                            LinterError::Internal(format!("Failed to initialize checks: {}", e)),
                        ));
                    }
                };

                lint_file(path, walkers).map_err(|e| (path.clone(), e))
            },
        )
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(lint_result) => successes.push(lint_result),
            Err((path, error)) => {
                warn!("Failed to lint {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }

    Ok((successes, failures))
}
