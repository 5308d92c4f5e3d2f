//! Single file linting logic.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use cstlint_ast::{AstArena, PropertyToken, XmlToken};
use cstlint_parser::{Parser, PropertyParser, XmlParser};
use tracing::debug;

use crate::checks::{create_property_check, create_xml_check, format_of};
use crate::config::LinterConfig;
use crate::error::LinterError;
use crate::format::SourceFormat;
use crate::result::LintResult;
use crate::walker::{ViolationFilter, Walker};

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// One walker per format, configured from a [`LinterConfig`], plus the
/// arena reused for every file they lint.
pub(crate) struct FormatWalkers {
    arena: AstArena,
    property: Walker<PropertyToken>,
    xml: Walker<XmlToken>,
}

impl FormatWalkers {
    /// Creates and registers every configured check.
    pub(crate) fn new(
        config: &LinterConfig,
        filters: &[Arc<dyn ViolationFilter>],
    ) -> Result<Self, LinterError> {
        config.validate()?;

        let mut property = Walker::new(config.tab_width);
        let mut xml = Walker::new(config.tab_width);

        for check in &config.checks {
            let settings = check.settings(config.severity);
            match format_of(&check.name) {
                Some(SourceFormat::Property) => property.register(
                    create_property_check(&check.name, &check.options)?,
                    settings,
                )?,
                Some(SourceFormat::Xml) => {
                    xml.register(create_xml_check(&check.name, &check.options)?, settings)?
                }
                None => {
                    return Err(LinterError::config(format!(
                        "Unknown check '{}'",
                        check.name
                    )));
                }
            }
        }

        let mut walkers = Self {
            arena: AstArena::new(),
            property,
            xml,
        };
        for filter in filters {
            walkers.add_filter(Arc::clone(filter));
        }
        Ok(walkers)
    }

    pub(crate) fn add_filter(&mut self, filter: Arc<dyn ViolationFilter>) {
        self.property.add_filter(Arc::clone(&filter));
        self.xml.add_filter(filter);
    }

    /// Parses `source` in the format of `path` and walks it.
    pub(crate) fn lint_source(
        &mut self,
        path: &Path,
        source: &str,
    ) -> Result<LintResult, LinterError> {
        let format = SourceFormat::from_path(path).ok_or_else(|| {
            LinterError::file(format!("Unsupported file type: {}", path.display()))
        })?;

        self.arena.reset();
        let arena = &self.arena;
        let violations = match format {
            SourceFormat::Property => {
                let tree = PropertyParser::new().parse(arena, source)?;
                self.property.walk(path, source, &tree)
            }
            SourceFormat::Xml => {
                let tree = XmlParser::new().parse(arena, source)?;
                self.xml.walk(path, source, &tree)
            }
        };

        debug!(
            "Found {} violations in {} ({} arena bytes)",
            violations.len(),
            path.display(),
            self.arena.allocated_bytes()
        );
        Ok(LintResult::new(path.to_path_buf(), violations))
    }
}

/// Reads `path` from disk and lints it.
pub(crate) fn lint_file(path: &Path, walkers: &mut FormatWalkers) -> Result<LintResult, LinterError> {
    debug!("Linting {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    walkers.lint_source(path, &content)
}
