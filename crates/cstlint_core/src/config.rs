//! Linter configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::LinterError;
use crate::check::CheckSettings;
use crate::violation::Severity;

/// File names searched by [`LinterConfig::discover`], in order.
pub const CONFIG_FILES: &[&str] = &[".cstlint.jsonc", ".cstlint.json"];

/// Configuration for the linter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LinterConfig {
    /// Columns per tab stop when expanding tabs.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Severity of checks that do not set their own.
    #[serde(default)]
    pub severity: Severity,

    /// File patterns to include.
    #[serde(default)]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Checks to run, in configuration order.
    #[serde(default)]
    pub checks: Vec<CheckConfig>,

    /// Directory of the configuration file, used as the base for file
    /// discovery.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_tab_width() -> usize {
    4
}

/// Configuration of a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CheckConfig {
    /// Name of a built-in check, e.g. `IndentationProperty`.
    pub name: String,

    /// Distinguishes two instances of the same check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Token names overriding the check's default tokens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,

    /// Message templates by message key.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<String, String>,

    /// Check specific options.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl CheckConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            severity: None,
            tokens: Vec::new(),
            messages: HashMap::new(),
            options: Value::Null,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Walker settings, falling back to `default_severity`.
    pub fn settings(&self, default_severity: Severity) -> CheckSettings {
        CheckSettings {
            id: self.id.clone(),
            severity: self.severity.unwrap_or(default_severity),
            tokens: self.tokens.clone(),
            messages: self.messages.clone(),
        }
    }
}

impl LinterConfig {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self {
            tab_width: default_tab_width(),
            severity: Severity::default(),
            include: Vec::new(),
            exclude: Vec::new(),
            checks: Vec::new(),
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.cstlint.jsonc`, `.cstlint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from JSON text. Comments and trailing commas
    /// are accepted.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        let config: Self = serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Finds the configuration file in `dir`, if any.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Checks constraints serde cannot express.
    pub fn validate(&self) -> Result<(), LinterError> {
        if self.tab_width == 0 {
            return Err(LinterError::config("tabWidth must be at least 1"));
        }
        Ok(())
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}
