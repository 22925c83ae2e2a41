//! Tool configuration, read from `judge-statement.toml`.
//!
//! ```toml
//! [statement]
//! title = "A+B Problem"
//! report_format = "json"
//! export_file_name = "description.md"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StatementError;
use crate::exporter::DEFAULT_EXPORT_FILE_NAME;

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "judge-statement.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementConfig {
    /// Problem title the imported documents are checked against
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub report_format: ReportFormat,

    /// File name used when exporting without an explicit output path
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            title: None,
            report_format: ReportFormat::default(),
            export_file_name: default_export_file_name(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    statement: Option<StatementConfig>,
}

impl StatementConfig {
    /// Load the `[statement]` table.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and the defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, StatementError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let config = Self::parse(&content).map_err(|source| StatementError::Config {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.statement.unwrap_or_default())
    }
}
