use std::path::PathBuf;

use thiserror::Error;

/// Failures outside of Markdown parsing.
///
/// Problems inside a document are reported as diagnostics, never as errors.
#[derive(Error, Debug)]
pub enum StatementError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid statement JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to set up logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
