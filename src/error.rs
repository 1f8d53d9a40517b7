//! Error types for buildinfo

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur outside the extraction itself
///
/// Extraction and rendering never fail; these cover loading raw dumps and
/// configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid raw build info: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No build metadata is embedded in this binary")]
    NotEmbedded,
}

pub type Result<T> = std::result::Result<T, Error>;
