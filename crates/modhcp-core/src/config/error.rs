//! # Configuration Errors
//!
//! [`ConfigError`] is everything that can go wrong between locating the
//! configuration document and handing a validated [`Config`](super::Config)
//! to bootstrap. All of it is fatal to startup.
use std::error::Error as StdError;
use std::path::PathBuf;

use crate::config::ConfigFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration file found, searched: {}", format_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown or unsupported config format for path: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to deserialize {format} from {origin}: {source}")]
    Deserialize {
        format: ConfigFormat,
        origin: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
