//! Error types for HTML to Markdown conversion

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error types for conversion and configuration
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The HTML input could not be read by the parser
    #[error("Failed to parse HTML input: {0}")]
    Parse(#[source] std::io::Error),

    /// A node could not be serialized back to HTML
    #[error("Failed to serialize <{tag}> as HTML: {message}")]
    Serialize { tag: String, message: String },

    /// An options file could not be read
    #[error("Failed to read options file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options JSON was malformed
    #[error("Invalid options: {0}")]
    Config(#[from] serde_json::Error),

    /// An option value was rejected by validation
    #[error("Invalid option '{name}': {message}")]
    InvalidOption { name: &'static str, message: String },
}
