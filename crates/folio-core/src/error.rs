//! Error types for collection loading and configuration.

use thiserror::Error;

/// Result type for source fetches and collection parsing.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while fetching or parsing one collection document.
///
/// These never reach repository callers: a failed load is logged and the
/// collection is cached as empty.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Local file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// No document is registered under this path.
    #[error("no collection document at {0}")]
    NotFound(String),

    /// Document is not valid JSON or does not match the entity shape.
    #[error("malformed collection document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while building [`crate::FolioConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered configuration could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A `[collections]` key does not name a known collection.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}
