//! Error types for the excerpt toolkit.
//!
//! Text helpers (stripping, sentence trimming, markup formatting) are total
//! and never fail. Errors only come from input validation, file loading and
//! the network-backed gravatar lookup.

use thiserror::Error;

/// Main error type for the excerpt library.
#[derive(Debug, Error)]
pub enum ExcerptError {
    /// E-mail address that cannot belong to a gravatar account.
    #[error("Invalid e-mail address: '{0}'. Expected something like name@example.com")]
    InvalidEmail(String),

    /// Sentence count outside the accepted range.
    #[error("Invalid sentence count: {count}. Expected a value between 1 and {max}")]
    InvalidSentenceCount { count: usize, max: usize },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// All retry attempts for a request failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Gravatar lookup failed for a specific hash.
    #[error("Gravatar lookup failed for {hash}: {source}")]
    GravatarLookup {
        hash: String,
        #[source]
        source: Box<ExcerptError>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for excerpt operations.
pub type Result<T> = std::result::Result<T, ExcerptError>;
