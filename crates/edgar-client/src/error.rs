//! Error types for EDGAR client operations.

use thiserror::Error;

/// Result type for EDGAR client operations.
pub type Result<T> = std::result::Result<T, EdgarError>;

/// Errors that can occur while talking to EDGAR or parsing its responses.
#[derive(Debug, Error)]
pub enum EdgarError {
    /// Network-level failure from the HTTP transport
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from an EDGAR endpoint
    #[error("HTTP {status} fetching {url}")]
    Http {
        /// Requested URL
        url: String,
        /// Response status code
        status: reqwest::StatusCode,
    },

    /// JSON deserialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed filing markup (unbalanced or mismatched tags)
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Data parsing error (dates, numeric fields)
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Submissions response whose parallel arrays disagree in length
    #[error("Data shape error: {0}")]
    DataShape(String),

    /// Invalid URL passed to a download method
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
