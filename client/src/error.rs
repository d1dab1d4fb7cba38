//! Error handling for the Cafe Ledger sync client
//!
//! I/O failures are surfaced to the caller; a failed mutating request leaves
//! the local snapshot unchanged and the next full reload reconciles.

use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-2xx status; `message` is taken from the
    /// response body when it carries one
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<&'static str> for ClientError {
    fn from(message: &'static str) -> Self {
        ClientError::Validation(message.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
