//! Error types for contribstreak-core
//!
//! The analytics functions are total and never return these; only the
//! sources, configuration and logging setup can fail.

use thiserror::Error;

/// Main error type for the contribstreak-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Fetching one account's series failed
    #[error("fetch error for {account}: {message}")]
    Fetch { account: String, message: String },
}

impl Error {
    /// Build a fetch error for `account`.
    pub fn fetch(account: &str, message: impl Into<String>) -> Self {
        Error::Fetch {
            account: account.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for contribstreak-core
pub type Result<T> = std::result::Result<T, Error>;
