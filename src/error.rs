//! Error types for StreamPanel
//!
//! All errors in the core are converted to `AppError`. Repository callers
//! never let an error escape as a crash: each failure becomes a single
//! user-visible notice carrying the store's message text verbatim
//! (see `service::Notice`).

use thiserror::Error;

/// Application-wide error type
///
/// The taxonomy mirrors the three failure classes the UI distinguishes:
/// authentication, client-side validation, and store/transport failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,

    /// Authentication failure (bad credentials, expired session)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// No session where one is required
    #[error("Authentication required")]
    Unauthorized,

    /// Validation error (required field missing or malformed)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store error (network or authorization failure from a CRUD call)
    ///
    /// The message is the store's own text, surfaced to the user unchanged.
    #[error("{0}")]
    Store(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Store(format!("malformed row: {err}"))
    }
}

impl AppError {
    /// Message shown to the user in a transient notice.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
