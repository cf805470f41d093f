// Error types for repodeck.
// Covers input validation, GitHub API failures, and persistence errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepodeckError {
    #[error("{0}")]
    Validation(String),

    #[error("Repository already tracked: {0}")]
    Duplicate(String),

    #[error("Another repository is already being added")]
    Busy,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RepodeckError {
    /// Whether this error came from talking to the remote API
    /// (as opposed to a rejected input or local storage).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            RepodeckError::Network(_)
                | RepodeckError::Api(_)
                | RepodeckError::RateLimited { .. }
                | RepodeckError::Http { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RepodeckError>;
