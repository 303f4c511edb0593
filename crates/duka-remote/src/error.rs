//! # Remote Error Types
//!
//! Errors from the remote store client and the replication worker.

use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote error type covering HTTP transport and API-level failures.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (DNS, connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status} for {path}")]
    Status { status: u16, path: String },

    /// Login endpoint rejected the PIN.
    #[error("Login rejected")]
    LoginRejected,

    /// Input rejected locally before any request was made.
    #[error("Invalid input: {0}")]
    Invalid(#[from] duka_core::ValidationError),

    /// Response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    BadResponse(String),
}

impl RemoteError {
    /// True when the operation may succeed if attempted again later.
    ///
    /// Transport failures and server-side statuses are transient; a
    /// rejected PIN or a 4xx is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Http(_) => true,
            RemoteError::Status { status, .. } => *status >= 500,
            RemoteError::LoginRejected => false,
            RemoteError::Invalid(_) => false,
            RemoteError::BadResponse(_) => false,
        }
    }
}
