//! Crate-level error types.

use thiserror::Error;

use crate::auth::AuthError;

/// Primary error type for CLI-facing operations.
#[derive(Debug, Error)]
pub enum CaddeyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Auth(#[source] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CaddeyError>;
