use thiserror::Error;

use crate::error::CaddeyError;

/// Errors produced by the device-authorization flow.
///
/// Every terminal state of the polling state machine maps to exactly one
/// variant here (or to a successful [`crate::auth::Token`]).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport-level failure. Retryable.
    #[error("network error: {0}")]
    Network(String),
    /// Malformed or unexpected provider response. Not retryable within the
    /// same attempt.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// The user declined the authorization request.
    #[error("authorization denied by user")]
    AuthorizationDenied,
    /// The device code's validity window elapsed before authorization.
    #[error("device code expired before authorization completed")]
    DeviceCodeExpired,
    /// Retries exhausted or the provider returned an unrecognized error.
    #[error("authentication failed: {source}")]
    AuthenticationFailed {
        #[source]
        source: Box<AuthError>,
    },
    /// A refresh token was rejected by the provider.
    #[error("expired or invalid grant")]
    InvalidGrant,
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Whether the retry policy may re-attempt after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<toml::de::Error> for AuthError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::ser::Error> for AuthError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<AuthError> for CaddeyError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Configuration(msg) => CaddeyError::Configuration(msg),
            other => CaddeyError::Auth(other),
        }
    }
}
