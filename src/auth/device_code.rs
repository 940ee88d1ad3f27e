use chrono::{DateTime, Utc};

use super::Token;

/// An in-flight device-authorization grant.
///
/// Returned by [`crate::auth::DeviceAuthClient::request_device_code`] and
/// consumed by the polling loop. At most one grant is active per
/// authentication attempt; once a terminal poll outcome is reached the grant
/// is spent and a fresh request must be made to retry.
#[derive(Debug, Clone)]
pub struct DeviceAuthorization {
    pub client_id: String,
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub interval_secs: u64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl DeviceAuthorization {
    /// Whether the grant's validity window has elapsed.
    ///
    /// Strictly greater-than: a poll landing exactly at the deadline still
    /// runs, the next one does not.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Outcome of a single token-endpoint poll.
#[derive(Debug, Clone)]
pub enum DevicePoll {
    /// The user has not acted yet; keep polling.
    Pending,
    /// The provider asked for a longer interval before the next poll.
    SlowDown,
    /// The user authorized; the token is ready.
    Authorized { token: Token },
    /// The user declined the request.
    Denied,
    /// The device code expired before the user authorized.
    Expired,
}
