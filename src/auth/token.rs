use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access token returned by a completed device-authorization flow.
///
/// `access_token` is the provider-supplied credential, byte-for-byte; the
/// client applies no transformation. Ownership passes to the caller once the
/// flow returns — the client keeps nothing unless a token store was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: Option<Vec<String>>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Token {
    /// Whether the token's validity window has elapsed.
    ///
    /// Tokens without an `expires_at` are treated as still valid.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| expires <= Utc::now())
            .unwrap_or(false)
    }
}
