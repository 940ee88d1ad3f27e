//! Configuration (env vars, with a `.env` file loaded when present).

use crate::error::CaddeyError;

const DEFAULT_DEVICE_ENDPOINT: &str =
    "https://auth.caddey.ai/realms/caddey/protocol/openid-connect/auth/device";
const DEFAULT_TOKEN_ENDPOINT: &str =
    "https://auth.caddey.ai/realms/caddey/protocol/openid-connect/token";
const DEFAULT_SCOPE: &str = "openid";

/// Resolved configuration for the Caddey CLI.
///
/// Built from the environment (`CADDEY_CLIENT_ID`, `CADDEY_SCOPES`,
/// `CADDEY_DEVICE_URL`, `CADDEY_TOKEN_URL`) or assembled directly in code.
#[derive(Debug, Clone)]
pub struct CaddeyConfig {
    pub client_id: String,
    pub scopes: Vec<String>,
    pub device_endpoint: String,
    pub token_endpoint: String,
}

impl CaddeyConfig {
    /// Config for `client_id` with default endpoints and scopes.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            scopes: vec![DEFAULT_SCOPE.to_string()],
            device_endpoint: DEFAULT_DEVICE_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
        }
    }

    /// Load from environment variables, reading `.env` first if present.
    ///
    /// `CADDEY_CLIENT_ID` is required; `CADDEY_SCOPES` is a space-separated
    /// list defaulting to `openid`.
    pub fn from_env() -> Result<Self, CaddeyError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let client_id = std::env::var("CADDEY_CLIENT_ID").map_err(|_| {
            CaddeyError::Configuration(
                "CADDEY_CLIENT_ID not set; add it to your environment or a .env file".to_string(),
            )
        })?;

        let mut config = Self::new(client_id);
        if let Ok(scopes) = std::env::var("CADDEY_SCOPES") {
            config.scopes = parse_scopes(&scopes);
        }
        if let Ok(url) = std::env::var("CADDEY_DEVICE_URL") {
            config.device_endpoint = url;
        }
        if let Ok(url) = std::env::var("CADDEY_TOKEN_URL") {
            config.token_endpoint = url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject empty client ids, scope lists, or endpoints before any
    /// network call is attempted.
    pub fn validate(&self) -> Result<(), CaddeyError> {
        if self.client_id.trim().is_empty() {
            return Err(CaddeyError::Configuration(
                "client_id must not be empty".to_string(),
            ));
        }
        if self.scopes.is_empty() || self.scopes.iter().any(|s| s.trim().is_empty()) {
            return Err(CaddeyError::Configuration(
                "at least one non-empty scope is required".to_string(),
            ));
        }
        if self.device_endpoint.trim().is_empty() || self.token_endpoint.trim().is_empty() {
            return Err(CaddeyError::Configuration(
                "device and token endpoints must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_applies_defaults() {
        let config = CaddeyConfig::new("abc123");
        assert_eq!(config.client_id, "abc123");
        assert_eq!(config.scopes, vec!["openid".to_string()]);
        assert!(config.device_endpoint.contains("auth/device"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_scopes_splits_on_whitespace() {
        assert_eq!(
            parse_scopes("  openid  tasks:read "),
            vec!["openid".to_string(), "tasks:read".to_string()]
        );
        assert!(parse_scopes("   ").is_empty());
    }

    #[test]
    fn validate_rejects_empty_client_id() {
        let config = CaddeyConfig::new("  ");
        assert!(matches!(
            config.validate(),
            Err(CaddeyError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_scopes() {
        let mut config = CaddeyConfig::new("abc123");
        config.scopes.clear();
        assert!(matches!(
            config.validate(),
            Err(CaddeyError::Configuration(_))
        ));

        config.scopes = vec!["".to_string()];
        assert!(matches!(
            config.validate(),
            Err(CaddeyError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_endpoints() {
        let mut config = CaddeyConfig::new("abc123");
        config.token_endpoint = String::new();
        assert!(matches!(
            config.validate(),
            Err(CaddeyError::Configuration(_))
        ));
    }
}
