use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::CaddeyConfig;
use crate::util::RetryPolicy;

use super::device_code::{DeviceAuthorization, DevicePoll};
use super::error::AuthError;
use super::prompt::VerificationPrompt;
use super::store::TokenStore;
use super::token::Token;

const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const REFRESH_GRANT_TYPE: &str = "refresh_token";

/// Mandatory backoff added to the polling interval on a `slow_down` signal.
const SLOW_DOWN_INCREMENT_SECS: u64 = 5;

/// Per-request timeout, independent of the device code's validity window.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth 2.0 Device Authorization Grant client.
///
/// One instance drives one or more sequential authentication attempts; each
/// attempt owns its own [`DeviceAuthorization`] and poll state, so there is
/// no shared mutable state between attempts. The polling loop is a
/// cooperative wait: dropping the returned future at any await point aborts
/// the attempt without exposing partial token state.
///
/// # Example
/// ```no_run
/// use caddey::auth::{DeviceAuthClient, TerminalPrompt};
///
/// # async fn example() -> Result<(), caddey::auth::AuthError> {
/// let client = DeviceAuthClient::new(
///     "https://auth.caddey.ai/realms/caddey/protocol/openid-connect/auth/device",
///     "https://auth.caddey.ai/realms/caddey/protocol/openid-connect/token",
/// );
/// let scopes = vec!["openid".to_string()];
/// let token = client.authenticate("my-client", &scopes, &TerminalPrompt).await?;
/// println!("{}", token.access_token);
/// # Ok(())
/// # }
/// ```
pub struct DeviceAuthClient {
    client: reqwest::Client,
    device_endpoint: String,
    token_endpoint: String,
    request_timeout: Duration,
    retry: RetryPolicy,
    token_store: Option<Arc<dyn TokenStore>>,
    profile: String,
}

impl DeviceAuthClient {
    pub fn new(device_endpoint: impl Into<String>, token_endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            device_endpoint: device_endpoint.into(),
            token_endpoint: token_endpoint.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
            token_store: None,
            profile: "default".to_string(),
        }
    }

    pub fn from_config(config: &CaddeyConfig) -> Self {
        Self::new(config.device_endpoint.clone(), config.token_endpoint.clone())
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Persist successful tokens through this store.
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Request a device code from the provider's device endpoint.
    ///
    /// `client_id` and `scopes` are validated to be non-empty before any
    /// network call is made.
    pub async fn request_device_code(
        &self,
        client_id: &str,
        scopes: &[String],
    ) -> Result<DeviceAuthorization, AuthError> {
        if client_id.trim().is_empty() {
            return Err(AuthError::Configuration(
                "client_id must not be empty".to_string(),
            ));
        }
        if scopes.is_empty() || scopes.iter().any(|s| s.trim().is_empty()) {
            return Err(AuthError::Configuration(
                "at least one non-empty scope is required".to_string(),
            ));
        }

        let scope = scopes.join(" ");
        let resp = self
            .client
            .post(&self.device_endpoint)
            .timeout(self.request_timeout)
            .header("Accept", "application/json")
            .form(&[("client_id", client_id), ("scope", scope.as_str())])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_server_error() {
            return Err(AuthError::Network(format!(
                "device endpoint returned status {status}"
            )));
        }
        if !status.is_success() {
            return Err(AuthError::Protocol(format!(
                "device code request failed with status {status}: {body}"
            )));
        }
        let payload: DeviceCodeResponse = serde_json::from_str(&body).map_err(|err| {
            AuthError::Protocol(format!("device code response missing required fields: {err}"))
        })?;

        let issued_at = Utc::now();
        tracing::debug!(
            user_code = %payload.user_code,
            expires_in = payload.expires_in,
            interval = payload.interval,
            "device code issued"
        );
        Ok(DeviceAuthorization {
            client_id: client_id.to_string(),
            device_code: payload.device_code,
            user_code: payload.user_code,
            verification_uri: payload.verification_uri,
            verification_uri_complete: payload.verification_uri_complete,
            interval_secs: payload.interval,
            issued_at,
            expires_at: issued_at + chrono::Duration::seconds(payload.expires_in as i64),
        })
    }

    /// Perform a single token-endpoint poll for the given grant.
    ///
    /// Short-circuits to [`DevicePoll::Expired`] without a network call once
    /// the grant's validity window has elapsed.
    pub async fn poll_once(&self, grant: &DeviceAuthorization) -> Result<DevicePoll, AuthError> {
        if grant.is_expired() {
            return Ok(DevicePoll::Expired);
        }
        let resp = self
            .client
            .post(&self.token_endpoint)
            .timeout(self.request_timeout)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", DEVICE_GRANT_TYPE),
                ("device_code", grant.device_code.as_str()),
                ("client_id", grant.client_id.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_server_error() {
            return Err(AuthError::Network(format!(
                "token endpoint returned status {status}"
            )));
        }
        // Structured grant errors arrive as 400s; anything else non-success
        // is outside the protocol.
        if !status.is_success() && status != StatusCode::BAD_REQUEST {
            return Err(AuthError::Protocol(format!(
                "token request failed with status {status}: {body}"
            )));
        }
        let payload: TokenEndpointResponse = serde_json::from_str(&body)
            .map_err(|err| AuthError::Protocol(format!("unparseable token response: {err}")))?;

        if let Some(access_token) = payload.access_token {
            let token = Token {
                access_token,
                token_type: payload.token_type.unwrap_or_else(|| "Bearer".to_string()),
                refresh_token: payload.refresh_token,
                expires_at: payload
                    .expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs as i64)),
                scopes: payload.scope.map(split_scopes),
                last_refresh: Some(Utc::now()),
            };
            return Ok(DevicePoll::Authorized { token });
        }
        match payload.error.as_deref() {
            Some("authorization_pending") => Ok(DevicePoll::Pending),
            Some("slow_down") => Ok(DevicePoll::SlowDown),
            Some("access_denied") => Ok(DevicePoll::Denied),
            Some("expired_token") => Ok(DevicePoll::Expired),
            Some(other) => Err(AuthError::AuthenticationFailed {
                source: Box::new(AuthError::Protocol(format!(
                    "unrecognized provider error: {other}"
                ))),
            }),
            None => Err(AuthError::Protocol(
                "token response missing both access_token and error".to_string(),
            )),
        }
    }

    /// Poll the token endpoint until a terminal outcome.
    ///
    /// The first poll runs immediately; subsequent polls are spaced at least
    /// the effective interval apart. A `slow_down` signal permanently widens
    /// the interval for the rest of the attempt. Transport failures are
    /// retried through the configured [`RetryPolicy`]; exhausting it fails
    /// the attempt with [`AuthError::AuthenticationFailed`].
    pub async fn poll_for_token(&self, grant: &DeviceAuthorization) -> Result<Token, AuthError> {
        let mut interval = Duration::from_secs(grant.interval_secs.max(1));
        loop {
            let poll = match self.retry.execute(|| self.poll_once(grant)).await {
                Ok(poll) => poll,
                Err(err @ AuthError::Network(_)) => {
                    return Err(AuthError::AuthenticationFailed {
                        source: Box::new(err),
                    })
                }
                Err(other) => return Err(other),
            };
            match poll {
                DevicePoll::Authorized { token } => {
                    if let Some(store) = &self.token_store {
                        if let Err(err) = store.save(&self.profile, &token) {
                            tracing::warn!(error = %err, "failed to persist token");
                        }
                    }
                    return Ok(token);
                }
                DevicePoll::Pending => {}
                DevicePoll::SlowDown => {
                    interval += Duration::from_secs(SLOW_DOWN_INCREMENT_SECS);
                    tracing::debug!(
                        interval_secs = interval.as_secs(),
                        "provider requested slower polling"
                    );
                }
                DevicePoll::Denied => return Err(AuthError::AuthorizationDenied),
                DevicePoll::Expired => return Err(AuthError::DeviceCodeExpired),
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Full device-authorization flow: request a device code, present it to
    /// the user exactly once, then poll until a terminal outcome.
    pub async fn authenticate(
        &self,
        client_id: &str,
        scopes: &[String],
        prompt: &dyn VerificationPrompt,
    ) -> Result<Token, AuthError> {
        let grant = self.request_device_code(client_id, scopes).await?;
        prompt.show(&grant);
        self.poll_for_token(&grant).await
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// Separate from the device flow; callers opt in when the provider
    /// issued a refresh token.
    pub async fn refresh(&self, client_id: &str, refresh_token: &str) -> Result<Token, AuthError> {
        let resp = self
            .client
            .post(&self.token_endpoint)
            .timeout(self.request_timeout)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", REFRESH_GRANT_TYPE),
                ("refresh_token", refresh_token),
                ("client_id", client_id),
            ])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_server_error() {
            return Err(AuthError::Network(format!(
                "token endpoint returned status {status}"
            )));
        }
        if !status.is_success() && status != StatusCode::BAD_REQUEST {
            return Err(AuthError::Protocol(format!(
                "refresh request failed with status {status}: {body}"
            )));
        }
        let payload: TokenEndpointResponse = serde_json::from_str(&body)
            .map_err(|err| AuthError::Protocol(format!("unparseable token response: {err}")))?;

        if let Some(access_token) = payload.access_token {
            let token = Token {
                access_token,
                token_type: payload.token_type.unwrap_or_else(|| "Bearer".to_string()),
                // Providers may rotate the refresh token; keep the old one
                // when they don't.
                refresh_token: payload
                    .refresh_token
                    .or_else(|| Some(refresh_token.to_string())),
                expires_at: payload
                    .expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs as i64)),
                scopes: payload.scope.map(split_scopes),
                last_refresh: Some(Utc::now()),
            };
            if let Some(store) = &self.token_store {
                if let Err(err) = store.save(&self.profile, &token) {
                    tracing::warn!(error = %err, "failed to persist refreshed token");
                }
            }
            return Ok(token);
        }
        match payload.error.as_deref() {
            Some("invalid_grant") => Err(AuthError::InvalidGrant),
            Some(other) => Err(AuthError::Protocol(format!(
                "refresh rejected by provider: {other}"
            ))),
            None => Err(AuthError::Protocol(
                "token response missing both access_token and error".to_string(),
            )),
        }
    }
}

fn split_scopes(scope: String) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    verification_uri_complete: Option<String>,
    expires_in: u64,
    interval: u64,
}

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    scope: Option<String>,
    error: Option<String>,
}
