//! CLI command handlers for login, status, and logout.

use std::sync::Arc;

use crate::auth::{AuthError, DeviceAuthClient, FileTokenStore, TerminalPrompt, TokenStore};
use crate::config::CaddeyConfig;
use crate::error::CaddeyError;

use super::LoginArgs;

/// Handle `caddey login`.
pub async fn handle_login(args: LoginArgs) -> Result<(), CaddeyError> {
    let mut config = match args.client_id {
        Some(client_id) => CaddeyConfig::new(client_id),
        None => CaddeyConfig::from_env()?,
    };
    if !args.scopes.is_empty() {
        config.scopes = args.scopes;
    }
    config.validate()?;

    let store = Arc::new(FileTokenStore::new_default());
    let client = DeviceAuthClient::from_config(&config).with_token_store(store);

    match client
        .authenticate(&config.client_id, &config.scopes, &TerminalPrompt)
        .await
    {
        Ok(_token) => {
            println!("✅ Logged in successfully! Token acquired.");
            Ok(())
        }
        Err(AuthError::AuthorizationDenied) => {
            eprintln!("❌ Authorization denied");
            std::process::exit(1);
        }
        Err(AuthError::DeviceCodeExpired) => {
            eprintln!("❌ Device code expired, please try again");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle `caddey status`.
pub async fn handle_status() -> Result<(), CaddeyError> {
    let store = FileTokenStore::new_default();
    match store.load("default") {
        Ok(Some(token)) => {
            if token.is_expired() {
                let refreshable = if token.refresh_token.is_some() {
                    " (refresh token available)"
                } else {
                    ""
                };
                println!("⚠️  Token expired{refreshable}");
            } else if let Some(expires) = token.expires_at {
                println!("✅ Logged in (expires {})", expires.format("%Y-%m-%d %H:%M"));
            } else {
                println!("✅ Logged in");
            }
        }
        Ok(None) => println!("❌ Not logged in"),
        Err(err) => println!("⚠️  Error reading stored token: {err}"),
    }

    let client_id = if std::env::var("CADDEY_CLIENT_ID").is_ok() {
        "✅ Set"
    } else {
        "❌ Not set"
    };
    println!("CADDEY_CLIENT_ID: {client_id}");
    Ok(())
}

/// Handle `caddey logout`.
pub async fn handle_logout() -> Result<(), CaddeyError> {
    let store = FileTokenStore::new_default();
    store.clear("default").map_err(CaddeyError::Auth)?;
    println!("✅ Logged out");
    Ok(())
}
