//! Caddey CLI — OAuth 2.0 device-flow authentication.
//!
//! Implements the Device Authorization Grant for input-constrained clients:
//! request a device code, show the verification URL and user code, then poll
//! the token endpoint until the user authorizes in a browser. The resulting
//! access token is handed to downstream consumers (the Caddey MCP endpoint)
//! as an opaque bearer credential.
//!
//! # Quick Start
//!
//! ```no_run
//! use caddey::auth::{DeviceAuthClient, TerminalPrompt};
//! use caddey::config::CaddeyConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CaddeyConfig::from_env()?;
//! let client = DeviceAuthClient::from_config(&config);
//! let token = client
//!     .authenticate(&config.client_id, &config.scopes, &TerminalPrompt)
//!     .await?;
//! println!("{}", token.access_token);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
