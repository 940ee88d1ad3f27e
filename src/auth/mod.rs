//! OAuth 2.0 device-authorization flow and token storage.

pub mod client;
pub mod device_code;
pub mod error;
pub mod prompt;
pub mod store;
pub mod token;

pub use client::DeviceAuthClient;
pub use device_code::{DeviceAuthorization, DevicePoll};
pub use error::AuthError;
pub use prompt::{TerminalPrompt, VerificationPrompt};
pub use store::{FileTokenStore, TokenStore};
pub use token::Token;
