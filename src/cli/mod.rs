//! CLI entry point for the Caddey binary.

pub mod auth;

use clap::{Parser, Subcommand};

/// Caddey CLI
#[derive(Parser, Debug)]
#[command(name = "caddey", version, about = "Caddey — device-flow authentication CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in via the browser-based device flow
    Login(LoginArgs),
    /// Show authentication status
    Status,
    /// Discard stored credentials
    Logout,
}

/// Arguments for `caddey login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Client identifier (overrides CADDEY_CLIENT_ID)
    #[arg(long)]
    pub client_id: Option<String>,

    /// Requested scope; repeat for multiple (overrides CADDEY_SCOPES)
    #[arg(long = "scope")]
    pub scopes: Vec<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_login_with_defaults() {
        let cli = Cli::try_parse_from(["caddey", "login"]).unwrap();
        match cli.command {
            Commands::Login(args) => {
                assert!(args.client_id.is_none());
                assert!(args.scopes.is_empty());
            }
            other => panic!("expected Login, got {other:?}"),
        }
    }

    #[test]
    fn parse_login_with_client_id_and_scopes() {
        let cli = Cli::try_parse_from([
            "caddey",
            "login",
            "--client-id",
            "abc123",
            "--scope",
            "openid",
            "--scope",
            "tasks:read",
        ])
        .unwrap();
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.client_id.as_deref(), Some("abc123"));
                assert_eq!(args.scopes, vec!["openid", "tasks:read"]);
            }
            other => panic!("expected Login, got {other:?}"),
        }
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["caddey", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn parse_logout() {
        let cli = Cli::try_parse_from(["caddey", "logout"]).unwrap();
        assert!(matches!(cli.command, Commands::Logout));
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["caddey"]).is_err());
    }
}
