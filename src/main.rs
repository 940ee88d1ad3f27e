//! Caddey CLI binary entry point.

use caddey::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let result = match cli.command {
        Commands::Login(args) => caddey::cli::auth::handle_login(args).await,
        Commands::Status => caddey::cli::auth::handle_status().await,
        Commands::Logout => caddey::cli::auth::handle_logout().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
