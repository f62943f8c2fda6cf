//! CLI module for the tenant onboarding service
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply (or `--revert` the latest) PostgreSQL schema migrations
//! - `token`: issue a bearer token for local testing

pub mod migrate;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Tenant onboarding API - invitations, trial provisioning and team directory
#[derive(Parser)]
#[command(name = "tenant-onboarding-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Apply database migrations
    Migrate(migrate::MigrateArgs),

    /// Print a signed bearer token for an identity
    Token(token::TokenArgs),
}

/// Load `.env` and the layered configuration, falling back to defaults
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();

    AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_command() {
        let cli = Cli::try_parse_from([
            "tenant-onboarding-api",
            "token",
            "--user-id",
            "jane",
            "--email",
            "jane@acme.io",
        ])
        .unwrap();

        match cli.command {
            Command::Token(args) => {
                assert_eq!(args.user_id, "jane");
                assert_eq!(args.email, "jane@acme.io");
                assert_eq!(args.hours, None);
            }
            _ => panic!("Expected token command"),
        }
    }

    #[test]
    fn test_parse_serve_and_migrate() {
        let cli = Cli::try_parse_from(["tenant-onboarding-api", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from(["tenant-onboarding-api", "migrate"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate(ref args) if !args.revert));

        let cli = Cli::try_parse_from(["tenant-onboarding-api", "migrate", "--revert"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate(ref args) if args.revert));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["tenant-onboarding-api"]).is_err());
    }
}
