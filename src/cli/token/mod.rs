//! Token command - prints a bearer token signed with the configured secret

use anyhow::Context;
use clap::Args;

use crate::infrastructure::auth::{JwtClaims, JwtConfig, JwtGenerator, JwtService};

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Identity id placed in the `sub` claim
    #[arg(long)]
    pub user_id: String,

    /// Email claim
    #[arg(long)]
    pub email: String,

    /// Lifetime in hours, defaults to `auth.jwt_expiration_hours`
    #[arg(long)]
    pub hours: Option<u64>,
}

pub async fn run(args: TokenArgs) -> anyhow::Result<()> {
    let config = crate::cli::load_config();

    // A generated secret would not match the server's, so require one
    let secret = crate::configured_jwt_secret(&config)
        .context("Set auth.jwt_secret or JWT_SECRET to issue tokens")?;

    let hours = args.hours.unwrap_or(config.auth.jwt_expiration_hours);
    let service = JwtService::new(JwtConfig::new(secret, hours));
    let claims = JwtClaims::for_subject(args.user_id, args.email, hours)?;

    println!("{}", service.sign(&claims)?);

    Ok(())
}
