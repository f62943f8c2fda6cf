//! Migrate command - applies or reverts the PostgreSQL schema

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::infrastructure::logging;
use crate::infrastructure::storage::{connect_pool, revert_latest, run_migrations};

#[derive(Debug, Default, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead of applying
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = crate::cli::load_config();
    logging::init_logging(&config.logging);

    let pg_config = crate::postgres_config(&config)
        .context("migrate needs storage.database_url or DATABASE_URL")?;

    let pool = connect_pool(&pg_config).await?;

    if args.revert {
        match revert_latest(&pool).await? {
            Some(version) => info!(version, "Revert complete"),
            None => info!("No applied migrations to revert"),
        }
        return Ok(());
    }

    let applied = run_migrations(&pool).await?;
    info!(applied, "Migrations complete");

    Ok(())
}
