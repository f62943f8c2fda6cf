//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::StorageType;
pub use migrations::{revert_latest, run_migrations, Migration, PostgresMigrator};
pub use postgres::{connect_pool, PostgresConfig};
