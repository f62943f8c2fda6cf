//! User infrastructure module
//!
//! In-memory and PostgreSQL implementations of the user repository.

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
