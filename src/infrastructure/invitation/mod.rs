//! Invitation infrastructure module
//!
//! Storage implementations for invitations and the resolver that finds the
//! caller's pending invitation.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresInvitationRepository;
pub use repository::InMemoryInvitationRepository;
pub use service::InvitationResolver;

#[cfg(test)]
pub(crate) use postgres_repository::NORMALIZED_EMAIL_SQL;
