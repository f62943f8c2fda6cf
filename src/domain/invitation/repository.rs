//! Invitation repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{InvitationId, TenantInvitation};
use crate::domain::DomainError;

/// Repository for tenant invitations
///
/// Implementations run with service-role access.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Get an invitation by ID
    async fn get(&self, id: &InvitationId) -> Result<Option<TenantInvitation>, DomainError>;

    /// Store a new invitation
    async fn create(&self, invitation: TenantInvitation) -> Result<TenantInvitation, DomainError>;

    /// First persisted-pending invitation addressed to `normalized_email`
    ///
    /// The email must already be normalized (trimmed, lower-cased); stored
    /// emails are compared in the same form. Oldest invitation wins.
    async fn find_pending_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<TenantInvitation>, DomainError>;

    /// Set the status of an invitation to expired
    ///
    /// Idempotent: expiring an already expired invitation succeeds.
    async fn mark_expired(&self, id: &InvitationId) -> Result<(), DomainError>;
}
