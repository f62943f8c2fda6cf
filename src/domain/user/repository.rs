//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::tenant::{TenantId, TrialPatch};
use crate::domain::DomainError;

/// Repository for user records
///
/// Implementations run with service-role access: they are not scoped to the
/// calling identity.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// All users whose tenant reference equals `tenant_id`
    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<User>, DomainError>;

    /// Apply a trial patch unless the user's tenant is already initialized
    ///
    /// The check and the write happen as one step in the store. Returns
    /// `false` when the user was already initialized and nothing was written.
    async fn apply_trial_if_uninitialized(
        &self,
        id: &UserId,
        patch: &TrialPatch,
    ) -> Result<bool, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;
}
