//! Map-backed invitation store for local runs and tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::invitation::{
    validate_invitation_token, InvitationId, InvitationRepository, InvitationStatus,
    TenantInvitation,
};
use crate::domain::user::normalize_email;
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryInvitationRepository {
    invitations: RwLock<HashMap<InvitationId, TenantInvitation>>,
}

impl InMemoryInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invitations(invitations: impl IntoIterator<Item = TenantInvitation>) -> Self {
        Self {
            invitations: RwLock::new(
                invitations
                    .into_iter()
                    .map(|inv| (inv.id().clone(), inv))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn get(&self, id: &InvitationId) -> Result<Option<TenantInvitation>, DomainError> {
        Ok(self.invitations.read().await.get(id).cloned())
    }

    async fn create(&self, invitation: TenantInvitation) -> Result<TenantInvitation, DomainError> {
        validate_invitation_token(invitation.invitation_token())
            .map_err(|e| DomainError::invalid_argument(e.to_string()))?;

        let mut invitations = self.invitations.write().await;

        if invitations.contains_key(invitation.id()) {
            return Err(DomainError::operation_failed(format!(
                "Invitation '{}' is already stored",
                invitation.id()
            )));
        }

        invitations.insert(invitation.id().clone(), invitation.clone());
        Ok(invitation)
    }

    async fn find_pending_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<TenantInvitation>, DomainError> {
        // Oldest first so repeated lookups keep returning the same invitation
        Ok(self
            .invitations
            .read()
            .await
            .values()
            .filter(|inv| {
                inv.status() == InvitationStatus::Pending
                    && normalize_email(inv.email()) == normalized_email
            })
            .min_by(|a, b| {
                (a.created_date(), a.id().as_str()).cmp(&(b.created_date(), b.id().as_str()))
            })
            .cloned())
    }

    async fn mark_expired(&self, id: &InvitationId) -> Result<(), DomainError> {
        let mut invitations = self.invitations.write().await;
        let invitation = invitations
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("Invitation '{}' not found", id)))?;

        invitation.mark_expired();
        Ok(())
    }
}
