//! Resolves the pending invitation addressed to the calling identity

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::invitation::{InvitationOutcome, InvitationRepository};
use crate::domain::user::{normalize_email, User};
use crate::domain::DomainError;

/// Looks up invitations for the caller and lazily expires stale ones
#[derive(Debug)]
pub struct InvitationResolver<R: InvitationRepository> {
    repository: Arc<R>,
}

impl<R: InvitationRepository> InvitationResolver<R> {
    /// Create a new resolver
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolve the caller's pending invitation as of now
    pub async fn resolve_for_caller(&self, caller: &User) -> Result<InvitationOutcome, DomainError> {
        self.resolve_at(caller, Utc::now()).await
    }

    /// Resolve the caller's pending invitation as of `now`
    ///
    /// Performs at most one write: the expiry transition of a stale match.
    pub async fn resolve_at(
        &self,
        caller: &User,
        now: DateTime<Utc>,
    ) -> Result<InvitationOutcome, DomainError> {
        let email = normalize_email(caller.email());

        if email.is_empty() {
            debug!(user_id = %caller.id(), "Caller has no email, skipping invitation lookup");
            return Ok(InvitationOutcome::NotFound);
        }

        let invitation = self
            .repository
            .find_pending_by_email(&email)
            .await
            .map_err(DomainError::into_operation_failed)?;

        let Some(invitation) = invitation else {
            debug!(user_id = %caller.id(), "No pending invitation");
            return Ok(InvitationOutcome::NotFound);
        };

        if invitation.is_stale(now) {
            self.repository
                .mark_expired(invitation.id())
                .await
                .map_err(DomainError::into_operation_failed)?;

            info!(
                invitation_id = %invitation.id(),
                user_id = %caller.id(),
                "Pending invitation expired on read"
            );

            return Ok(InvitationOutcome::Expired);
        }

        debug!(invitation_id = %invitation.id(), user_id = %caller.id(), "Found pending invitation");

        Ok(InvitationOutcome::Pending(invitation.to_pending()))
    }
}
