//! Pending invitation lookup

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::invitation::{InvitationOutcome, PendingInvitation};

/// Body of `/api/invitations/pending`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PendingInvitationResponse {
    #[serde(rename = "hasPendingInvitation")]
    pub has_pending_invitation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation: Option<PendingInvitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl From<InvitationOutcome> for PendingInvitationResponse {
    fn from(outcome: InvitationOutcome) -> Self {
        match outcome {
            InvitationOutcome::Pending(invitation) => Self {
                has_pending_invitation: true,
                invitation: Some(invitation),
                reason: None,
            },
            InvitationOutcome::Expired => Self {
                has_pending_invitation: false,
                invitation: None,
                reason: Some("expired"),
            },
            InvitationOutcome::NotFound => Self {
                has_pending_invitation: false,
                invitation: None,
                reason: None,
            },
        }
    }
}

/// GET|POST /api/invitations/pending
pub async fn check_pending_invitation(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<PendingInvitationResponse>, ApiError> {
    debug!(user_id = %user.id(), "Checking pending invitation");

    let outcome = state
        .invitation_resolver
        .resolve_for_caller(&user)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to check pending invitation"))?;

    Ok(Json(outcome.into()))
}
