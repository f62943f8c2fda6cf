//! Team member listing

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use super::users::UserResponse;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

#[derive(Debug, Clone, Serialize)]
pub struct TeamMembersResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
    pub current_user_id: String,
}

/// GET|POST /api/team/members
pub async fn list_team_members(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<TeamMembersResponse>, ApiError> {
    debug!(user_id = %user.id(), "Listing team members");

    let members = state
        .team_directory
        .list_members(&user)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to list team members"))?;

    Ok(Json(TeamMembersResponse {
        success: true,
        users: members.users.iter().map(UserResponse::from).collect(),
        current_user_id: members.current_user_id.as_str().to_string(),
    }))
}
