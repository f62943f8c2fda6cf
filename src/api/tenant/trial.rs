//! Trial tenant provisioning

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::users::UserResponse;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// Request to start a trial. A missing name is treated as blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitializeTrialRequest {
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeTrialResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// POST /api/tenant/trial
pub async fn initialize_trial(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<InitializeTrialRequest>,
) -> Result<Json<InitializeTrialResponse>, ApiError> {
    debug!(user_id = %user.id(), "Initializing trial tenant");

    let company_name = request.company_name.unwrap_or_default();

    let updated = state
        .tenant_provisioner
        .initialize_trial(&user, &company_name)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to initialize trial"))?;

    Ok(Json(InitializeTrialResponse {
        success: true,
        message: "Trial tenant initialized".to_string(),
        user: UserResponse::from(&updated),
    }))
}
