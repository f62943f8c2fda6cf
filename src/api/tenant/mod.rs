//! Tenant onboarding endpoints
//!
//! Invitation lookup, trial provisioning and the team directory. Every
//! route requires a bearer token.

pub mod invitations;
pub mod team;
pub mod trial;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub use users::UserResponse;

/// Create the tenant router, mounted under `/api`
pub fn create_tenant_router() -> Router<AppState> {
    Router::new()
        .route(
            "/invitations/pending",
            get(invitations::check_pending_invitation).post(invitations::check_pending_invitation),
        )
        .route("/tenant/trial", post(trial::initialize_trial))
        .route(
            "/team/members",
            get(team::list_team_members).post(team::list_team_members),
        )
}
