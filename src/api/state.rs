//! Application state for shared services

use std::sync::Arc;

use crate::domain::invitation::{InvitationOutcome, InvitationRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::invitation::InvitationResolver;
use crate::infrastructure::tenant::{TeamDirectory, TeamMembers, TenantProvisioner};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub invitation_resolver: Arc<dyn InvitationResolverTrait>,
    pub tenant_provisioner: Arc<dyn TenantProvisionerTrait>,
    pub team_directory: Arc<dyn TeamDirectoryTrait>,
    /// Identity lookup for the auth extractor and readiness probe
    pub user_repository: Arc<dyn UserRepository>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

impl AppState {
    /// Wire the services over a pair of repositories
    pub fn new<U, I>(
        users: Arc<U>,
        invitations: Arc<I>,
        jwt_service: Arc<dyn JwtGenerator>,
        trial_length_days: u32,
    ) -> Self
    where
        U: UserRepository + 'static,
        I: InvitationRepository + 'static,
    {
        Self {
            invitation_resolver: Arc::new(InvitationResolver::new(invitations)),
            tenant_provisioner: Arc::new(
                TenantProvisioner::new(users.clone()).with_trial_length_days(trial_length_days),
            ),
            team_directory: Arc::new(TeamDirectory::new(users.clone())),
            user_repository: users,
            jwt_service,
        }
    }
}

/// Trait for invitation lookup
#[async_trait::async_trait]
pub trait InvitationResolverTrait: Send + Sync {
    async fn resolve_for_caller(&self, caller: &User) -> Result<InvitationOutcome, DomainError>;
}

/// Trait for trial provisioning
#[async_trait::async_trait]
pub trait TenantProvisionerTrait: Send + Sync {
    async fn initialize_trial(&self, caller: &User, company_name: &str)
        -> Result<User, DomainError>;
}

/// Trait for the team member listing
#[async_trait::async_trait]
pub trait TeamDirectoryTrait: Send + Sync {
    async fn list_members(&self, caller: &User) -> Result<TeamMembers, DomainError>;
}

#[async_trait::async_trait]
impl<R: InvitationRepository + 'static> InvitationResolverTrait for InvitationResolver<R> {
    async fn resolve_for_caller(&self, caller: &User) -> Result<InvitationOutcome, DomainError> {
        InvitationResolver::resolve_for_caller(self, caller).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> TenantProvisionerTrait for TenantProvisioner<R> {
    async fn initialize_trial(
        &self,
        caller: &User,
        company_name: &str,
    ) -> Result<User, DomainError> {
        TenantProvisioner::initialize_trial(self, caller, company_name).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> TeamDirectoryTrait for TeamDirectory<R> {
    async fn list_members(&self, caller: &User) -> Result<TeamMembers, DomainError> {
        TeamDirectory::list_members(self, caller).await
    }
}
