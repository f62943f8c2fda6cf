//! Lists the members of the caller's tenant

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Members visible to a caller
#[derive(Debug, Clone)]
pub struct TeamMembers {
    pub users: Vec<User>,
    pub current_user_id: UserId,
}

/// Tenant member directory
#[derive(Debug)]
pub struct TeamDirectory<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> TeamDirectory<R> {
    /// Create a new directory
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Members of the caller's tenant
    ///
    /// Admins and tenant owners see every member; anyone else sees only
    /// themselves.
    pub async fn list_members(&self, caller: &User) -> Result<TeamMembers, DomainError> {
        let tenant_id = caller.tenant_id().ok_or_else(|| {
            DomainError::tenant_not_initialized("User does not belong to a tenant")
        })?;

        let current_user_id = caller.id().clone();

        if !caller.can_view_team() {
            debug!(user_id = %caller.id(), "Caller is not privileged, returning self only");
            return Ok(TeamMembers {
                users: vec![caller.clone()],
                current_user_id,
            });
        }

        let members = self
            .repository
            .list_by_tenant(tenant_id)
            .await
            .map_err(DomainError::into_operation_failed)?;

        let mut seen = HashSet::new();
        let users: Vec<User> = members
            .into_iter()
            .filter(|u| seen.insert(u.id().clone()))
            .collect();

        debug!(
            user_id = %caller.id(),
            tenant_id = %tenant_id,
            count = users.len(),
            "Listed tenant members"
        );

        Ok(TeamMembers {
            users,
            current_user_id,
        })
    }
}
