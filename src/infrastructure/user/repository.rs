//! Map-backed identity store for local runs and tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::tenant::{TenantId, TrialPatch};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; a later duplicate id replaces an earlier one
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id().clone(), u)).collect()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.id()) {
            return Err(DomainError::operation_failed(format!(
                "Identity '{}' is already stored",
                user.id()
            )));
        }

        users.insert(user.id().clone(), user.clone());
        Ok(user)
    }

    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<User>, DomainError> {
        let mut members: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.tenant_id() == Some(tenant_id))
            .cloned()
            .collect();

        members.sort_by(|a, b| {
            (a.created_date(), a.id().as_str()).cmp(&(b.created_date(), b.id().as_str()))
        });

        Ok(members)
    }

    async fn apply_trial_if_uninitialized(
        &self,
        id: &UserId,
        patch: &TrialPatch,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(id) else {
            return Err(DomainError::not_found(format!("Identity '{}' not found", id)));
        };

        if user.is_tenant_initialized() {
            return Ok(false);
        }

        user.apply_trial(patch);
        Ok(true)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.users.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::SubscriptionStatus;
    use chrono::NaiveDate;

    fn member(id: &str) -> User {
        User::new(UserId::new(id).unwrap(), format!("{}@acme.io", id))
    }

    fn trial_patch(owner: &UserId) -> TrialPatch {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        TrialPatch::new(owner, "Acme", today, 30).unwrap()
    }

    #[tokio::test]
    async fn test_created_identity_is_readable() {
        let repo = InMemoryUserRepository::new();
        let user = member("user-1");

        repo.create(user.clone()).await.unwrap();

        assert_eq!(repo.get(user.id()).await.unwrap(), Some(user));
        assert_eq!(repo.get(&UserId::new("user-2").unwrap()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_identity_is_rejected() {
        let repo = InMemoryUserRepository::with_users([member("user-1")]);

        let result = repo.create(member("user-1")).await;
        assert!(matches!(result, Err(DomainError::OperationFailed { .. })));
    }

    #[tokio::test]
    async fn test_list_by_tenant() {
        let acme = TenantId::new("acme").unwrap();
        let globex = TenantId::new("globex").unwrap();

        let repo = InMemoryUserRepository::with_users(vec![
            member("a").with_tenant(acme.clone(), true),
            member("b").with_tenant(acme.clone(), false),
            member("c").with_tenant(globex, false),
            member("d"),
        ]);

        let members = repo.list_by_tenant(&acme).await.unwrap();
        let mut ids: Vec<&str> = members.iter().map(|u| u.id().as_str()).collect();
        ids.sort_unstable();

        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_apply_trial_if_uninitialized() {
        let repo = InMemoryUserRepository::new();
        let user = member("user-1");
        repo.create(user.clone()).await.unwrap();

        let applied = repo
            .apply_trial_if_uninitialized(user.id(), &trial_patch(user.id()))
            .await
            .unwrap();
        assert!(applied);

        let stored = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.subscription_status(), SubscriptionStatus::Trial);
        assert!(stored.is_tenant_owner());

        let applied_again = repo
            .apply_trial_if_uninitialized(user.id(), &trial_patch(user.id()))
            .await
            .unwrap();
        assert!(!applied_again);
    }

    #[tokio::test]
    async fn test_apply_trial_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let id = UserId::new("ghost").unwrap();

        let result = repo.apply_trial_if_uninitialized(&id, &trial_patch(&id)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_count() {
        let repo = InMemoryUserRepository::with_users(vec![
            member("a"),
            member("b"),
        ]);

        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
