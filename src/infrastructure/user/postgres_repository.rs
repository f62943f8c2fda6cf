//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::tenant::{TenantId, TrialPatch};
use crate::domain::user::{SubscriptionStatus, User, UserId, UserRepository, UserRole};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, email, full_name, tenant_id, role, is_tenant_owner, \
    subscription_status, trial_start_date, trial_end_date, company_name, created_date";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::operation_failed(format!("Failed to get user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, full_name, tenant_id, role, is_tenant_owner,
                               subscription_status, trial_start_date, trial_end_date,
                               company_name, created_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.full_name())
        .bind(user.tenant_id().map(TenantId::as_str))
        .bind(user.role().as_str())
        .bind(user.is_tenant_owner())
        .bind(user.subscription_status().as_str())
        .bind(user.trial_start_date())
        .bind(user.trial_end_date())
        .bind(user.company_name())
        .bind(user.created_date())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::operation_failed(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }

    async fn list_by_tenant(&self, tenant_id: &TenantId) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE tenant_id = $1 ORDER BY created_date, id",
            USER_COLUMNS
        ))
        .bind(tenant_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::operation_failed(format!("Failed to list tenant users: {}", e)))?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn apply_trial_if_uninitialized(
        &self,
        id: &UserId,
        patch: &TrialPatch,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET tenant_id = $2, is_tenant_owner = TRUE, subscription_status = 'trial',
                trial_start_date = $3, trial_end_date = $4, company_name = $5
            WHERE id = $1
              AND NOT (subscription_status <> 'none' AND tenant_id IS NOT NULL)
            "#,
        )
        .bind(id.as_str())
        .bind(patch.tenant_id.as_str())
        .bind(patch.trial_start_date)
        .bind(patch.trial_end_date)
        .bind(&patch.company_name)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::operation_failed(format!("Failed to start trial: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::operation_failed(format!("Failed to check user: {}", e)))?;

        if exists {
            Ok(false)
        } else {
            Err(DomainError::not_found(format!("User '{}' not found", id)))
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::operation_failed(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

/// A `users` row as stored
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: String,
    email: String,
    full_name: Option<String>,
    tenant_id: Option<String>,
    role: String,
    is_tenant_owner: bool,
    subscription_status: String,
    trial_start_date: Option<NaiveDate>,
    trial_end_date: Option<NaiveDate>,
    company_name: Option<String>,
    created_date: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, DomainError> {
        let user_id = UserId::new(self.id).map_err(|e| {
            DomainError::operation_failed(format!("Invalid user ID in database: {}", e))
        })?;

        let mut user = User::new(user_id, self.email)
            .with_role(UserRole::parse(&self.role))
            .with_subscription(SubscriptionStatus::parse(&self.subscription_status))
            .with_trial_dates(self.trial_start_date, self.trial_end_date)
            .with_tenant_owner(self.is_tenant_owner)
            .with_created_date(self.created_date);

        if let Some(tenant_id) = self.tenant_id {
            let tenant_id = TenantId::new(tenant_id).map_err(|e| {
                DomainError::operation_failed(format!("Invalid tenant ID in database: {}", e))
            })?;
            user = user.with_tenant_id(tenant_id);
        }

        if let Some(full_name) = self.full_name {
            user = user.with_full_name(full_name);
        }

        if let Some(company_name) = self.company_name {
            user = user.with_company_name(company_name);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> UserRow {
        UserRow {
            id: id.to_string(),
            email: format!("{}@acme.io", id),
            full_name: None,
            tenant_id: None,
            role: "user".to_string(),
            is_tenant_owner: false,
            subscription_status: "none".to_string(),
            trial_start_date: None,
            trial_end_date: None,
            company_name: None,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn test_owner_flag_survives_without_tenant() {
        let user = UserRow {
            is_tenant_owner: true,
            ..row("jane")
        }
        .into_user()
        .unwrap();

        assert!(user.is_tenant_owner());
        assert!(user.tenant_id().is_none());
    }

    #[test]
    fn test_trial_owner_row() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();

        let user = UserRow {
            tenant_id: Some("jane".to_string()),
            role: "admin".to_string(),
            is_tenant_owner: true,
            subscription_status: "trial".to_string(),
            trial_start_date: Some(start),
            trial_end_date: Some(end),
            company_name: Some("Acme".to_string()),
            full_name: Some("Jane Doe".to_string()),
            ..row("jane")
        }
        .into_user()
        .unwrap();

        assert_eq!(user.tenant_id().map(TenantId::as_str), Some("jane"));
        assert!(user.is_tenant_owner());
        assert!(user.is_tenant_initialized());
        assert_eq!(user.role(), UserRole::Admin);
        assert_eq!(user.subscription_status(), SubscriptionStatus::Trial);
        assert_eq!(user.trial_end_date(), Some(end));
        assert_eq!(user.company_name(), Some("Acme"));
        assert_eq!(user.full_name(), Some("Jane Doe"));
    }

    #[test]
    fn test_member_row_is_not_owner() {
        let user = UserRow {
            tenant_id: Some("owner".to_string()),
            ..row("bob")
        }
        .into_user()
        .unwrap();

        assert_eq!(user.tenant_id().map(TenantId::as_str), Some("owner"));
        assert!(!user.is_tenant_owner());
    }

    #[test]
    fn test_corrupt_ids_are_operation_failures() {
        let bad_user = UserRow {
            id: "has space".to_string(),
            ..row("x")
        };
        assert!(matches!(
            bad_user.into_user(),
            Err(DomainError::OperationFailed { .. })
        ));

        let bad_tenant = UserRow {
            tenant_id: Some(String::new()),
            ..row("jane")
        };
        assert!(matches!(
            bad_tenant.into_user(),
            Err(DomainError::OperationFailed { .. })
        ));
    }
}
