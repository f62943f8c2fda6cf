//! PostgreSQL invitation repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::invitation::{
    validate_invitation_token, InvitationId, InvitationRepository, InvitationStatus,
    TenantInvitation,
};
use crate::domain::user::UserRole;
use crate::domain::DomainError;

const INVITATION_COLUMNS: &str = "id, email, company_name, inviter_name, intended_role, \
    status, expires_at, invitation_token, created_date";

/// SQL form of `normalize_email` applied to the `email` column
///
/// The bracket class is the Unicode `White_Space` set that `str::trim` strips.
/// The pending-email index is built on this exact expression.
pub(crate) const NORMALIZED_EMAIL_SQL: &str = r"lower(regexp_replace(email, '^[\u0009-\u000D\u0020\u0085\u00A0\u1680\u2000-\u200A\u2028\u2029\u202F\u205F\u3000]+|[\u0009-\u000D\u0020\u0085\u00A0\u1680\u2000-\u200A\u2028\u2029\u202F\u205F\u3000]+$', '', 'g'))";

fn find_pending_sql() -> String {
    format!(
        "SELECT {} FROM tenant_invitations \
         WHERE status = 'pending' AND {} = $1 \
         ORDER BY created_date, id LIMIT 1",
        INVITATION_COLUMNS, NORMALIZED_EMAIL_SQL
    )
}

/// PostgreSQL implementation of InvitationRepository
#[derive(Debug, Clone)]
pub struct PostgresInvitationRepository {
    pool: PgPool,
}

impl PostgresInvitationRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn get(&self, id: &InvitationId) -> Result<Option<TenantInvitation>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tenant_invitations WHERE id = $1",
            INVITATION_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::operation_failed(format!("Failed to get invitation: {}", e)))?;

        row.as_ref().map(row_to_invitation).transpose()
    }

    async fn create(&self, invitation: TenantInvitation) -> Result<TenantInvitation, DomainError> {
        validate_invitation_token(invitation.invitation_token())
            .map_err(|e| DomainError::invalid_argument(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO tenant_invitations (id, email, company_name, inviter_name, intended_role,
                                            status, expires_at, invitation_token, created_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(invitation.id().as_str())
        .bind(invitation.email())
        .bind(invitation.company_name())
        .bind(invitation.inviter_name())
        .bind(invitation.intended_role().as_str())
        .bind(invitation.status().as_str())
        .bind(invitation.expires_at())
        .bind(invitation.invitation_token())
        .bind(invitation.created_date())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::operation_failed(format!("Failed to create invitation: {}", e)))?;

        Ok(invitation)
    }

    async fn find_pending_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<TenantInvitation>, DomainError> {
        let row = sqlx::query(&find_pending_sql())
            .bind(normalized_email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!("Failed to find pending invitation: {}", e))
            })?;

        row.as_ref().map(row_to_invitation).transpose()
    }

    async fn mark_expired(&self, id: &InvitationId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE tenant_invitations SET status = 'expired' WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!("Failed to expire invitation: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Invitation '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

fn row_to_invitation(row: &sqlx::postgres::PgRow) -> Result<TenantInvitation, DomainError> {
    let id: String = row.get("id");
    let email: String = row.get("email");
    let company_name: String = row.get("company_name");
    let inviter_name: String = row.get("inviter_name");
    let intended_role: String = row.get("intended_role");
    let status: String = row.get("status");
    let expires_at: Option<DateTime<Utc>> = row.get("expires_at");
    let invitation_token: String = row.get("invitation_token");
    let created_date: DateTime<Utc> = row.get("created_date");

    let invitation_id = InvitationId::new(&id).map_err(|e| {
        DomainError::operation_failed(format!("Invalid invitation ID in database: {}", e))
    })?;

    let mut invitation = TenantInvitation::new(
        invitation_id,
        email,
        company_name,
        inviter_name,
        UserRole::parse(&intended_role),
        invitation_token,
    )
    .with_status(InvitationStatus::parse(&status))
    .with_created_date(created_date);

    if let Some(expires_at) = expires_at {
        invitation = invitation.with_expires_at(expires_at);
    }

    Ok(invitation)
}
