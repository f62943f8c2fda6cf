//! Database migrations infrastructure

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL migrator tracking applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::operation_failed(format!("Failed to create migrations table: {}", e))
        })?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!("Failed to check migration status: {}", e))
            })
    }

    /// Runs a single migration, skipping it when already recorded
    ///
    /// Returns whether the migration was applied by this call.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        // Multi-statement bodies need the simple query protocol
        sqlx::raw_sql(migration.up)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        info!(
            version = migration.version,
            description = migration.description,
            "Applied migration"
        );

        Ok(true)
    }

    /// Reverts a single migration if it was applied
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        sqlx::raw_sql(migration.down)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!(
                    "Failed to revert migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        Ok(true)
    }

    /// Latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations WHERE success = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::operation_failed(format!("Failed to get migration version: {}", e))
            })
    }
}

/// A versioned schema change
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    /// SQL run when applying
    pub up: &'static str,
    /// SQL run when reverting
    pub down: &'static str,
}

/// Schema for identities and invitations
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Create users table",
            up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(64) PRIMARY KEY,
                email TEXT NOT NULL,
                full_name TEXT,
                tenant_id VARCHAR(64),
                role VARCHAR(16) NOT NULL DEFAULT 'user',
                is_tenant_owner BOOLEAN NOT NULL DEFAULT FALSE,
                subscription_status VARCHAR(16) NOT NULL DEFAULT 'none',
                trial_start_date DATE,
                trial_end_date DATE,
                company_name TEXT,
                created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_users_tenant_id ON users(tenant_id);
            "#,
            down: "DROP TABLE IF EXISTS users;",
        },
        Migration {
            version: 2,
            description: "Create tenant_invitations table",
            up: r#"
            CREATE TABLE IF NOT EXISTS tenant_invitations (
                id VARCHAR(64) PRIMARY KEY,
                email TEXT NOT NULL,
                company_name TEXT NOT NULL,
                inviter_name TEXT NOT NULL,
                intended_role VARCHAR(16) NOT NULL DEFAULT 'user',
                status VARCHAR(16) NOT NULL DEFAULT 'pending',
                expires_at TIMESTAMPTZ,
                invitation_token TEXT NOT NULL,
                created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_tenant_invitations_pending_email
                ON tenant_invitations (lower(btrim(email)))
                WHERE status = 'pending';
            "#,
            down: "DROP TABLE IF EXISTS tenant_invitations;",
        },
        Migration {
            version: 3,
            description: "Match pending invitation emails on Unicode-trimmed form",
            up: r"
            DROP INDEX IF EXISTS idx_tenant_invitations_pending_email;
            CREATE INDEX idx_tenant_invitations_pending_email
                ON tenant_invitations (lower(regexp_replace(email, '^[\u0009-\u000D\u0020\u0085\u00A0\u1680\u2000-\u200A\u2028\u2029\u202F\u205F\u3000]+|[\u0009-\u000D\u0020\u0085\u00A0\u1680\u2000-\u200A\u2028\u2029\u202F\u205F\u3000]+$', '', 'g')))
                WHERE status = 'pending';
            ",
            down: r"
            DROP INDEX IF EXISTS idx_tenant_invitations_pending_email;
            CREATE INDEX idx_tenant_invitations_pending_email
                ON tenant_invitations (lower(btrim(email)))
                WHERE status = 'pending';
            ",
        },
    ]
}

/// Runs all pending schema migrations, returning how many were applied
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in schema_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}

/// Reverts the most recently applied migration, returning its version
pub async fn revert_latest(pool: &PgPool) -> Result<Option<i64>, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    let Some(version) = migrator.current_version().await? else {
        return Ok(None);
    };

    let migration = schema_migrations()
        .into_iter()
        .find(|m| m.version == version)
        .ok_or_else(|| {
            DomainError::operation_failed(format!("Unknown applied migration version {}", version))
        })?;

    migrator.revert_migration(&migration).await?;
    info!(version, description = migration.description, "Reverted migration");

    Ok(Some(version))
}
