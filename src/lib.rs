//! Tenant Onboarding API
//!
//! HTTP/JSON service for a multi-tenant SaaS application:
//! - Pending invitation lookup with lazy expiry
//! - Self-service trial tenant provisioning
//! - Team member directory scoped to the caller's tenant

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use anyhow::Context;
use config::BootstrapConfig;
use domain::invitation::InvitationRepository;
use domain::tenant::validate_trial_length;
use domain::user::{validate_email, User, UserId, UserRepository, UserRole};
use infrastructure::{
    auth::{token_lifetime, JwtConfig, JwtGenerator, JwtService},
    invitation::{InMemoryInvitationRepository, PostgresInvitationRepository},
    storage::{connect_pool, run_migrations, PostgresConfig, StorageType},
    user::{InMemoryUserRepository, PostgresUserRepository},
};
use rand::Rng;
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    validate_settings(config)?;

    let backend: StorageType = config
        .storage
        .backend
        .parse()
        .map_err(anyhow::Error::msg)?;

    info!("Storage backend: {:?}", backend);

    let jwt_service = create_jwt_service(config);

    match backend {
        StorageType::InMemory => {
            let users = Arc::new(InMemoryUserRepository::new());
            let invitations = Arc::new(InMemoryInvitationRepository::new());
            build_state(users, invitations, jwt_service, config).await
        }
        StorageType::Postgres => {
            let pg_config = postgres_config(config).ok_or_else(|| {
                anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = connect_pool(&pg_config).await?;

            let applied = run_migrations(&pool).await?;
            info!(applied, "Schema migrations checked");

            let users = Arc::new(PostgresUserRepository::new(pool.clone()));
            let invitations = Arc::new(PostgresInvitationRepository::new(pool));
            build_state(users, invitations, jwt_service, config).await
        }
    }
}

/// Reject settings that would otherwise fail on every request
fn validate_settings(config: &AppConfig) -> anyhow::Result<()> {
    token_lifetime(config.auth.jwt_expiration_hours)
        .context("Invalid auth.jwt_expiration_hours")?;
    validate_trial_length(config.trial.length_days).context("Invalid trial.length_days")?;

    Ok(())
}

async fn build_state<U, I>(
    users: Arc<U>,
    invitations: Arc<I>,
    jwt_service: Arc<dyn JwtGenerator>,
    config: &AppConfig,
) -> anyhow::Result<AppState>
where
    U: UserRepository + 'static,
    I: InvitationRepository + 'static,
{
    if config.bootstrap.enabled {
        create_initial_user(users.as_ref(), &config.bootstrap, jwt_service.as_ref()).await?;
    }

    Ok(AppState::new(
        users,
        invitations,
        jwt_service,
        config.trial.length_days,
    ))
}

/// PostgreSQL settings from config, falling back to `DATABASE_URL`
pub fn postgres_config(config: &AppConfig) -> Option<PostgresConfig> {
    config
        .storage
        .database_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .map(|url| PostgresConfig::new(url).with_max_connections(config.storage.max_connections))
}

/// JWT secret from config or `JWT_SECRET`
pub fn configured_jwt_secret(config: &AppConfig) -> Option<String> {
    config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .filter(|secret| !secret.is_empty())
}

fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let secret = configured_jwt_secret(config).unwrap_or_else(|| {
        warn!(
            "No JWT_SECRET configured. Generating random secret. \
            Tokens will NOT survive a restart."
        );
        generate_random_secret()
    });

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_expiration_hours,
    )))
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Create an admin identity when the user store is empty
async fn create_initial_user<U: UserRepository + ?Sized>(
    users: &U,
    bootstrap: &BootstrapConfig,
    jwt_service: &dyn JwtGenerator,
) -> anyhow::Result<()> {
    if users.count().await? > 0 {
        return Ok(());
    }

    let id = UserId::new(bootstrap.user_id.as_str())
        .map_err(|e| anyhow::anyhow!("Invalid bootstrap user id: {}", e))?;
    validate_email(&bootstrap.email)
        .map_err(|e| anyhow::anyhow!("Invalid bootstrap email: {}", e))?;
    let user = User::new(id, bootstrap.email.as_str()).with_role(UserRole::Admin);
    let user = users.create(user).await?;
    let token = jwt_service.generate(&user)?;

    info!("===========================================");
    info!("Initial admin identity created!");
    info!("User ID: {}", user.id());
    info!("Email: {}", user.email());
    info!("Bearer token: {}", token);
    info!("===========================================");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tenant::MAX_TRIAL_DAYS;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_default_state_bootstraps_admin() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.user_repository.count().await.unwrap(), 1);

        let admin = state
            .user_repository
            .get(&UserId::new("admin").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role(), UserRole::Admin);
        assert_eq!(admin.email(), "admin@localhost");
        assert!(admin.tenant_id().is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_can_be_disabled() {
        let mut config = AppConfig::default();
        config.bootstrap.enabled = false;

        let state = create_app_state_with_config(&config).await.unwrap();
        assert_eq!(state.user_repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_skips_populated_store() {
        let users = InMemoryUserRepository::with_users(vec![User::new(
            UserId::new("jane").unwrap(),
            "jane@acme.io",
        )]);
        let jwt = JwtService::new(JwtConfig::new("secret", 1));

        assert_ok!(create_initial_user(&users, &BootstrapConfig::default(), &jwt).await);

        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_invalid_email() {
        let users = InMemoryUserRepository::new();
        let jwt = JwtService::new(JwtConfig::new("secret", 1));
        let bootstrap = BootstrapConfig {
            email: "not-an-email".to_string(),
            ..BootstrapConfig::default()
        };

        assert_err!(create_initial_user(&users, &bootstrap, &jwt).await);
        assert_eq!(users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_trial_length_fails_startup() {
        for days in [0, MAX_TRIAL_DAYS + 1] {
            let mut config = AppConfig::default();
            config.trial.length_days = days;

            let err = create_app_state_with_config(&config).await.err().unwrap();
            assert!(err.to_string().contains("trial.length_days"));
        }
    }

    #[tokio::test]
    async fn test_out_of_range_token_lifetime_fails_startup() {
        let mut config = AppConfig::default();
        config.auth.jwt_expiration_hours = u64::MAX;

        let err = create_app_state_with_config(&config).await.err().unwrap();
        assert!(err.to_string().contains("auth.jwt_expiration_hours"));
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "redis".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[test]
    fn test_configured_jwt_secret_from_config() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("from-config".to_string());

        assert_eq!(configured_jwt_secret(&config).as_deref(), Some("from-config"));
    }

    #[test]
    fn test_postgres_config_from_settings() {
        let mut config = AppConfig::default();
        config.storage.database_url = Some("postgres://db/onboarding".to_string());
        config.storage.max_connections = 4;

        let pg = postgres_config(&config).unwrap();
        assert_eq!(pg.url, "postgres://db/onboarding");
        assert_eq!(pg.max_connections, 4);
    }

    #[test]
    fn test_random_secret_length() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_random_secret());
    }
}
