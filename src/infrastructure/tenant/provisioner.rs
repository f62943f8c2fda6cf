//! Starts a self-owned trial tenant for an identity without one

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::tenant::{TrialPatch, DEFAULT_TRIAL_DAYS};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// Provisions trial tenants
#[derive(Debug)]
pub struct TenantProvisioner<R: UserRepository> {
    repository: Arc<R>,
    trial_length_days: u32,
}

impl<R: UserRepository> TenantProvisioner<R> {
    /// Create a provisioner with the default 30 day trial
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            trial_length_days: DEFAULT_TRIAL_DAYS,
        }
    }

    /// Override the trial length
    pub fn with_trial_length_days(mut self, days: u32) -> Self {
        self.trial_length_days = days;
        self
    }

    pub fn trial_length_days(&self) -> u32 {
        self.trial_length_days
    }

    /// Start a trial tenant for `caller`, dated today (UTC)
    pub async fn initialize_trial(
        &self,
        caller: &User,
        company_name: &str,
    ) -> Result<User, DomainError> {
        self.initialize_trial_on(caller, company_name, Utc::now().date_naive())
            .await
    }

    /// Start a trial tenant for `caller` beginning on `today`
    ///
    /// Returns the caller merged with the written fields; the record is not
    /// re-read after the write.
    pub async fn initialize_trial_on(
        &self,
        caller: &User,
        company_name: &str,
        today: NaiveDate,
    ) -> Result<User, DomainError> {
        let patch = TrialPatch::new(caller.id(), company_name, today, self.trial_length_days)?;

        if caller.is_tenant_initialized() {
            warn!(user_id = %caller.id(), "Trial requested for an initialized tenant");
            return Err(already_initialized());
        }

        let applied = self
            .repository
            .apply_trial_if_uninitialized(caller.id(), &patch)
            .await
            .map_err(DomainError::into_operation_failed)?;

        if !applied {
            warn!(user_id = %caller.id(), "Tenant was initialized concurrently");
            return Err(already_initialized());
        }

        let mut user = caller.clone();
        user.apply_trial(&patch);

        info!(
            user_id = %user.id(),
            tenant_id = %patch.tenant_id,
            trial_end_date = %patch.trial_end_date,
            "Trial tenant initialized"
        );

        Ok(user)
    }
}

fn already_initialized() -> DomainError {
    DomainError::already_initialized("User already has an initialized tenant")
}
