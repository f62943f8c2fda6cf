//! Trial provisioning patch

use chrono::{Days, NaiveDate};

use super::entity::TenantId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Default length of a trial period in days
pub const DEFAULT_TRIAL_DAYS: u32 = 30;

/// Longest trial period the service accepts
pub const MAX_TRIAL_DAYS: u32 = 365;

/// Check a configured trial length: at least one day, at most a year
pub fn validate_trial_length(days: u32) -> Result<(), DomainError> {
    if days == 0 || days > MAX_TRIAL_DAYS {
        return Err(DomainError::invalid_argument(format!(
            "Trial length must be between 1 and {} days, got {}",
            MAX_TRIAL_DAYS, days
        )));
    }

    Ok(())
}

/// Fields written to an identity when it starts a self-owned trial tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialPatch {
    pub tenant_id: TenantId,
    pub company_name: String,
    pub trial_start_date: NaiveDate,
    pub trial_end_date: NaiveDate,
}

impl TrialPatch {
    /// Build the patch for `owner`, starting on `today`
    ///
    /// `company_name` is trimmed; blank names are rejected.
    pub fn new(
        owner: &UserId,
        company_name: &str,
        today: NaiveDate,
        length_days: u32,
    ) -> Result<Self, DomainError> {
        let company_name = company_name.trim();

        if company_name.is_empty() {
            return Err(DomainError::invalid_argument("company_name is required"));
        }

        let trial_end_date = today
            .checked_add_days(Days::new(u64::from(length_days)))
            .ok_or_else(|| DomainError::operation_failed("Trial end date is out of range"))?;

        Ok(Self {
            tenant_id: TenantId::owned_by(owner),
            company_name: company_name.to_string(),
            trial_start_date: today,
            trial_end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_patch_spans_thirty_days() {
        let patch = TrialPatch::new(&owner(), "Acme", date(2026, 1, 15), DEFAULT_TRIAL_DAYS).unwrap();

        assert_eq!(patch.trial_start_date, date(2026, 1, 15));
        assert_eq!(patch.trial_end_date, date(2026, 2, 14));
        assert_eq!(patch.tenant_id.as_str(), "owner-1");
    }

    #[test]
    fn test_patch_crosses_year_boundary() {
        let patch = TrialPatch::new(&owner(), "Acme", date(2025, 12, 20), DEFAULT_TRIAL_DAYS).unwrap();
        assert_eq!(patch.trial_end_date, date(2026, 1, 19));
    }

    #[test]
    fn test_patch_trims_company_name() {
        let patch = TrialPatch::new(&owner(), "  Acme Corp \n", date(2026, 1, 1), 30).unwrap();
        assert_eq!(patch.company_name, "Acme Corp");
    }

    #[test]
    fn test_patch_rejects_blank_company_name() {
        for name in ["", "   ", "\t\n"] {
            let result = TrialPatch::new(&owner(), name, date(2026, 1, 1), 30);
            assert!(matches!(result, Err(DomainError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn test_trial_length_bounds() {
        assert!(validate_trial_length(1).is_ok());
        assert!(validate_trial_length(DEFAULT_TRIAL_DAYS).is_ok());
        assert!(validate_trial_length(MAX_TRIAL_DAYS).is_ok());

        for days in [0, MAX_TRIAL_DAYS + 1, u32::MAX] {
            let result = validate_trial_length(days);
            assert!(matches!(result, Err(DomainError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn test_end_date_overflow_is_server_failure() {
        let result = TrialPatch::new(&owner(), "Acme", NaiveDate::MAX, 1);
        assert!(matches!(result, Err(DomainError::OperationFailed { .. })));
    }
}
