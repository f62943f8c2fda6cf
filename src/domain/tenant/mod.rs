//! Tenant domain
//!
//! A tenant is the scope shared by every identity carrying the same tenant id.

mod entity;
mod trial;

pub use entity::TenantId;
pub use trial::{validate_trial_length, TrialPatch, DEFAULT_TRIAL_DAYS, MAX_TRIAL_DAYS};
