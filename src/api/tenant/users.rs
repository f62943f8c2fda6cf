//! Identity representation shared by the tenant endpoints

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{SubscriptionStatus, User, UserRole};

/// Identity as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub tenant_id: Option<String>,
    pub role: UserRole,
    pub is_tenant_owner: bool,
    pub subscription_status: SubscriptionStatus,
    pub trial_start_date: Option<NaiveDate>,
    pub trial_end_date: Option<NaiveDate>,
    pub company_name: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            email: user.email().to_string(),
            full_name: user.full_name().map(String::from),
            tenant_id: user.tenant_id().map(|t| t.as_str().to_string()),
            role: user.role(),
            is_tenant_owner: user.is_tenant_owner(),
            subscription_status: user.subscription_status(),
            trial_start_date: user.trial_start_date(),
            trial_end_date: user.trial_end_date(),
            company_name: user.company_name().map(String::from),
            created_date: user.created_date(),
        }
    }
}
