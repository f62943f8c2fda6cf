//! User entity and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};
use crate::domain::tenant::{TenantId, TrialPatch};

/// User identifier - opaque alphanumeric id issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-wide role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Standard user
    #[default]
    User,
    /// Elevated user, may see the whole tenant
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role, falling back to `User` for unknown values
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription state of a user's tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    None,
    Trial,
    Active,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }

    /// Parse a stored status, falling back to `None` for unknown values
    pub fn parse(s: &str) -> Self {
        match s {
            "trial" => Self::Trial,
            "active" => Self::Active,
            "expired" => Self::Expired,
            _ => Self::None,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity and its tenant membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    tenant_id: Option<TenantId>,
    role: UserRole,
    is_tenant_owner: bool,
    subscription_status: SubscriptionStatus,
    trial_start_date: Option<NaiveDate>,
    trial_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
    created_date: DateTime<Utc>,
}

impl User {
    /// Create a fresh identity with no tenant and no subscription
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: None,
            tenant_id: None,
            role: UserRole::User,
            is_tenant_owner: false,
            subscription_status: SubscriptionStatus::None,
            trial_start_date: None,
            trial_end_date: None,
            company_name: None,
            created_date: Utc::now(),
        }
    }

    // Builders

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_tenant(mut self, tenant_id: TenantId, is_tenant_owner: bool) -> Self {
        self.tenant_id = Some(tenant_id);
        self.is_tenant_owner = is_tenant_owner;
        self
    }

    pub fn with_tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    pub fn with_tenant_owner(mut self, is_tenant_owner: bool) -> Self {
        self.is_tenant_owner = is_tenant_owner;
        self
    }

    pub fn with_subscription(mut self, status: SubscriptionStatus) -> Self {
        self.subscription_status = status;
        self
    }

    pub fn with_trial_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.trial_start_date = start;
        self.trial_end_date = end;
        self
    }

    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    pub fn with_created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = created_date;
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_tenant_owner(&self) -> bool {
        self.is_tenant_owner
    }

    pub fn subscription_status(&self) -> SubscriptionStatus {
        self.subscription_status
    }

    pub fn trial_start_date(&self) -> Option<NaiveDate> {
        self.trial_start_date
    }

    pub fn trial_end_date(&self) -> Option<NaiveDate> {
        self.trial_end_date
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    // Capability checks

    /// A tenant counts as initialized only when both a subscription and a
    /// tenant reference are present
    pub fn is_tenant_initialized(&self) -> bool {
        self.subscription_status != SubscriptionStatus::None && self.tenant_id.is_some()
    }

    /// Admins and tenant owners may list every member of their tenant
    pub fn can_view_team(&self) -> bool {
        self.role == UserRole::Admin || self.is_tenant_owner
    }

    // Mutators

    /// Make this identity the owner of a new trial tenant
    pub fn apply_trial(&mut self, patch: &TrialPatch) {
        self.tenant_id = Some(patch.tenant_id.clone());
        self.is_tenant_owner = true;
        self.subscription_status = SubscriptionStatus::Trial;
        self.trial_start_date = Some(patch.trial_start_date);
        self.trial_end_date = Some(patch.trial_end_date);
        self.company_name = Some(patch.company_name.clone());
    }
}
