//! Tenant identifier

use serde::{Deserialize, Serialize};

use crate::domain::user::{validate_user_id, UserId, UserValidationError};

/// Identifier of a tenant scope
///
/// A tenant has no record of its own: its id is the id of the identity that
/// owns it. Keeping it a separate type stops user ids and tenant ids from
/// being passed for one another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Create a new TenantId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// The tenant scope owned by the given identity
    pub fn owned_by(owner: &UserId) -> Self {
        Self(owner.as_str().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_by_uses_owner_id() {
        let owner = UserId::new("owner-1").unwrap();
        let tenant = TenantId::owned_by(&owner);

        assert_eq!(tenant.as_str(), "owner-1");
        assert_ne!(tenant, TenantId::owned_by(&UserId::new("someone-else").unwrap()));
    }

    #[test]
    fn test_tenant_id_validation() {
        assert!(TenantId::new("acme").is_ok());
        assert!(TenantId::new("").is_err());
        assert!(TenantId::new("bad id").is_err());
    }

    #[test]
    fn test_tenant_id_serde_roundtrip_as_string() {
        let tenant = TenantId::new("acme").unwrap();
        let json = serde_json::to_string(&tenant).unwrap();
        assert_eq!(json, "\"acme\"");

        let bad: Result<TenantId, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
