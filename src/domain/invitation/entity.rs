//! Tenant invitation entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_invitation_id, InvitationValidationError};
use crate::domain::user::UserRole;

/// Invitation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvitationId(String);

impl InvitationId {
    /// Create a new InvitationId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, InvitationValidationError> {
        let id = id.into();
        validate_invitation_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InvitationId {
    type Error = InvitationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InvitationId> for String {
    fn from(id: InvitationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for InvitationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Expired,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Expired => "expired",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parse a stored status; unknown values are treated as expired so they
    /// never surface as pending
    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "declined" => Self::Declined,
            _ => Self::Expired,
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status an invitation has at `now`, whatever was last persisted
///
/// A pending invitation whose expiry lies strictly before `now` is expired.
pub fn effective_status(
    status: InvitationStatus,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> InvitationStatus {
    match (status, expires_at) {
        (InvitationStatus::Pending, Some(expires_at)) if now > expires_at => {
            InvitationStatus::Expired
        }
        (status, _) => status,
    }
}

/// An offer for someone to join a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantInvitation {
    id: InvitationId,
    email: String,
    company_name: String,
    inviter_name: String,
    intended_role: UserRole,
    status: InvitationStatus,
    expires_at: Option<DateTime<Utc>>,
    invitation_token: String,
    created_date: DateTime<Utc>,
}

impl TenantInvitation {
    /// Create a pending invitation without expiry
    pub fn new(
        id: InvitationId,
        email: impl Into<String>,
        company_name: impl Into<String>,
        inviter_name: impl Into<String>,
        intended_role: UserRole,
        invitation_token: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            company_name: company_name.into(),
            inviter_name: inviter_name.into(),
            intended_role,
            status: InvitationStatus::Pending,
            expires_at: None,
            invitation_token: invitation_token.into(),
            created_date: Utc::now(),
        }
    }

    // Builders

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_status(mut self, status: InvitationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = created_date;
        self
    }

    // Getters

    pub fn id(&self) -> &InvitationId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn inviter_name(&self) -> &str {
        &self.inviter_name
    }

    pub fn intended_role(&self) -> UserRole {
        self.intended_role
    }

    pub fn status(&self) -> InvitationStatus {
        self.status
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn invitation_token(&self) -> &str {
        &self.invitation_token
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    // Status checks

    pub fn effective_status(&self, now: DateTime<Utc>) -> InvitationStatus {
        effective_status(self.status, self.expires_at, now)
    }

    /// Persisted as pending but past its expiry at `now`
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Pending
            && self.effective_status(now) == InvitationStatus::Expired
    }

    // Mutators

    pub fn mark_expired(&mut self) {
        self.status = InvitationStatus::Expired;
    }

    /// Projection shown to the invitee; omits the email and status
    pub fn to_pending(&self) -> PendingInvitation {
        PendingInvitation {
            id: self.id.as_str().to_string(),
            invitation_token: self.invitation_token.clone(),
            company_name: self.company_name.clone(),
            inviter_name: self.inviter_name.clone(),
            intended_role: self.intended_role,
        }
    }
}

/// Redacted view of a pending invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingInvitation {
    pub id: String,
    pub invitation_token: String,
    pub company_name: String,
    pub inviter_name: String,
    pub intended_role: UserRole,
}

/// Result of looking up the caller's pending invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationOutcome {
    /// A valid pending invitation was found
    Pending(PendingInvitation),
    /// The matching invitation had lapsed and has been marked expired
    Expired,
    /// Nothing pending for this email
    NotFound,
}

impl InvitationOutcome {
    pub fn has_pending_invitation(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_invitation(id: &str) -> TenantInvitation {
        TenantInvitation::new(
            InvitationId::new(id).unwrap(),
            "jane@acme.io",
            "Acme",
            "John Owner",
            UserRole::User,
            "tok-123",
        )
    }

    #[test]
    fn test_effective_status_pending_without_expiry() {
        let now = Utc::now();
        assert_eq!(
            effective_status(InvitationStatus::Pending, None, now),
            InvitationStatus::Pending
        );
    }

    #[test]
    fn test_effective_status_future_expiry() {
        let now = Utc::now();
        let later = now + Duration::days(1);
        assert_eq!(
            effective_status(InvitationStatus::Pending, Some(later), now),
            InvitationStatus::Pending
        );
    }

    #[test]
    fn test_effective_status_past_expiry() {
        let now = Utc::now();
        let earlier = now - Duration::seconds(1);
        assert_eq!(
            effective_status(InvitationStatus::Pending, Some(earlier), now),
            InvitationStatus::Expired
        );
    }

    #[test]
    fn test_effective_status_expiry_equal_to_now_is_still_pending() {
        let now = Utc::now();
        assert_eq!(
            effective_status(InvitationStatus::Pending, Some(now), now),
            InvitationStatus::Pending
        );
    }

    #[test]
    fn test_effective_status_keeps_terminal_states() {
        let now = Utc::now();
        let earlier = now - Duration::days(3);

        for status in [InvitationStatus::Accepted, InvitationStatus::Declined] {
            assert_eq!(effective_status(status, Some(earlier), now), status);
        }
    }

    #[test]
    fn test_is_stale() {
        let now = Utc::now();

        let stale = create_test_invitation("inv-1").with_expires_at(now - Duration::hours(1));
        assert!(stale.is_stale(now));

        let fresh = create_test_invitation("inv-2").with_expires_at(now + Duration::hours(1));
        assert!(!fresh.is_stale(now));

        let accepted = create_test_invitation("inv-3")
            .with_expires_at(now - Duration::hours(1))
            .with_status(InvitationStatus::Accepted);
        assert!(!accepted.is_stale(now));
    }

    #[test]
    fn test_pending_projection_has_exact_fields() {
        let invitation = create_test_invitation("inv-1");
        let json = serde_json::to_value(invitation.to_pending()).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec!["company_name", "id", "intended_role", "invitation_token", "inviter_name"]
        );
        assert_eq!(json["intended_role"], "user");
    }

    #[test]
    fn test_mark_expired() {
        let mut invitation = create_test_invitation("inv-1");
        invitation.mark_expired();
        assert_eq!(invitation.status(), InvitationStatus::Expired);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(InvitationStatus::parse("pending"), InvitationStatus::Pending);
        assert_eq!(InvitationStatus::parse("accepted"), InvitationStatus::Accepted);
        assert_eq!(InvitationStatus::parse("declined"), InvitationStatus::Declined);
        assert_eq!(InvitationStatus::parse("expired"), InvitationStatus::Expired);
        assert_eq!(InvitationStatus::parse("bogus"), InvitationStatus::Expired);
    }
}
