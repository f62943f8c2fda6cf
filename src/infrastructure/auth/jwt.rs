//! HS256 bearer tokens identifying a caller

use std::fmt;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::domain::DomainError;

/// Claims carried by an identity token. `sub` is the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user: &User, lifetime_hours: u64) -> Result<Self, DomainError> {
        Self::for_subject(user.id().as_str(), user.email(), lifetime_hours)
    }

    /// Claims for an identity that has not been loaded from the store
    ///
    /// Fails with `InvalidArgument` when the lifetime overflows a timestamp.
    pub fn for_subject(
        sub: impl Into<String>,
        email: impl Into<String>,
        lifetime_hours: u64,
    ) -> Result<Self, DomainError> {
        let issued = Utc::now();
        let expires = issued
            .checked_add_signed(token_lifetime(lifetime_hours)?)
            .ok_or_else(|| lifetime_out_of_range(lifetime_hours))?;

        Ok(Self {
            sub: sub.into(),
            email: email.into(),
            iat: issued.timestamp(),
            exp: expires.timestamp(),
        })
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Token lifetime as a duration; rejects counts chrono cannot represent
pub fn token_lifetime(hours: u64) -> Result<TimeDelta, DomainError> {
    i64::try_from(hours)
        .ok()
        .and_then(TimeDelta::try_hours)
        .ok_or_else(|| lifetime_out_of_range(hours))
}

fn lifetime_out_of_range(hours: u64) -> DomainError {
    DomainError::invalid_argument(format!("Token lifetime of {} hours is out of range", hours))
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Signs and verifies identity tokens
pub trait JwtGenerator: Send + Sync + fmt::Debug {
    fn sign(&self, claims: &JwtClaims) -> Result<String, DomainError>;

    /// Verify signature and expiry; any failure is `Unauthenticated`
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    fn expiration_hours(&self) -> u64;

    fn generate(&self, user: &User) -> Result<String, DomainError> {
        self.sign(&JwtClaims::new(user, self.expiration_hours())?)
    }
}

#[derive(Clone)]
pub struct JwtService {
    expiration_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.expiration_hours)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            expiration_hours: config.expiration_hours,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl JwtGenerator for JwtService {
    fn sign(&self, claims: &JwtClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| DomainError::operation_failed(format!("Token signing failed: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::unauthenticated(format!("Invalid bearer token: {}", e)))
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    const SECRET: &str = "jwt-test-secret";

    fn jane() -> User {
        User::new(UserId::new("jane").unwrap(), "jane@acme.io")
    }

    fn service(secret: &str) -> JwtService {
        JwtService::new(JwtConfig::new(secret, 24))
    }

    #[test]
    fn test_issued_token_validates() {
        let service = service(SECRET);

        let token = service.generate(&jane()).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id(), "jane");
        assert_eq!(claims.email, "jane@acme.io");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        let err = service(SECRET).validate("not.a.token").unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated { .. }));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service("issuer-a").generate(&jane()).unwrap();

        let err = service("issuer-b").validate(&token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated { .. }));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service(SECRET);
        let an_hour_ago = Utc::now() - TimeDelta::hours(1);
        let claims = JwtClaims {
            sub: "jane".to_string(),
            email: "jane@acme.io".to_string(),
            iat: (an_hour_ago - TimeDelta::hours(1)).timestamp(),
            exp: an_hour_ago.timestamp(),
        };
        assert!(claims.is_expired());

        let token = service.sign(&claims).unwrap();

        let err = service.validate(&token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated { .. }));
    }

    #[test]
    fn test_out_of_range_lifetime_is_invalid_argument() {
        for hours in [1_000_000_000_000, u64::MAX] {
            let err = JwtClaims::for_subject("jane", "jane@acme.io", hours).unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument { .. }));
            assert!(token_lifetime(hours).is_err());
        }

        let service = JwtService::new(JwtConfig::new(SECRET, u64::MAX));
        let err = service.generate(&jane()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { .. }));
    }

    #[test]
    fn test_token_lifetime_in_range() {
        assert_eq!(token_lifetime(48).unwrap(), TimeDelta::hours(48));
        assert_eq!(token_lifetime(0).unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_debug_output_omits_secret() {
        let rendered = format!("{:?}", service(SECRET));

        assert!(rendered.contains("expiration_hours"));
        assert!(!rendered.contains(SECRET));
    }
}
