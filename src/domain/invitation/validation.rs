//! Invitation validation utilities

use thiserror::Error;

/// Errors that can occur during invitation validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvitationValidationError {
    #[error("Invitation ID cannot be empty")]
    EmptyId,

    #[error("Invitation ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Invitation ID contains invalid character: '{0}'")]
    InvalidIdCharacter(char),

    #[error("Invitation token cannot be empty")]
    EmptyToken,
}

const MAX_INVITATION_ID_LENGTH: usize = 64;

/// Validate an invitation ID: alphanumeric, hyphens and underscores, max 64
pub fn validate_invitation_id(id: &str) -> Result<(), InvitationValidationError> {
    if id.is_empty() {
        return Err(InvitationValidationError::EmptyId);
    }

    if id.len() > MAX_INVITATION_ID_LENGTH {
        return Err(InvitationValidationError::IdTooLong(MAX_INVITATION_ID_LENGTH));
    }

    match id
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        Some(c) => Err(InvitationValidationError::InvalidIdCharacter(c)),
        None => Ok(()),
    }
}

/// Validate an invitation token
pub fn validate_invitation_token(token: &str) -> Result<(), InvitationValidationError> {
    if token.trim().is_empty() {
        return Err(InvitationValidationError::EmptyToken);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invitation_id() {
        assert!(validate_invitation_id("inv-1").is_ok());
        assert_eq!(validate_invitation_id(""), Err(InvitationValidationError::EmptyId));
        assert_eq!(
            validate_invitation_id("inv/1"),
            Err(InvitationValidationError::InvalidIdCharacter('/'))
        );
    }

    #[test]
    fn test_validate_invitation_token() {
        assert!(validate_invitation_token("tok_abc").is_ok());
        assert_eq!(
            validate_invitation_token("  "),
            Err(InvitationValidationError::EmptyToken)
        );
    }
}
