//! Invitation domain
//!
//! Invitations offer an email address a seat in an existing tenant. Expiry is
//! evaluated lazily when an invitation is read.

mod entity;
mod repository;
mod validation;

pub use entity::{
    effective_status, InvitationId, InvitationOutcome, InvitationStatus, PendingInvitation,
    TenantInvitation,
};
pub use repository::InvitationRepository;
pub use validation::{
    validate_invitation_id, validate_invitation_token, InvitationValidationError,
};

#[cfg(test)]
pub use repository::MockInvitationRepository;
