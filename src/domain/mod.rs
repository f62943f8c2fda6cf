//! Domain layer - Core business logic and entities

pub mod error;
pub mod invitation;
pub mod tenant;
pub mod user;

pub use error::DomainError;
pub use invitation::{
    InvitationId, InvitationOutcome, InvitationRepository, InvitationStatus, PendingInvitation,
    TenantInvitation,
};
pub use tenant::{TenantId, TrialPatch};
pub use user::{SubscriptionStatus, User, UserId, UserRepository, UserRole};
