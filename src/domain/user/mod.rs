//! User domain
//!
//! Identities, their tenant membership and the repository trait used to
//! read and update them.

mod entity;
mod repository;
mod validation;

pub use entity::{SubscriptionStatus, User, UserId, UserRole};
pub use repository::UserRepository;
pub use validation::{normalize_email, validate_email, validate_user_id, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
