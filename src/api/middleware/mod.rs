//! API middleware components

pub mod logging;
pub mod user_auth;

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use user_auth::RequireUser;
