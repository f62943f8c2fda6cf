//! Infrastructure layer - Repository and service implementations

pub mod auth;
pub mod invitation;
pub mod logging;
pub mod storage;
pub mod tenant;
pub mod user;
