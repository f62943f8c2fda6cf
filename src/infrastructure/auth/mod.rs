//! Authentication infrastructure module
//!
//! This module provides JWT token management for caller authentication.

mod jwt;

pub use jwt::{token_lifetime, JwtClaims, JwtConfig, JwtGenerator, JwtService};
