//! Tenant infrastructure module
//!
//! Trial provisioning and the team member directory.

mod directory;
mod provisioner;

pub use directory::{TeamDirectory, TeamMembers};
pub use provisioner::TenantProvisioner;
