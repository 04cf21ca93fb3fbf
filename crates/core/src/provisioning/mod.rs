//! Profile provisioning from signup metadata.
//!
//! Every signup path (self registration, managed agent credentials, admin
//! user creation) funnels through this one definition, so profile rows are
//! always derived the same way regardless of which caller creates them.

pub mod error;
pub mod service;
pub mod types;

pub use error::ProvisioningError;
pub use service::ProvisioningService;
pub use types::{ProfileSeed, SignupMetadata};
