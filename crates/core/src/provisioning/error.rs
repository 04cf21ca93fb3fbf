//! Provisioning error types.

use thiserror::Error;

/// Errors that can occur while deriving a profile from signup data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// The signup email is not usable as a name fallback.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A role was supplied but is not one of the known roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
