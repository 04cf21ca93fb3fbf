//! Provisioning data types.

use serde::{Deserialize, Serialize};

use crate::auth::UserRole;

/// Optional metadata supplied at signup.
///
/// Mirrors the free-form key set accepted alongside user registration;
/// every field has a defined fallback when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupMetadata {
    /// Display name.
    pub name: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Company name (for agents).
    pub company_name: Option<String>,
    /// Requested role.
    pub role: Option<String>,
    /// Department (for staff).
    pub department: Option<String>,
    /// Position (for staff).
    pub position: Option<String>,
}

/// Fully-defaulted profile fields ready for insertion.
///
/// Produced by [`crate::provisioning::ProvisioningService`]; no field is
/// ever in an "unknown" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSeed {
    /// Display name (falls back to the email local part).
    pub name: String,
    /// Contact phone, if provided.
    pub phone: Option<String>,
    /// Company name, if provided.
    pub company_name: Option<String>,
    /// Resolved role (defaults to `agent`).
    pub role: UserRole,
    /// Department, if provided.
    pub department: Option<String>,
    /// Position, if provided.
    pub position: Option<String>,
}
