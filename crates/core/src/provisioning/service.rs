//! Profile seed derivation.

use crate::auth::UserRole;

use super::error::ProvisioningError;
use super::types::{ProfileSeed, SignupMetadata};

/// Derives profile rows from signup data.
pub struct ProvisioningService;

impl ProvisioningService {
    /// Builds a [`ProfileSeed`] from an email and optional signup metadata.
    ///
    /// Fallbacks:
    /// - `name` defaults to the email local part
    /// - `role` defaults to `agent` when absent
    /// - all other fields pass through as given
    ///
    /// Blank strings are treated the same as absent keys, so a caller
    /// sending `"name": ""` gets the same result as one omitting the key.
    ///
    /// # Errors
    ///
    /// Returns `ProvisioningError::InvalidEmail` if the email has no local part.
    /// Returns `ProvisioningError::UnknownRole` if a role is supplied but not recognized.
    pub fn seed_from_signup(
        email: &str,
        metadata: &SignupMetadata,
    ) -> Result<ProfileSeed, ProvisioningError> {
        let local_part = email
            .split_once('@')
            .map(|(local, _)| local.trim())
            .filter(|local| !local.is_empty())
            .ok_or_else(|| ProvisioningError::InvalidEmail(email.to_string()))?;

        let name = non_blank(metadata.name.as_deref())
            .unwrap_or(local_part)
            .to_string();

        let role = match non_blank(metadata.role.as_deref()) {
            Some(raw) => {
                UserRole::parse(raw).ok_or_else(|| ProvisioningError::UnknownRole(raw.to_string()))?
            }
            None => UserRole::Agent,
        };

        Ok(ProfileSeed {
            name,
            phone: non_blank(metadata.phone.as_deref()).map(String::from),
            company_name: non_blank(metadata.company_name.as_deref()).map(String::from),
            role,
            department: non_blank(metadata.department.as_deref()).map(String::from),
            position: non_blank(metadata.position.as_deref()).map(String::from),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meta() -> SignupMetadata {
        SignupMetadata::default()
    }

    #[test]
    fn test_defaults_from_bare_email() {
        let seed = ProvisioningService::seed_from_signup("ravi@triplexa.in", &meta()).unwrap();

        assert_eq!(seed.name, "ravi");
        assert_eq!(seed.role, UserRole::Agent);
        assert_eq!(seed.phone, None);
        assert_eq!(seed.company_name, None);
        assert_eq!(seed.department, None);
        assert_eq!(seed.position, None);
    }

    #[test]
    fn test_metadata_overrides_defaults() {
        let metadata = SignupMetadata {
            name: Some("Ravi Kumar".into()),
            phone: Some("+91-98100-12345".into()),
            company_name: Some("Sunrise Tours".into()),
            role: Some("staff".into()),
            department: Some("operations".into()),
            position: Some("executive".into()),
        };

        let seed = ProvisioningService::seed_from_signup("ravi@triplexa.in", &metadata).unwrap();

        assert_eq!(seed.name, "Ravi Kumar");
        assert_eq!(seed.role, UserRole::Staff);
        assert_eq!(seed.phone.as_deref(), Some("+91-98100-12345"));
        assert_eq!(seed.company_name.as_deref(), Some("Sunrise Tours"));
        assert_eq!(seed.department.as_deref(), Some("operations"));
        assert_eq!(seed.position.as_deref(), Some("executive"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let metadata = SignupMetadata {
            name: Some("   ".into()),
            role: Some(String::new()),
            ..meta()
        };

        let seed = ProvisioningService::seed_from_signup("ops@triplexa.in", &metadata).unwrap();

        assert_eq!(seed.name, "ops");
        assert_eq!(seed.role, UserRole::Agent);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        // Same inputs must yield the same seed: callers rely on this to make
        // repeated provisioning attempts converge on one row.
        let metadata = SignupMetadata {
            name: Some("Asha".into()),
            role: Some("manager".into()),
            ..meta()
        };

        let first = ProvisioningService::seed_from_signup("asha@triplexa.in", &metadata).unwrap();
        let second = ProvisioningService::seed_from_signup("asha@triplexa.in", &metadata).unwrap();

        assert_eq!(first, second);
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("@triplexa.in")]
    #[case("   @triplexa.in")]
    fn test_invalid_emails_rejected(#[case] email: &str) {
        let result = ProvisioningService::seed_from_signup(email, &meta());
        assert!(matches!(result, Err(ProvisioningError::InvalidEmail(_))));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let metadata = SignupMetadata {
            role: Some("superuser".into()),
            ..meta()
        };

        let result = ProvisioningService::seed_from_signup("x@y.z", &metadata);
        assert_eq!(
            result,
            Err(ProvisioningError::UnknownRole("superuser".into()))
        );
    }
}
