//! Storage key names for persisted sessions.
//!
//! These names are shared with every other client of the same storage and
//! must not change.

use crate::config::DeploymentProfile;

/// Storage key names used by one deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: &'static str,
    pub company_id: Option<&'static str>,
    pub branch_id: Option<&'static str>,
    pub tenant_id: Option<&'static str>,
    pub expiration: &'static str,
}

impl SessionKeys {
    pub const MULTI_TENANT: Self = Self {
        token: "access_token",
        company_id: Some("company_id"),
        branch_id: Some("branch_id"),
        tenant_id: Some("tenant_id"),
        expiration: "token_expiration",
    };

    pub const SIMPLE_ADMIN: Self = Self {
        token: "token",
        company_id: None,
        branch_id: None,
        tenant_id: None,
        expiration: "token_expiration",
    };

    pub fn for_profile(profile: DeploymentProfile) -> Self {
        match profile {
            DeploymentProfile::MultiTenant => Self::MULTI_TENANT,
            DeploymentProfile::SimpleAdmin => Self::SIMPLE_ADMIN,
        }
    }

    /// Every key this profile writes.
    pub fn all(&self) -> Vec<&'static str> {
        let mut keys = vec![self.token];
        keys.extend(self.company_id);
        keys.extend(self.branch_id);
        keys.extend(self.tenant_id);
        keys.push(self.expiration);
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_tenant_keys() {
        let keys = SessionKeys::for_profile(DeploymentProfile::MultiTenant);
        assert_eq!(
            keys.all(),
            vec![
                "access_token",
                "company_id",
                "branch_id",
                "tenant_id",
                "token_expiration"
            ]
        );
    }

    #[test]
    fn test_simple_admin_keys() {
        let keys = SessionKeys::for_profile(DeploymentProfile::SimpleAdmin);
        assert_eq!(keys.all(), vec!["token", "token_expiration"]);
    }
}
