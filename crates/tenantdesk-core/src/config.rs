//! Console configuration model.
//!
//! The file format lives in the infrastructure crate; this module only holds
//! the domain view of it.

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which credential scheme a deployment uses.
///
/// The two schemes persist under different storage keys and are never
/// reconciled with each other.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentProfile {
    /// Bearer token plus tenant, company and branch identifiers.
    #[default]
    MultiTenant,
    /// Bearer token with an optional expiration, no tenant context.
    SimpleAdmin,
}

impl DeploymentProfile {
    /// Whether requests in this profile carry tenant context headers.
    pub fn carries_tenant_context(self) -> bool {
        matches!(self, Self::MultiTenant)
    }
}

impl fmt::Display for DeploymentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultiTenant => write!(f, "multi_tenant"),
            Self::SimpleAdmin => write!(f, "simple_admin"),
        }
    }
}

impl FromStr for DeploymentProfile {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "multi_tenant" | "multitenant" => Ok(Self::MultiTenant),
            "simple_admin" | "simpleadmin" | "simple" => Ok(Self::SimpleAdmin),
            other => Err(ConsoleError::config(format!(
                "unknown deployment profile '{}'",
                other
            ))),
        }
    }
}

/// Remote API settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    /// API origin every route is appended to, e.g. `https://example.com/api`.
    #[serde(default)]
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL with surrounding whitespace and trailing slashes
    /// removed, after checking it is an absolute http(s) address.
    pub fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConsoleError::config("API base URL is not set"));
        }
        let scheme_ok = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let has_host = trimmed
            .split_once("://")
            .map(|(_, rest)| !rest.is_empty())
            .unwrap_or(false);
        if !scheme_ok || !has_host {
            return Err(ConsoleError::config(format!(
                "API base URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(trimmed.to_string())
    }
}

/// Root configuration for the console.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub profile: DeploymentProfile,
    /// Default tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            profile: DeploymentProfile::default(),
            log_level: default_log_level(),
        }
    }
}
