//! Configuration service.
//!
//! Loads [`ConsoleConfig`] from `~/.config/tenantdesk/config.toml` and
//! applies environment overrides on top.

use crate::paths::ConsolePaths;
use crate::storage::AtomicTomlFile;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tenantdesk_core::config::{ConsoleConfig, DeploymentProfile};
use tenantdesk_core::{ConsoleError, Result};
use tracing::debug;

/// Overrides `api.base_url`.
pub const ENV_API_BASE_URL: &str = "TENANTDESK_API_BASE_URL";
/// Overrides `profile`.
pub const ENV_PROFILE: &str = "TENANTDESK_PROFILE";

/// Loads and caches the console configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<ConsoleConfig>>>,
}

impl ConfigService {
    /// A service reading the default config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ConsolePaths::config_file()?))
    }

    /// A service reading `path` instead of the default location.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the configuration, reading the file on first access.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn get_config(&self) -> Result<ConsoleConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = self.load(|key| std::env::var(key).ok())?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces the next `get_config` to read the file again.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn load(&self, env: impl Fn(&str) -> Option<String>) -> Result<ConsoleConfig> {
        let file = AtomicTomlFile::<ConsoleConfig>::new(self.path.clone());
        let config = match file.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %self.path.display(), "No config file, using defaults");
                ConsoleConfig::default()
            }
            Err(e) => {
                return Err(ConsoleError::config(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        apply_env_overrides(config, env)
    }
}

/// Applies `TENANTDESK_*` overrides looked up through `env`.
pub fn apply_env_overrides(
    mut config: ConsoleConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ConsoleConfig> {
    if let Some(url) = env(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(profile) = env(ENV_PROFILE).filter(|v| !v.trim().is_empty()) {
        config.profile = profile.parse::<DeploymentProfile>()?;
    }
    Ok(config)
}
