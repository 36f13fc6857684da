//! Path management for tenantdesk's local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tenantdesk/        # Config directory (platform default via `dirs`)
//! ├── config.toml              # API address, deployment profile, log level
//! └── session.toml             # Durable client storage (token, tenant context)
//! ```

use std::path::PathBuf;
use tenantdesk_core::ConsoleError;

const APP_DIR: &str = "tenantdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ConsoleError {
    fn from(e: PathError) -> Self {
        ConsoleError::config(e.to_string())
    }
}

pub struct ConsolePaths;

impl ConsolePaths {
    /// Returns the tenantdesk configuration directory (e.g. `~/.config/tenantdesk/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the durable session storage file.
    ///
    /// The file holds a bearer token; keep it user-readable only.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
