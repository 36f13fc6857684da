//! Error types for the tenantdesk console.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire console.
///
/// The first four variants are the request taxonomy surfaced by the
/// dispatcher; the rest cover local concerns (storage, config, profiles).
/// Rejected login credentials are deliberately not an error, see
/// `LoginOutcome::CredentialsRejected` in the interaction crate.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsoleError {
    /// The server answered with a non-success HTTP status.
    #[error("{message}")]
    Transport { status: u16, message: String },

    /// The server answered 2xx but the body was not the JSON we expected.
    #[error("Invalid response format from server: {0}")]
    MalformedResponse(String),

    /// A well-formed envelope reported `isvalid: false`.
    #[error("{0}")]
    Domain(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// An authenticated operation was attempted without a session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// An operation that does not exist in the active deployment profile.
    #[error("Profile error: {0}")]
    Profile(String),

    /// A session was offered without all of its required fields.
    #[error("Incomplete session: {0}")]
    IncompleteSession(String),

    /// Durable client storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied input that cannot be used (unknown sort field, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error.
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Domain error
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Profile error
    pub fn profile(message: impl Into<String>) -> Self {
        Self::Profile(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a MalformedResponse error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Check if this is a Domain error
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// HTTP status carried by a Transport error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ConsoleError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ConsoleError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ConsoleError>`.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_displays_server_text() {
        let err = ConsoleError::transport(503, "server down");
        assert_eq!(err.to_string(), "server down");
        assert_eq!(err.status(), Some(503));
        assert!(err.is_transport());
    }

    #[test]
    fn test_domain_error_displays_bare_message() {
        let err = ConsoleError::domain("bad code");
        assert_eq!(err.to_string(), "bad code");
        assert!(err.is_domain());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ConsoleError = io.into();
        assert!(matches!(err, ConsoleError::Io { ref message } if message.contains("NotFound")));
    }

    #[test]
    fn test_json_conversion_is_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConsoleError = parse.into();
        assert!(matches!(err, ConsoleError::Serialization { ref format, .. } if format == "JSON"));
    }
}
