//! Error types for the UT Social client core.

use thiserror::Error;

use crate::auth::AuthError;

/// A shared error type for the entire UT Social client.
///
/// Blank post or comment submissions are not errors: stores report them as
/// `None` and the view stays quiet.
#[derive(Error, Debug, Clone)]
pub enum SocialError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

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

    /// Authentication exchange failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Operation attempted without the state it needs (no session, no active edit)
    #[error("State error: {0}")]
    State(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SocialError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
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

    /// Creates a State error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an authentication error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a state error
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }

    /// Returns the wrapped authentication error, if any.
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            Self::Auth(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SocialError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SocialError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SocialError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for SocialError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SocialError>`.
pub type Result<T> = std::result::Result<T, SocialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_message_passes_through() {
        let err: SocialError = AuthError::rejected(401, Some("bad credentials".to_string())).into();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = SocialError::from(io);
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_not_found_helper() {
        let err = SocialError::not_found("post", "post-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: post 'post-1'");
    }
}
