//! Authentication errors.

use thiserror::Error;

/// Message used when the service gives no `detail`.
pub const DEFAULT_AUTH_FAILURE: &str = "Authentication failed";

/// Failure of a login or registration exchange.
///
/// Every variant displays as a message fit to show the user directly. None
/// of them is fatal: the form stays editable and the user may retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The service could not be reached or the exchange broke off.
    #[error("{0}")]
    Transport(String),

    /// The service reported success but the body was not a user.
    #[error("{0}")]
    InvalidResponse(String),

    /// Another login or registration request is still pending.
    #[error("A request is already in progress")]
    Busy,
}

impl AuthError {
    /// Builds a `Rejected` error from the service's `detail`, falling back to
    /// the generic message.
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_FAILURE.to_string());
        Self::Rejected { status, message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// HTTP status for rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_detail() {
        let err = AuthError::rejected(401, Some("bad credentials".into()));
        assert_eq!(err.to_string(), "bad credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_rejected_without_detail_uses_generic_message() {
        assert_eq!(AuthError::rejected(500, None).to_string(), DEFAULT_AUTH_FAILURE);
        assert_eq!(
            AuthError::rejected(400, Some("  ".into())).to_string(),
            DEFAULT_AUTH_FAILURE
        );
    }
}
