//! Authentication service trait.

use async_trait::async_trait;

use super::error::AuthError;
use crate::user::User;

/// Credential exchange with the external authentication service.
///
/// Both calls are single-shot: implementations must not retry or back off.
/// The caller decides what to do with the outcome.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges an identifier and password for the authenticated user.
    async fn login(&self, identifier: &str, password: &str) -> Result<User, AuthError>;

    /// Creates an account. Success does not authenticate; the caller moves on
    /// to the login flow.
    async fn register(&self, email: &str, username: &str, password: &str)
    -> Result<(), AuthError>;
}
