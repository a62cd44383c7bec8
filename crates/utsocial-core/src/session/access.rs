//! Session guard for protected screens.

use super::store::SessionStore;
use crate::error::Result;
use crate::user::User;

/// Screens the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login / registration entry point.
    Login,
    Feed,
    Profile,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Feed => "/feed",
            Self::Profile => "/profile",
        }
    }
}

/// Outcome of activating a protected screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// A session exists; render for this user.
    Granted(User),
    /// No session; navigate away instead of rendering.
    Redirect(Route),
}

impl Access {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Granted(user) => Some(user),
            Self::Redirect(_) => None,
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Granted(user) => Some(user),
            Self::Redirect(_) => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Loads the session once for a screen activation.
///
/// An absent (or unreadable) session redirects to the login entry point.
pub async fn require_session(store: &dyn SessionStore) -> Result<Access> {
    match store.load().await? {
        Some(user) => Ok(Access::Granted(user)),
        None => {
            tracing::info!("No active session, redirecting to {}", Route::Login.path());
            Ok(Access::Redirect(Route::Login))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;

    #[tokio::test]
    async fn test_absent_session_redirects_to_login() {
        let store = InMemorySessionStore::new();
        let access = require_session(&store).await.unwrap();
        assert_eq!(access, Access::Redirect(Route::Login));
        assert!(access.user().is_none());
    }

    #[tokio::test]
    async fn test_present_session_is_granted() {
        let store = InMemorySessionStore::new();
        let user = User::new("u1", "alice", "a@b.com");
        store.save(&user).await.unwrap();
        let access = require_session(&store).await.unwrap();
        assert_eq!(access.into_user(), Some(user));
    }

    #[tokio::test]
    async fn test_malformed_session_redirects() {
        let store = InMemorySessionStore::with_raw("not-json");
        assert!(require_session(&store).await.unwrap().is_redirect());
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::Feed.path(), "/feed");
    }
}
