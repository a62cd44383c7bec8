//! Session store trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::user::User;

/// Well-known key the serialized user is stored under.
pub const SESSION_KEY: &str = "user";

/// Persistence for the active session.
///
/// This is the only surface through which the current identity is read or
/// written. Screens receive a store explicitly instead of reaching for
/// ambient global state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the persisted session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))`: a session is active
    /// - `Ok(None)`: no session, or the stored value could not be parsed
    /// - `Err(_)`: the backing storage failed
    async fn load(&self) -> Result<Option<User>>;

    /// Persists `user` as the active session, replacing any previous one.
    async fn save(&self, user: &User) -> Result<()>;

    /// Removes the active session. Clearing an absent session succeeds.
    async fn clear(&self) -> Result<()>;
}

/// Decodes a stored session value.
///
/// Malformed data fails closed: it is logged and treated as no session.
pub fn decode_session(raw: &str) -> Option<User> {
    match serde_json::from_str::<User>(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("Ignoring malformed session data: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_session_valid() {
        let user = decode_session(r#"{"id":"u1","username":"alice","email":"a@b.com"}"#);
        assert_eq!(user, Some(User::new("u1", "alice", "a@b.com")));
    }

    #[test]
    fn test_decode_session_keeps_naive_join_date() {
        for raw in ["2023-01-15", "2024-05-01T10:20:30.123456"] {
            let json = format!(
                r#"{{"id":"u1","username":"alice","email":"a@b.com","joinDate":"{}"}}"#,
                raw
            );
            let user = decode_session(&json).unwrap();
            assert_eq!(user.join_date.as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_decode_session_malformed_is_absent() {
        assert_eq!(decode_session("{not json"), None);
        assert_eq!(decode_session(r#"{"username":"no id"}"#), None);
        assert_eq!(decode_session("null"), None);
    }
}
