//! Profile draft.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Editable copy of a user's public profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub username: String,
    pub bio: String,
}

impl ProfileDraft {
    /// Seeds a draft from `user`. A missing bio becomes an empty string.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }

    /// Returns `user` with the draft's fields merged in. Every other field is
    /// carried over unchanged.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            username: self.username.clone(),
            bio: Some(self.bio.clone()),
            ..user.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_defaults_bio() {
        let draft = ProfileDraft::from_user(&User::new("u1", "alice", "a@b.com"));
        assert_eq!(draft.username, "alice");
        assert_eq!(draft.bio, "");
    }

    #[test]
    fn test_apply_preserves_identity() {
        let mut user = User::new("u1", "alice", "a@b.com");
        user.profile_picture = Some("me.png".into());
        let draft = ProfileDraft {
            username: "neo".into(),
            bio: "wake up".into(),
        };
        let updated = draft.apply_to(&user);
        assert_eq!(updated.id, "u1");
        assert_eq!(updated.email, "a@b.com");
        assert_eq!(updated.profile_picture.as_deref(), Some("me.png"));
        assert_eq!(updated.username, "neo");
        assert_eq!(updated.bio.as_deref(), Some("wake up"));
    }
}
