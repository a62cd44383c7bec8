//! Profile editor.

use std::sync::Arc;

use super::draft::ProfileDraft;
use crate::error::{Result, SocialError};
use crate::session::SessionStore;
use crate::user::User;

/// Edits the session user's username and bio.
///
/// Nothing touches the session until [`commit`](Self::commit); a discarded
/// draft leaves no trace.
pub struct ProfileEditor {
    session: Arc<dyn SessionStore>,
    user: User,
    draft: Option<ProfileDraft>,
}

impl ProfileEditor {
    pub fn new(session: Arc<dyn SessionStore>, user: User) -> Self {
        Self {
            session,
            user,
            draft: None,
        }
    }

    /// The user as last committed.
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&ProfileDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut ProfileDraft> {
        self.draft.as_mut()
    }

    /// Starts editing with a draft seeded from the current user. An edit
    /// already in progress is restarted.
    pub fn begin_edit(&mut self) -> &mut ProfileDraft {
        self.draft.insert(ProfileDraft::from_user(&self.user))
    }

    /// Merges the draft into the user, persists it as the session and ends
    /// editing.
    pub async fn commit(&mut self) -> Result<User> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| SocialError::state("No profile edit in progress"))?;
        let updated = draft.apply_to(&self.user);

        // Persist before touching local state so a failed save keeps the draft.
        self.session.save(&updated).await?;

        tracing::info!("Profile updated for user {}", updated.id);
        self.user = updated.clone();
        self.draft = None;
        Ok(updated)
    }

    /// Abandons the draft.
    pub fn discard(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;

    fn editor_with_session() -> (ProfileEditor, InMemorySessionStore) {
        let store = InMemorySessionStore::new();
        let user = User::new("u1", "alice", "a@b.com");
        (ProfileEditor::new(Arc::new(store.clone()), user), store)
    }

    #[tokio::test]
    async fn test_begin_edit_does_not_touch_session() {
        let (mut editor, store) = editor_with_session();
        let draft = editor.begin_edit();
        draft.username = "changed".into();
        assert!(editor.is_editing());
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(editor.user().username, "alice");
    }

    #[tokio::test]
    async fn test_commit_merges_and_persists() {
        let (mut editor, store) = editor_with_session();
        {
            let draft = editor.begin_edit();
            draft.username = "neo".into();
            draft.bio = "follow the white rabbit".into();
        }

        let updated = editor.commit().await.unwrap();

        assert!(!editor.is_editing());
        assert_eq!(updated.id, "u1");
        assert_eq!(updated.email, "a@b.com");
        assert_eq!(updated.username, "neo");
        assert_eq!(store.load().await.unwrap(), Some(updated.clone()));
        assert_eq!(editor.user(), &updated);
    }

    #[tokio::test]
    async fn test_discard_keeps_session() {
        let (mut editor, store) = editor_with_session();
        editor.begin_edit().username = "ghost".into();
        editor.discard();
        assert!(!editor.is_editing());
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(editor.user().username, "alice");
    }

    #[tokio::test]
    async fn test_commit_without_edit_is_state_error() {
        let (mut editor, _store) = editor_with_session();
        assert!(editor.commit().await.unwrap_err().is_state());
    }
}
