//! Profile screen use case.

use std::sync::Arc;

use tokio::sync::Mutex;
use utsocial_core::error::{Result, SocialError};
use utsocial_core::feed::{FeedSource, Post};
use utsocial_core::profile::{ProfileDraft, ProfileEditor};
use utsocial_core::session::{Access, Route, SessionStore, require_session};
use utsocial_core::user::User;

/// Totals shown in the profile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub posts: usize,
    pub comments: u32,
    pub reactions: u32,
}

impl ProfileStats {
    fn from_posts(posts: &[Post]) -> Self {
        posts.iter().fold(
            Self {
                posts: posts.len(),
                ..Self::default()
            },
            |stats, post| Self {
                comments: stats.comments.saturating_add(post.comment_count),
                reactions: stats.reactions.saturating_add(post.reaction_count),
                ..stats
            },
        )
    }
}

struct ProfileScreen {
    editor: ProfileEditor,
    posts: Vec<Post>,
}

/// Drives the profile screen: the user's own posts and the edit form.
pub struct ProfileUseCase {
    session: Arc<dyn SessionStore>,
    source: Arc<dyn FeedSource>,
    state: Mutex<Option<ProfileScreen>>,
}

impl ProfileUseCase {
    pub fn new(session: Arc<dyn SessionStore>, source: Arc<dyn FeedSource>) -> Self {
        Self {
            session,
            source,
            state: Mutex::new(None),
        }
    }

    /// Activates the screen for the session user, or redirects to login.
    pub async fn open(&self) -> Result<Access> {
        let access = require_session(self.session.as_ref()).await?;
        let user = match &access {
            Access::Granted(user) => user.clone(),
            Access::Redirect(_) => {
                *self.state.lock().await = None;
                return Ok(access);
            }
        };

        let posts = self.source.fetch_user_posts(&user).await?;
        tracing::debug!("Profile loaded with {} posts for {}", posts.len(), user.id);

        *self.state.lock().await = Some(ProfileScreen {
            editor: ProfileEditor::new(self.session.clone(), user),
            posts,
        });
        Ok(access)
    }

    pub async fn user(&self) -> Option<User> {
        self.state
            .lock()
            .await
            .as_ref()
            .map(|screen| screen.editor.user().clone())
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state
            .lock()
            .await
            .as_ref()
            .map(|screen| screen.posts.clone())
            .unwrap_or_default()
    }

    pub async fn stats(&self) -> ProfileStats {
        self.state
            .lock()
            .await
            .as_ref()
            .map(|screen| ProfileStats::from_posts(&screen.posts))
            .unwrap_or_default()
    }

    pub async fn is_editing(&self) -> bool {
        self.state
            .lock()
            .await
            .as_ref()
            .is_some_and(|screen| screen.editor.is_editing())
    }

    /// Opens the edit form seeded from the current user.
    pub async fn begin_edit(&self) -> Result<ProfileDraft> {
        let mut state = self.state.lock().await;
        let screen = require_screen(&mut state)?;
        Ok(screen.editor.begin_edit().clone())
    }

    /// Replaces the draft with what the view typed. Starts editing first if
    /// the form was not open.
    pub async fn edit_profile(&self, draft: ProfileDraft) -> Result<()> {
        let mut state = self.state.lock().await;
        let screen = require_screen(&mut state)?;
        match screen.editor.draft_mut() {
            Some(current) => *current = draft,
            None => *screen.editor.begin_edit() = draft,
        }
        Ok(())
    }

    /// Commits the draft to the session.
    ///
    /// Posts already on screen keep their author snapshot.
    pub async fn save_profile(&self) -> Result<User> {
        let mut state = self.state.lock().await;
        let screen = require_screen(&mut state)?;
        screen.editor.commit().await
    }

    pub async fn cancel_edit(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        require_screen(&mut state)?.editor.discard();
        Ok(())
    }

    /// Ends the session and resets the screen.
    pub async fn logout(&self) -> Result<Route> {
        self.session.clear().await?;
        *self.state.lock().await = None;
        tracing::info!("Logged out");
        Ok(Route::Login)
    }
}

fn require_screen(state: &mut Option<ProfileScreen>) -> Result<&mut ProfileScreen> {
    state
        .as_mut()
        .ok_or_else(|| SocialError::state("No active session"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use utsocial_core::session::InMemorySessionStore;
    use utsocial_infrastructure::MockFeedSource;

    async fn opened() -> (ProfileUseCase, InMemorySessionStore) {
        let session = InMemorySessionStore::new();
        let mut user = User::new("u1", "alice", "a@b.com");
        user.profile_picture = Some("alice.png".into());
        session.save(&user).await.unwrap();
        let usecase =
            ProfileUseCase::new(Arc::new(session.clone()), Arc::new(MockFeedSource::new()));
        assert!(!usecase.open().await.unwrap().is_redirect());
        (usecase, session)
    }

    #[tokio::test]
    async fn test_open_without_session_redirects() {
        let usecase = ProfileUseCase::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MockFeedSource::new()),
        );
        assert!(usecase.open().await.unwrap().is_redirect());
        assert!(usecase.begin_edit().await.unwrap_err().is_state());
        assert_eq!(usecase.stats().await, ProfileStats::default());
    }

    #[tokio::test]
    async fn test_stats_sum_user_posts() {
        let (usecase, _) = opened().await;
        let posts = usecase.posts().await;
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.author.id == "u1"));
        assert_eq!(
            usecase.stats().await,
            ProfileStats {
                posts: 3,
                comments: 25,
                reactions: 57,
            }
        );
    }

    #[tokio::test]
    async fn test_save_profile_persists_and_keeps_identity() {
        let (usecase, session) = opened().await;
        let draft = usecase.begin_edit().await.unwrap();
        assert_eq!(draft.username, "alice");
        assert_eq!(draft.bio, "");

        usecase
            .edit_profile(ProfileDraft {
                username: "neo".into(),
                bio: "there is no spoon".into(),
            })
            .await
            .unwrap();
        let saved = usecase.save_profile().await.unwrap();

        assert_eq!(saved.id, "u1");
        assert_eq!(saved.email, "a@b.com");
        assert_eq!(saved.profile_picture.as_deref(), Some("alice.png"));
        assert_eq!(saved.username, "neo");
        assert_eq!(session.load().await.unwrap(), Some(saved.clone()));
        assert!(!usecase.is_editing().await);

        // posts keep the author they were written with
        assert!(usecase.posts().await.iter().all(|p| p.author.username == "alice"));
    }

    #[tokio::test]
    async fn test_cancel_edit_leaves_session() {
        let (usecase, session) = opened().await;
        usecase
            .edit_profile(ProfileDraft {
                username: "ghost".into(),
                bio: String::new(),
            })
            .await
            .unwrap();
        assert!(usecase.is_editing().await);

        usecase.cancel_edit().await.unwrap();

        assert!(!usecase.is_editing().await);
        assert_eq!(session.load().await.unwrap().unwrap().username, "alice");
        assert!(usecase.save_profile().await.unwrap_err().is_state());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (usecase, session) = opened().await;
        assert_eq!(usecase.logout().await.unwrap(), Route::Login);
        assert!(session.load().await.unwrap().is_none());
        assert!(usecase.user().await.is_none());
    }
}
