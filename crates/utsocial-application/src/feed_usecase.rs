//! Feed screen use case.

use std::sync::Arc;

use tokio::sync::Mutex;
use utsocial_core::error::{Result, SocialError};
use utsocial_core::feed::{CareerFilter, Comment, FeedSource, FeedStore, Post};
use utsocial_core::session::{Access, Route, SessionStore, require_session};
use utsocial_core::user::User;

/// Everything the feed screen holds between intents.
#[derive(Default)]
struct FeedScreen {
    user: Option<User>,
    store: FeedStore,
    filter: CareerFilter,
    selected_post: Option<String>,
}

impl FeedScreen {
    fn require_user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| SocialError::state("No active session"))
    }
}

/// Drives the feed screen.
///
/// The screen state sits behind one async mutex, so each intent runs to
/// completion before the next one touches the store.
pub struct FeedUseCase {
    session: Arc<dyn SessionStore>,
    source: Arc<dyn FeedSource>,
    state: Mutex<FeedScreen>,
}

impl FeedUseCase {
    pub fn new(session: Arc<dyn SessionStore>, source: Arc<dyn FeedSource>) -> Self {
        Self {
            session,
            source,
            state: Mutex::new(FeedScreen::default()),
        }
    }

    /// Activates the screen: checks the session and loads the feed.
    ///
    /// Without a session nothing is loaded and the caller gets a redirect.
    pub async fn open(&self) -> Result<Access> {
        let access = require_session(self.session.as_ref()).await?;
        let user = match &access {
            Access::Granted(user) => user.clone(),
            Access::Redirect(_) => {
                *self.state.lock().await = FeedScreen::default();
                return Ok(access);
            }
        };

        let posts = self.source.fetch_posts().await?;
        tracing::info!("Feed loaded with {} posts for {}", posts.len(), user.id);

        *self.state.lock().await = FeedScreen {
            user: Some(user),
            store: FeedStore::with_posts(posts),
            ..FeedScreen::default()
        };
        Ok(access)
    }

    pub async fn user(&self) -> Option<User> {
        self.state.lock().await.user.clone()
    }

    pub async fn filter(&self) -> CareerFilter {
        self.state.lock().await.filter
    }

    /// Posts visible under the current filter, newest first.
    pub async fn visible_posts(&self) -> Vec<Post> {
        let state = self.state.lock().await;
        state.store.list_posts(state.filter).cloned().collect()
    }

    pub async fn post(&self, post_id: &str) -> Option<Post> {
        self.state.lock().await.store.post(post_id).cloned()
    }

    /// Changes the career filter and returns the posts it shows.
    pub async fn filter_by_career(&self, filter: CareerFilter) -> Vec<Post> {
        let mut state = self.state.lock().await;
        state.filter = filter;
        tracing::debug!("Feed filter set to {}", filter);
        state.store.list_posts(filter).cloned().collect()
    }

    /// Publishes a post as the session user.
    ///
    /// The career is the selected filter, or Software Development while
    /// "All" is selected. Blank content is ignored (`Ok(None)`).
    pub async fn submit_post(&self, content: &str) -> Result<Option<Post>> {
        let mut state = self.state.lock().await;
        let author = state.require_user()?.clone();
        let career = state.filter.career_for_new_post();
        Ok(state.store.create_post(content, career, &author))
    }

    /// Adds one reaction from the session user.
    pub async fn react(&self, post_id: &str) -> Result<u32> {
        let mut state = self.state.lock().await;
        state.require_user()?;
        state.store.react(post_id)
    }

    /// Selects a post and returns its comments, fetching them the first time.
    ///
    /// Comments already held for the post (including ones written locally)
    /// are kept as they are.
    pub async fn select_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        let needs_fetch = {
            let state = self.state.lock().await;
            state.require_user()?;
            if state.store.post(post_id).is_none() {
                return Err(SocialError::not_found("post", post_id));
            }
            !state.store.has_comments(post_id)
        };

        let fetched = if needs_fetch {
            Some(self.source.fetch_comments(post_id).await?)
        } else {
            None
        };

        let mut state = self.state.lock().await;
        if let Some(comments) = fetched
            && !state.store.has_comments(post_id)
        {
            state.store.set_comments(post_id, comments)?;
        }
        state.selected_post = Some(post_id.to_string());
        Ok(state.store.load_comments(post_id).to_vec())
    }

    pub async fn selected_post(&self) -> Option<String> {
        self.state.lock().await.selected_post.clone()
    }

    /// Comments of the selected post.
    pub async fn comments(&self) -> Vec<Comment> {
        let state = self.state.lock().await;
        state
            .selected_post
            .as_deref()
            .map(|id| state.store.load_comments(id).to_vec())
            .unwrap_or_default()
    }

    /// Comments on the selected post as the session user.
    ///
    /// Returns `Ok(None)` for blank content or when no post is selected.
    pub async fn submit_comment(&self, content: &str) -> Result<Option<Comment>> {
        let mut state = self.state.lock().await;
        let author = state.require_user()?.clone();
        let Some(post_id) = state.selected_post.clone() else {
            return Ok(None);
        };
        state.store.add_comment(&post_id, content, &author)
    }

    /// Ends the session and resets the screen.
    pub async fn logout(&self) -> Result<Route> {
        self.session.clear().await?;
        *self.state.lock().await = FeedScreen::default();
        tracing::info!("Logged out");
        Ok(Route::Login)
    }
}
