//! Feed source trait.

use async_trait::async_trait;

use super::model::{Comment, Post};
use crate::error::Result;
use crate::user::User;

/// Populates the feed store.
///
/// The synthetic generator and a network-backed fetch are interchangeable
/// implementations; screens only ever talk to this trait.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Posts for the main feed, newest first.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// Comments of one post, oldest first.
    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>>;

    /// Posts written by `user`, newest first, for the profile screen.
    async fn fetch_user_posts(&self, user: &User) -> Result<Vec<Post>>;
}
