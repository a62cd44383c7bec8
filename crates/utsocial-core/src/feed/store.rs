//! In-memory feed store.

use std::collections::{HashMap, VecDeque, vec_deque};

use super::model::{Career, CareerFilter, Comment, Post};
use crate::error::{Result, SocialError};
use crate::user::User;

/// Owns the posts of the feed and the comments loaded so far.
///
/// Posts are kept newest first: new posts go to the front. Comments live in
/// a separate lookup keyed by post id and are only present for posts whose
/// comments were loaded or written locally.
///
/// Every mutation takes `&mut self`, so a comment and its post's counter
/// always change together.
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    posts: VecDeque<Post>,
    comments: HashMap<String, Vec<Comment>>,
}

/// Lazy view over the posts of a [`FeedStore`] matching a filter.
///
/// Cloning restarts the walk from where the clone was taken; calling
/// [`FeedStore::list_posts`] again starts over from the newest post.
#[derive(Debug, Clone)]
pub struct Posts<'a> {
    inner: vec_deque::Iter<'a, Post>,
    filter: CareerFilter,
}

impl<'a> Iterator for Posts<'a> {
    type Item = &'a Post;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.by_ref().find(|post| filter.matches(post.career))
    }
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from posts already ordered newest first.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into(),
            comments: HashMap::new(),
        }
    }

    /// Replaces every post with a freshly fetched set (newest first) and
    /// drops loaded comments.
    pub fn replace_posts(&mut self, posts: Vec<Post>) {
        tracing::debug!("Loading {} posts into feed", posts.len());
        self.posts = posts.into();
        self.comments.clear();
    }

    /// Posts matching `filter`, newest first.
    pub fn list_posts(&self, filter: CareerFilter) -> Posts<'_> {
        Posts {
            inner: self.posts.iter(),
            filter,
        }
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Publishes a post at the top of the feed.
    ///
    /// Blank content (after trimming) is ignored and returns `None`. The post
    /// is stored even when the current filter would hide it.
    pub fn create_post(&mut self, content: &str, career: Career, author: &User) -> Option<Post> {
        if content.trim().is_empty() {
            return None;
        }

        let post = Post::new(content, career, author.clone());
        tracing::debug!("Created post {} in {}", post.id, post.career);
        // Nothing to fetch for a post that only exists locally.
        self.comments.insert(post.id.clone(), Vec::new());
        self.posts.push_front(post.clone());
        Some(post)
    }

    /// Adds one reaction to a post and returns the new count.
    ///
    /// Reactions are not deduplicated per user: every call counts.
    pub fn react(&mut self, post_id: &str) -> Result<u32> {
        let post = self.post_mut(post_id)?;
        post.reaction_count = post.reaction_count.saturating_add(1);
        tracing::debug!("Post {} now has {} reactions", post_id, post.reaction_count);
        Ok(post.reaction_count)
    }

    /// Comments currently associated with a post, oldest first.
    pub fn load_comments(&self, post_id: &str) -> &[Comment] {
        self.comments
            .get(post_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether comments for the post have been loaded or written.
    pub fn has_comments(&self, post_id: &str) -> bool {
        self.comments.contains_key(post_id)
    }

    /// Installs fetched comments for a post, replacing any loaded before.
    /// Counters are left alone: they track what the source reported.
    pub fn set_comments(&mut self, post_id: &str, comments: Vec<Comment>) -> Result<()> {
        if self.post(post_id).is_none() {
            return Err(SocialError::not_found("post", post_id));
        }
        self.comments.insert(post_id.to_string(), comments);
        Ok(())
    }

    /// Appends a comment to a post and bumps its comment counter.
    ///
    /// Blank content is ignored and returns `Ok(None)`.
    pub fn add_comment(
        &mut self,
        post_id: &str,
        content: &str,
        author: &User,
    ) -> Result<Option<Comment>> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        // Resolve the post first so a missing post leaves no orphan comment.
        let post = self.post_mut(post_id)?;
        post.comment_count = post.comment_count.saturating_add(1);

        let comment = Comment::new(content, author.clone());
        self.comments
            .entry(post_id.to_string())
            .or_default()
            .push(comment.clone());
        tracing::debug!("Added comment {} to post {}", comment.id, post_id);
        Ok(Some(comment))
    }

    fn post_mut(&mut self, post_id: &str) -> Result<&mut Post> {
        self.posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| SocialError::not_found("post", post_id))
    }
}
