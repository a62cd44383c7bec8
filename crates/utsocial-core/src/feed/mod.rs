//! Feed domain module.
//!
//! # Module Structure
//!
//! - `model`: `Post`, `Comment`, `Attachment`, `Career` and `CareerFilter`
//! - `store`: `FeedStore`, the in-memory collection every feed intent mutates
//! - `source`: `FeedSource`, whatever populates the store (generator or network)
//!
//! # Usage
//!
//! ```ignore
//! use utsocial_core::feed::{Career, CareerFilter, FeedStore};
//! ```

mod model;
mod source;
mod store;

// Re-export public API
pub use model::{Attachment, Career, CareerFilter, Comment, Post};
pub use source::FeedSource;
pub use store::{FeedStore, Posts};
