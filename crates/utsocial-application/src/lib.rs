//! Application layer for UT Social.
//!
//! One use case per screen. Each turns the intents a view forwards (submit,
//! react, filter, save, log out) into store operations and reports where the
//! view should go next.

pub mod auth_usecase;
pub mod feed_usecase;
pub mod profile_usecase;

pub use auth_usecase::{AuthForm, AuthOutcome, AuthUseCase};
pub use feed_usecase::FeedUseCase;
pub use profile_usecase::{ProfileStats, ProfileUseCase};
