//! Domain core for the UT Social client.
//!
//! Holds the models, the store traits and the in-memory stores that every
//! screen shares: session, authentication, feed and profile editing.

pub mod auth;
pub mod config;
pub mod error;
pub mod feed;
pub mod profile;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{Result, SocialError};
