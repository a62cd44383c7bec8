//! Session domain module.
//!
//! The session is the locally persisted record of the authenticated user.
//! Presence of a stored user means "logged in"; there is no expiry and no
//! server-side invalidation, so logout is purely local.
//!
//! # Module Structure
//!
//! - `store`: the `SessionStore` trait (load / save / clear)
//! - `memory`: `InMemorySessionStore`, a key-value store holding raw JSON
//! - `access`: the guard every protected screen runs on activation
//!
//! # Usage
//!
//! ```ignore
//! use utsocial_core::session::{Access, InMemorySessionStore, SessionStore, require_session};
//! ```

mod access;
mod memory;
mod store;

// Re-export public API
pub use access::{Access, Route, require_session};
pub use memory::InMemorySessionStore;
pub use store::{SESSION_KEY, SessionStore, decode_session};
