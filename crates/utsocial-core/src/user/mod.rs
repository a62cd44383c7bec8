//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the `User` identity shared by the session, posts and comments
//!
//! # Usage
//!
//! ```ignore
//! use utsocial_core::user::User;
//! ```

mod model;

// Re-export public API
pub use model::User;
