//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `error`: `AuthError`, the failure taxonomy of a credential exchange
//! - `model`: request payloads and the login/register form mode
//! - `service`: the `AuthService` trait implemented by network clients
//! - `terminal`: the append-only progress log shown on the login screen

mod error;
mod model;
mod service;
mod terminal;

// Re-export public API
pub use error::{AuthError, DEFAULT_AUTH_FAILURE};
pub use model::{AuthMode, LoginRequest, RegisterRequest};
pub use service::AuthService;
pub use terminal::{TerminalLog, is_event_line};
