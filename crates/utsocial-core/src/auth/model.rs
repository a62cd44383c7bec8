//! Authentication request payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which form the login screen currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Verb used in progress lines ("login" / "registration").
    pub fn action(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "registration",
        }
    }
}

/// Form-encoded login body. The service expects the identifier (usually the
/// email address) under the `username` field.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "username")]
    pub identifier: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of debug output and logs.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("password", &"***")
            .finish()
    }
}

/// JSON registration body.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
