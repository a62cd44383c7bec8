//! HttpAuthClient - REST client for the UT Social authentication service.
//!
//! - `POST {base}/login` with a form-encoded `username` / `password` body
//! - `POST {base}/register` with a JSON `{email, username, password}` body
//!
//! Failures carry the service's `detail` message when it sends one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use utsocial_core::auth::{AuthError, AuthService, LoginRequest, RegisterRequest};
use utsocial_core::config::{AuthConfig, DEFAULT_AUTH_BASE_URL};
use utsocial_core::user::User;

/// Error body returned by the service. `detail` is usually a string but
/// validation failures send a list, so it is read loosely.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(message) => Some(message),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Client for the login and registration endpoints.
#[derive(Clone)]
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpAuthClient {
    /// Creates a client for the endpoints under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let client = Self::new(config.base_url.clone());
        match config.request_timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    /// Sets a per-request timeout. Without one the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AuthError> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            AuthError::transport(format!("Failed to reach authentication service: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::message);
        tracing::warn!("Authentication service rejected request ({})", status);
        Err(AuthError::rejected(status.as_u16(), detail))
    }
}

impl Default for HttpAuthClient {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_BASE_URL)
    }
}

#[async_trait]
impl AuthService for HttpAuthClient {
    async fn login(&self, identifier: &str, password: &str) -> Result<User, AuthError> {
        let body = LoginRequest::new(identifier, password);
        let request = self.client.post(self.endpoint("login")).form(&body);

        let response = self.send(request).await?;
        let user = response.json::<User>().await.map_err(|e| {
            AuthError::invalid_response(format!("Failed to parse login response: {}", e))
        })?;

        tracing::info!("Authenticated user {}", user.id);
        Ok(user)
    }

    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let body = RegisterRequest::new(email, username, password);
        let request = self.client.post(self.endpoint("register")).json(&body);

        // The created account is returned but not used: registration never
        // signs the user in.
        self.send(request).await?;
        tracing::info!("Registered account {}", username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpAuthClient::new("http://localhost:8000/api/users/");
        assert_eq!(
            client.endpoint("login"),
            "http://localhost:8000/api/users/login"
        );
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(HttpAuthClient::default().base_url(), DEFAULT_AUTH_BASE_URL);
    }

    #[test]
    fn test_from_config_applies_timeout() {
        let config = AuthConfig {
            base_url: "http://auth.test".into(),
            request_timeout_secs: Some(3),
        };
        let client = HttpAuthClient::from_config(&config);
        assert_eq!(client.timeout, Some(Duration::from_secs(3)));
        assert_eq!(client.base_url(), "http://auth.test");
    }

    #[test]
    fn test_error_body_detail_string() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"bad credentials"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("bad credentials"));
    }

    #[test]
    fn test_error_body_validation_list() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message().is_none());
    }
}
