//! Network clients for the UT Social client.

pub mod http_auth_client;

pub use http_auth_client::HttpAuthClient;
