//! Infrastructure for the UT Social client: where the session and the
//! configuration live on disk, and the synthetic feed source.

pub mod config_service;
pub mod file_session_store;
pub mod mock_feed_source;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_session_store::FileSessionStore;
pub use crate::mock_feed_source::MockFeedSource;
pub use crate::paths::SocialPaths;
