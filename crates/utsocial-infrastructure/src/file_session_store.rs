//! File-backed session store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use utsocial_core::error::{Result, SocialError};
use utsocial_core::session::{SessionStore, decode_session};
use utsocial_core::user::User;

use crate::paths::SocialPaths;
use crate::storage::AtomicJsonFile;

/// Persists the session user as a single JSON document.
///
/// File IO runs on the blocking pool so callers on the async runtime are not
/// stalled.
#[derive(Clone)]
pub struct FileSessionStore {
    file: Arc<AtomicJsonFile<User>>,
}

impl FileSessionStore {
    /// Store at `session.json` in the default config directory.
    pub fn new() -> Result<Self> {
        let path = SocialPaths::default().session_file()?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&AtomicJsonFile<User>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| SocialError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<User>> {
        let raw = self.blocking(|file| Ok(file.load_raw()?)).await?;
        Ok(raw.as_deref().and_then(decode_session))
    }

    async fn save(&self, user: &User) -> Result<()> {
        let snapshot = user.clone();
        self.blocking(move |file| Ok(file.save(&snapshot)?)).await?;
        tracing::info!("Session saved for user {}", user.id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| Ok(file.remove()?)).await?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::with_path(temp_dir.path().join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let user = User::new("u1", "alice", "a@b.com");
        store.save(&user).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(user));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, r#"{"id": 1, "username": "#).unwrap();

        let store = FileSessionStore::with_path(path.clone());
        assert!(store.load().await.unwrap().is_none());
        // left in place until the next save or clear
        assert!(path.exists());
    }
}
