//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{SESSION_KEY, SessionStore, decode_session};
use crate::error::Result;
use crate::user::User;

/// Session store backed by a string key-value map.
///
/// Values are kept serialized, the way a browser's local storage keeps them,
/// so a corrupted entry behaves the same here as in a file-backed store.
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store (no session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose session entry holds `raw` verbatim.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(SESSION_KEY.to_string(), raw.into());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// The raw stored value, if any.
    pub async fn raw(&self) -> Option<String> {
        self.entries.read().await.get(SESSION_KEY).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<User>> {
        let entries = self.entries.read().await;
        Ok(entries.get(SESSION_KEY).and_then(|raw| decode_session(raw)))
    }

    async fn save(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.entries
            .write()
            .await
            .insert(SESSION_KEY.to_string(), raw);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.remove(SESSION_KEY);
        Ok(())
    }
}
