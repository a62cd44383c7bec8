//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` in the client config directory.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use utsocial_core::config::AppConfig;
use utsocial_core::error::Result;

use crate::paths::SocialPaths;

/// Environment variable that overrides `auth.base_url`.
pub const AUTH_URL_ENV: &str = "UTSOCIAL_AUTH_URL";

/// Configuration service that loads and caches the app configuration.
///
/// A missing file yields the defaults. A file that does not parse is an
/// error rather than a silent fallback, so a typo is noticed.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Service reading `config.toml` from the default config directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(SocialPaths::default().config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_config()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<AppConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", self.path.display());
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(AUTH_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.auth.base_url = url;
    }
}
