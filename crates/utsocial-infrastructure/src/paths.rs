//! Path management for UT Social client files.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "utsocial";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for utsocial_core::SocialError {
    fn from(e: PathError) -> Self {
        utsocial_core::SocialError::config(e.to_string())
    }
}

/// Resolves where the client keeps its files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/utsocial/      # or the base directory given to `new`
/// ├── config.toml          # AppConfig
/// └── session.json         # the persisted session user
/// ```
#[derive(Debug, Clone, Default)]
pub struct SocialPaths {
    base: Option<PathBuf>,
}

impl SocialPaths {
    /// `base` replaces the platform config directory (tests, portable installs).
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// The directory holding every client file.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.json"))
    }
}
