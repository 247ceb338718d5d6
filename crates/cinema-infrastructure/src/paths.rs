//! Unified path management for cinema client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cinema/            # Config directory
//! ├── config.toml              # Client configuration
//! └── storage/                 # Local state, one JSON file per key
//!     ├── cinema_user.json
//!     ├── cinema_token.json
//!     ├── search_history_<id>.json
//!     └── chatOpacity.json
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "cinema";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves client paths, optionally rooted at an explicit base directory.
///
/// With a base directory (tests, `--data-dir`) every path lives under it;
/// otherwise the platform config directory is used.
#[derive(Debug, Clone, Default)]
pub struct CinemaPaths {
    base: Option<PathBuf>,
}

impl CinemaPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the root directory (e.g. `~/.config/cinema/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Directory backing the key-value local storage.
    pub fn storage_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage"))
    }
}
