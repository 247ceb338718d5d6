//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and applies environment
//! overrides. The result is cached after the first successful load.

use crate::paths::CinemaPaths;
use cinema_core::config::ClientConfig;
use cinema_core::{CinemaError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub const API_URL_ENV: &str = "CINEMA_API_URL";
pub const CHAT_URL_ENV: &str = "CINEMA_CHAT_URL";

/// Loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    paths: CinemaPaths,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `config.toml` from the config directory.
    pub fn new(paths: CinemaPaths) -> Self {
        Self {
            path: None,
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads from an explicit file instead of the config directory.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Gets the configuration, loading it on first access.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str::<ClientConfig>(&content).map_err(|e| {
                CinemaError::config(format!("Invalid config file {}: {}", path.display(), e))
            })?
        } else {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                path.display()
            );
            ClientConfig::default()
        };

        Ok(apply_overrides(config, |name| std::env::var(name).ok()).normalized())
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => self
                .paths
                .config_file()
                .map_err(|e| CinemaError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(CinemaPaths::default())
    }
}

/// Applies `CINEMA_API_URL` / `CINEMA_CHAT_URL` from `lookup`.
///
/// Empty values are ignored.
pub fn apply_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    if let Some(url) = value(API_URL_ENV) {
        config.api_base_url = url;
    }
    if let Some(url) = value(CHAT_URL_ENV) {
        config.chat_base_url = url;
    }
    config
}
