//! Configuration service implementation.
//!
//! Loads the dashboard configuration from `cmdb.toml`
//! (`~/.config/cmdb/cmdb.toml` unless a path is given), applies environment
//! overrides and caches the result.

use crate::paths::CmdbPaths;
use cmdb_core::config::DashboardConfig;
use cmdb_core::{CmdbError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "CMDB_API_URL";
/// Overrides `cache.dir`.
pub const ENV_CACHE_DIR: &str = "CMDB_CACHE_DIR";

/// Configuration service that loads and caches the dashboard configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` uses the platform default and tolerates
    /// its absence.
    path: Option<PathBuf>,
    /// Cached configuration, loaded lazily on first access.
    config: Arc<RwLock<Option<DashboardConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading an explicit config file, which must exist.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<DashboardConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_config()?;
        apply_env_overrides(&mut loaded, |name| std::env::var(name).ok());

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

    fn load_config(&self) -> Result<DashboardConfig> {
        let (path, required) = match &self.path {
            Some(path) => (path.clone(), true),
            None => (CmdbPaths::config_file()?, false),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "[ConfigService] No config file, using defaults");
                return Ok(DashboardConfig::default());
            }
            Err(e) => {
                return Err(CmdbError::config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let config: DashboardConfig = toml::from_str(&content)
            .map_err(|e| CmdbError::config(format!("Invalid {}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "[ConfigService] Loaded configuration");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `CMDB_API_URL` / `CMDB_CACHE_DIR` style overrides. Empty values
/// are ignored.
pub fn apply_env_overrides<F>(config: &mut DashboardConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(dir) = lookup(ENV_CACHE_DIR) {
        config.cache.dir = Some(PathBuf::from(dir));
    }
}
