//! Unified path management for cmdb configuration, cache and log files.
//!
//! Paths are resolved through the `dirs` crate so every platform gets its
//! conventional locations.

use cmdb_core::CmdbError;
use std::path::PathBuf;

const APP_DIR: &str = "cmdb";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform directory (config or data) could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for CmdbError {
    fn from(err: PathError) -> Self {
        CmdbError::config(err.to_string())
    }
}

/// Unified path management for cmdb.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/cmdb/              # Config directory
/// ├── cmdb.toml                # Dashboard configuration
/// └── logs/                    # Application logs
///     └── cmdb.log.YYYY-MM-DD
///
/// ~/.local/share/cmdb/         # Data directory
/// └── cache/                   # Cache store (faq.json, chatHistory.json)
/// ```
pub struct CmdbPaths;

impl CmdbPaths {
    /// Returns the cmdb configuration directory (e.g. `~/.config/cmdb/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the cmdb data directory (e.g. `~/.local/share/cmdb/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("cmdb.toml"))
    }

    /// Returns the default cache store directory.
    pub fn cache_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("cache"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = CmdbPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("cmdb"));
    }

    #[test]
    fn test_config_file() {
        let config_file = CmdbPaths::config_file().unwrap();
        assert!(config_file.ends_with("cmdb.toml"));
        let config_dir = CmdbPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_cache_dir() {
        let cache_dir = CmdbPaths::cache_dir().unwrap();
        assert!(cache_dir.ends_with("cache"));
        // Verify it's under data_dir
        let data_dir = CmdbPaths::data_dir().unwrap();
        assert!(cache_dir.starts_with(&data_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = CmdbPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        let config_dir = CmdbPaths::config_dir().unwrap();
        assert!(logs_dir.starts_with(&config_dir));
    }
}
