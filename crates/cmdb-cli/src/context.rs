//! Wiring: configuration, logging, cache store and API client.

use anyhow::{Context as _, Result};
use cmdb_application::DashboardState;
use cmdb_core::config::DashboardConfig;
use cmdb_infrastructure::logging::{LoggingOptions, WorkerGuard, init_tracing};
use cmdb_infrastructure::{CmdbPaths, ConfigService, FileCacheStore};
use cmdb_interaction::HttpDashboardApi;
use std::path::PathBuf;
use std::sync::Arc;

/// Flags shared by every subcommand. They override config and environment.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Configuration file (default: ~/.config/cmdb/cmdb.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Cache store directory
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resolves the effective configuration: file, then environment, then
/// flags.
pub fn resolve_config(args: &GlobalArgs) -> Result<DashboardConfig> {
    let service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let mut config = service.get_config()?;
    apply_flag_overrides(&mut config, args);
    Ok(config)
}

fn apply_flag_overrides(config: &mut DashboardConfig, args: &GlobalArgs) {
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(dir) = &args.cache_dir {
        config.cache.dir = Some(dir.clone());
    }
}

/// Installs file logging. Failure to set it up is reported and ignored so
/// the dashboard still runs.
pub fn init_logging(config: &DashboardConfig, verbose: bool) -> Option<WorkerGuard> {
    let logs_dir = match CmdbPaths::logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            return None;
        }
    };
    let options = LoggingOptions {
        level: config.logging.level.clone(),
        logs_dir,
        verbose,
    };
    match init_tracing(&options) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    }
}

pub fn build_state(config: DashboardConfig) -> Result<DashboardState> {
    let cache_dir = match &config.cache.dir {
        Some(dir) => dir.clone(),
        None => CmdbPaths::cache_dir().context("Cannot determine cache directory")?,
    };
    let store = Arc::new(FileCacheStore::with_dir(cache_dir));
    let api = Arc::new(HttpDashboardApi::from_settings(&config.api)?);

    tracing::debug!(
        base_url = %config.api.base_url,
        cache_dir = %store.dir().display(),
        "[Context] Dashboard wired"
    );
    Ok(DashboardState::new(api, store, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cmdb.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://from-file:8000\"\n[cache]\ndir = \"/from/file\"\n",
        )
        .unwrap();

        let args = GlobalArgs {
            config: Some(path),
            api_url: Some("http://from-flag:9000".to_string()),
            cache_dir: None,
            verbose: false,
        };
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.api.base_url, "http://from-flag:9000");
        assert!(config.cache.dir.is_some());
    }

    #[test]
    fn test_build_state_uses_configured_cache_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = DashboardConfig::default();
        config.cache.dir = Some(temp_dir.path().to_path_buf());

        let state = build_state(config).unwrap();
        assert_eq!(
            state.config().cache.dir.as_deref(),
            Some(temp_dir.path())
        );
    }
}
