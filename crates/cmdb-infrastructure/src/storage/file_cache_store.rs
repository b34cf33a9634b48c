//! File-backed cache store: one `<key>.json` file per key.

use super::atomic_file::AtomicFile;
use crate::paths::CmdbPaths;
use async_trait::async_trait;
use cmdb_core::cache::CacheStore;
use cmdb_core::{CmdbError, Result};
use std::path::{Path, PathBuf};

/// Persistent [`CacheStore`] rooted at a directory.
///
/// Blocking file I/O runs on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    /// Creates a store under the default cache directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(CmdbPaths::cache_dir()?))
    }

    /// Creates a store under a custom directory (for testing or overrides).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CmdbError::invalid_input(format!("invalid cache key '{key}'")));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{key}.json"))))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CmdbError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        run_blocking(move || file.load()).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let value = value.to_string();
        run_blocking(move || file.save(&value)).await?;
        tracing::debug!(key, "[FileCacheStore] Wrote cache entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        run_blocking(move || file.remove()).await?;
        tracing::debug!(key, "[FileCacheStore] Removed cache entry");
        Ok(())
    }
}
