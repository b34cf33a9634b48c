//! Local cache store contract.
//!
//! The dashboard keeps two independent caches, the FAQ mapping and the chat
//! transcript, in a persistent key-value store. Entries are JSON text and
//! are never invalidated automatically: once present they are authoritative
//! until the user clears them explicitly.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Fixed keys used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum CacheKey {
    /// JSON-encoded FAQ mapping.
    Faq,
    /// JSON-encoded array of transcript entries.
    ChatHistory,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Faq => "faq",
            CacheKey::ChatHistory => "chatHistory",
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent key-value storage for small UI state.
///
/// Implementations store values verbatim and perform no schema validation;
/// decoding is the caller's concern (see [`read_json`]).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the entry. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Reads and decodes a JSON value.
///
/// A value that fails to decode is logged and reported as absent, so a
/// corrupted or foreign entry never aborts the consumer's initialization.
pub async fn read_json<T>(store: &dyn CacheStore, key: CacheKey) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.read(key.as_str()).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "[Cache] Ignoring malformed cache entry");
            Ok(None)
        }
    }
}

/// Encodes a value as JSON and writes it under `key`.
pub async fn write_json<T>(store: &dyn CacheStore, key: CacheKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.write(key.as_str(), &raw).await
}
