//! Explicit cache maintenance.
//!
//! Nothing else in the dashboard invalidates cache entries.

use cmdb_core::Result;
use cmdb_core::cache::{CacheKey, CacheStore};
use strum::IntoEnumIterator;

/// Which entries `clear` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CacheScope {
    Faq,
    Chat,
    #[default]
    All,
}

impl CacheScope {
    pub fn keys(&self) -> Vec<CacheKey> {
        match self {
            CacheScope::Faq => vec![CacheKey::Faq],
            CacheScope::Chat => vec![CacheKey::ChatHistory],
            CacheScope::All => CacheKey::iter().collect(),
        }
    }
}

/// Removes the entries in `scope` and returns the keys that were cleared.
pub async fn clear(store: &dyn CacheStore, scope: CacheScope) -> Result<Vec<CacheKey>> {
    let keys = scope.keys();
    for key in &keys {
        store.remove(key.as_str()).await?;
        tracing::info!(key = key.as_str(), "[Cache] Cleared entry");
    }
    Ok(keys)
}
