//! FAQ use case: cache-or-fetch with write-through.

use cmdb_core::Result;
use cmdb_core::api::DashboardApi;
use cmdb_core::cache::{CacheKey, CacheStore, read_json, write_json};
use cmdb_core::faq::FaqMapping;
use cmdb_core::view::FaqList;
use std::sync::Arc;

/// Where a loaded FAQ mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqSource {
    Cache,
    Backend,
}

pub struct FaqService {
    api: Arc<dyn DashboardApi>,
    store: Arc<dyn CacheStore>,
}

impl FaqService {
    pub fn new(api: Arc<dyn DashboardApi>, store: Arc<dyn CacheStore>) -> Self {
        Self { api, store }
    }

    /// Returns the cached mapping if one is present, otherwise fetches it
    /// and writes it through to the cache.
    ///
    /// A cached entry is authoritative: it is never refreshed here.
    pub async fn load(&self) -> Result<(FaqMapping, FaqSource)> {
        if let Some(cached) = read_json::<FaqMapping>(self.store.as_ref(), CacheKey::Faq).await? {
            tracing::debug!(entries = cached.len(), "[FaqService] Using cached FAQ");
            return Ok((cached, FaqSource::Cache));
        }

        let fetched = self.api.fetch_faq().await.inspect_err(|e| {
            tracing::error!(error = %e, "[FaqService] Failed to fetch FAQ");
        })?;
        write_json(self.store.as_ref(), CacheKey::Faq, &fetched).await?;
        tracing::info!(entries = fetched.len(), "[FaqService] Fetched and cached FAQ");

        Ok((fetched, FaqSource::Backend))
    }

    /// Loads the mapping and builds the collapsed accordion.
    pub async fn load_list(&self) -> Result<FaqList> {
        let (mapping, _) = self.load().await?;
        Ok(FaqList::from_mapping(&mapping))
    }
}
