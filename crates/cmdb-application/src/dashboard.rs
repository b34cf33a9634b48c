//! Dashboard state shared by every view.
//!
//! The snapshot is fetched at most once per run and is immutable after
//! that. Diagrams are derived from it on demand.

use crate::chat::ChatSession;
use crate::faq::FaqService;
use cmdb_core::api::{DashboardApi, HealthStatus};
use cmdb_core::cache::CacheStore;
use cmdb_core::config::DashboardConfig;
use cmdb_core::diagram::{InfraGraph, VpcAssociation, derive_graph, derive_mermaid};
use cmdb_core::inventory::InventorySnapshot;
use cmdb_core::view::{DashboardHeader, InventoryTab, TableView, render_tab};
use cmdb_core::{CmdbError, Result};
use std::sync::Arc;

pub struct DashboardState {
    api: Arc<dyn DashboardApi>,
    store: Arc<dyn CacheStore>,
    config: DashboardConfig,
    snapshot: Option<InventorySnapshot>,
}

impl DashboardState {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        store: Arc<dyn CacheStore>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            api,
            store,
            config,
            snapshot: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Fetches the snapshot on first call and returns the held copy after.
    ///
    /// A failed fetch is logged and returned so the caller can show it.
    pub async fn load_snapshot(&mut self) -> Result<&InventorySnapshot> {
        if self.snapshot.is_none() {
            let snapshot = self.api.fetch_snapshot().await.inspect_err(|e| {
                tracing::error!(error = %e, "[Dashboard] Failed to load inventory snapshot");
            })?;
            tracing::info!(
                account = %snapshot.account_id,
                region = %snapshot.region,
                instances = snapshot.ec2_instances.len(),
                "[Dashboard] Loaded inventory snapshot"
            );
            self.snapshot = Some(snapshot);
        }
        self.snapshot()
    }

    /// The loaded snapshot, or `NotFound` before [`Self::load_snapshot`].
    pub fn snapshot(&self) -> Result<&InventorySnapshot> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| CmdbError::not_found("snapshot", "current"))
    }

    pub fn header(&self) -> Result<DashboardHeader> {
        Ok(DashboardHeader::from_snapshot(self.snapshot()?))
    }

    pub fn tables(&self, tab: InventoryTab) -> Result<Vec<TableView>> {
        Ok(render_tab(self.snapshot()?, tab))
    }

    /// Derives the graph, using the configured association unless one is
    /// given.
    pub fn graph(&self, association: Option<VpcAssociation>) -> Result<InfraGraph> {
        let association = association.unwrap_or(self.config.diagram.vpc_association);
        Ok(derive_graph(self.snapshot()?, association))
    }

    pub fn mermaid(&self) -> Result<String> {
        Ok(derive_mermaid(self.snapshot()?))
    }

    pub fn faq_service(&self) -> FaqService {
        FaqService::new(self.api.clone(), self.store.clone())
    }

    pub async fn chat_session(&self) -> Result<ChatSession> {
        ChatSession::hydrate(
            self.api.clone(),
            self.store.clone(),
            self.config.chat.max_history,
        )
        .await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.api.health().await
    }
}
