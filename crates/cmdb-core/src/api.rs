//! Backend API contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::faq::FaqMapping;
use crate::inventory::InventorySnapshot;

/// Payload of the backend health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Read-only calls the dashboard makes against its backend.
///
/// Each call is a single request/response with no retry and no backoff.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetches the current inventory snapshot (`GET /api/data`).
    async fn fetch_snapshot(&self) -> Result<InventorySnapshot>;

    /// Fetches the FAQ mapping (`GET /api/faq`).
    async fn fetch_faq(&self) -> Result<FaqMapping>;

    /// Asks the backend a free-form question (`GET /api/question`).
    async fn ask_question(&self, message: &str) -> Result<String>;

    /// Checks backend liveness (`GET /health`).
    async fn health(&self) -> Result<HealthStatus>;
}
