//! HttpDashboardApi - REST client for the dashboard backend.
//!
//! Every call is a single GET with no retry; failures surface as
//! `CmdbError::Api` so the views can print them instead of spinning.

use async_trait::async_trait;
use cmdb_core::api::{DashboardApi, HealthStatus};
use cmdb_core::config::ApiSettings;
use cmdb_core::faq::FaqMapping;
use cmdb_core::inventory::InventorySnapshot;
use cmdb_core::{CmdbError, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DATA_PATH: &str = "/api/data";
const FAQ_PATH: &str = "/api/faq";
const QUESTION_PATH: &str = "/api/question";
const HEALTH_PATH: &str = "/health";

#[derive(Deserialize)]
struct FaqResponse {
    faq: FaqMapping,
}

#[derive(Deserialize)]
struct QuestionResponse {
    response: String,
}

/// FastAPI error body: `detail` is a string for `HTTPException`s and a list
/// of objects for validation failures.
#[derive(Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

/// [`DashboardApi`] implementation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: Client,
    base_url: String,
}

impl HttpDashboardApi {
    /// Creates a client for `base_url` with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CmdbError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Self::with_timeout(
            settings.base_url.clone(),
            settings.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "[HttpDashboardApi] GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| map_transport_error(path, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| map_transport_error(path, err))?;

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "[HttpDashboardApi] Request failed");
            return Err(map_http_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| CmdbError::Serialization {
            format: "JSON".to_string(),
            message: format!("Unexpected response from {path}: {err}"),
        })
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_snapshot(&self) -> Result<InventorySnapshot> {
        self.get_json(DATA_PATH, &[]).await
    }

    async fn fetch_faq(&self) -> Result<FaqMapping> {
        let wrapper: FaqResponse = self.get_json(FAQ_PATH, &[]).await?;
        Ok(wrapper.faq)
    }

    async fn ask_question(&self, message: &str) -> Result<String> {
        let wrapper: QuestionResponse = self
            .get_json(QUESTION_PATH, &[("message", message)])
            .await?;
        Ok(wrapper.response)
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json(HEALTH_PATH, &[]).await
    }
}

/// Maps connect, timeout and body-read failures. No HTTP status is known.
pub fn map_transport_error(path: &str, err: reqwest::Error) -> CmdbError {
    let reason = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "failed"
    };
    CmdbError::api(None, format!("Request to {path} {reason}: {err}"))
}

fn map_http_error(status: StatusCode, body: &str) -> CmdbError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorResponse { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body.to_string(),
    };
    CmdbError::api(Some(status.as_u16()), message)
}
