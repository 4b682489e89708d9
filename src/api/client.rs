//! GTM Backend REST Client
//!
//! HTTP client for the portfolio backend. One base URL, one fixed timeout,
//! no retries and no caching: every call goes to the network and either
//! yields the decoded document or an [`ApiError`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use super::{ApiError, GtmApi};
use crate::model::{CaseStudy, CaseStudyList, DashboardStats, FrameworkList, MetricList};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the GTM backend
#[derive(Debug, Clone)]
pub struct GtmClient {
    client: Client,
    base_url: String,
}

/// FastAPI-style error body: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl GtmClient {
    /// Create a client for `base_url` (trailing slashes are ignored)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the body
    ///
    /// Logging is a side effect only; the result is returned untouched.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%request_id, %url, "Making GET request to {}", path);

        let result = self.fetch(&url, path).await;

        match &result {
            Ok(_) => tracing::debug!(%request_id, path, "Request completed"),
            Err(e) => tracing::error!(%request_id, path, "API error: {}", e),
        }

        result
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail)
                .unwrap_or(text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GtmApi for GtmClient {
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/api/dashboard-stats").await
    }

    async fn case_studies(&self) -> Result<CaseStudyList, ApiError> {
        self.get_json("/api/case-studies").await
    }

    async fn case_study(&self, id: &str) -> Result<CaseStudy, ApiError> {
        self.get_json(&format!("/api/case-studies/{}", urlencoding::encode(id)))
            .await
    }

    async fn frameworks(&self) -> Result<FrameworkList, ApiError> {
        self.get_json("/api/frameworks").await
    }

    async fn case_metrics(&self, id: &str) -> Result<MetricList, ApiError> {
        self.get_json(&format!("/api/metrics/{}", urlencoding::encode(id)))
            .await
    }
}
