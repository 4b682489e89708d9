//! GTM Backend API
//!
//! Read-only access to the portfolio backend.
//!
//! # Endpoints
//!
//! - `GET /api/dashboard-stats` - Portfolio counters
//! - `GET /api/case-studies` - All case studies
//! - `GET /api/case-studies/:id` - One case study
//! - `GET /api/frameworks` - Framework catalog
//! - `GET /api/metrics/:id` - Metrics recorded for one case study
//!
//! Pages depend on the [`GtmApi`] trait rather than on [`GtmClient`]
//! directly, so any source of these five documents can drive them.
//!
//! # Example
//!
//! ```rust,no_run
//! use gtm_portfolio::api::{GtmApi, GtmClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GtmClient::new("http://localhost:8001")?;
//!     let stats = client.dashboard_stats().await?;
//!     println!("{} case studies", stats.total_case_studies);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{GtmClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use error::ApiError;

use async_trait::async_trait;

use crate::model::{CaseStudy, CaseStudyList, DashboardStats, FrameworkList, MetricList};

/// The five read operations the pages need
#[async_trait]
pub trait GtmApi: Send + Sync {
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    async fn case_studies(&self) -> Result<CaseStudyList, ApiError>;

    async fn case_study(&self, id: &str) -> Result<CaseStudy, ApiError>;

    async fn frameworks(&self) -> Result<FrameworkList, ApiError>;

    /// Opaque per-study metrics
    async fn case_metrics(&self, id: &str) -> Result<MetricList, ApiError>;
}
