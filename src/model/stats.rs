//! Aggregate statistics and response envelopes

use serde::{Deserialize, Serialize};

use super::{CaseStudy, Framework};

/// Portfolio-wide counters computed by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_case_studies: u64,
    #[serde(default)]
    pub startup_studies: u64,
    #[serde(default)]
    pub mnc_studies: u64,
    #[serde(default)]
    pub average_success_rate: f64,
}

/// `GET /api/case-studies` envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyList {
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
}

/// `GET /api/frameworks` envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkList {
    #[serde(default)]
    pub frameworks: Vec<Framework>,
}

/// `GET /api/metrics/{id}` envelope
///
/// Entries are kept as raw JSON; their shape belongs to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricList {
    #[serde(default)]
    pub metrics: Vec<serde_json::Value>,
}

/// Best-effort typed view of one metric entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseMetric {
    pub metric_name: String,
    pub metric_value: f64,
    #[serde(default)]
    pub metric_unit: String,
    #[serde(default)]
    pub time_period: String,
    #[serde(default)]
    pub category: String,
}

impl MetricList {
    /// Entries that match the `CaseMetric` shape, in order; others are skipped
    pub fn typed(&self) -> Vec<CaseMetric> {
        self.metrics
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect()
    }
}
