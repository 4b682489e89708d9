//! Case study documents
//!
//! A case study is one company's documented go-to-market campaign. Nested
//! sections default to empty so that a partially filled document still
//! decodes; list order is the backend's and is kept as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::MetricValue;

/// One company's GTM campaign with outcome metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: String,
    pub company_name: String,
    pub company_type: CompanyType,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub product_category: String,
    #[serde(default)]
    pub solution_overview: String,
    #[serde(default)]
    pub challenge: String,
    /// Percentage in 0..=100
    pub success_rate: f64,
    /// Free-text display string, e.g. "$18.7M ARR in 18 months"
    #[serde(default)]
    pub revenue_impact: String,
    #[serde(default)]
    pub key_metrics: KeyMetrics,
    #[serde(default)]
    pub market_research: MarketResearch,
    #[serde(default)]
    pub channel_strategy: ChannelStrategy,
    #[serde(default)]
    pub competitive_analysis: CompetitiveAnalysis,
    /// Sequential phases; order is meaningful
    #[serde(default)]
    pub execution_timeline: Vec<TimelinePhase>,
    #[serde(default)]
    pub pricing_strategy: PricingStrategy,
}

/// Company classification
///
/// Unknown values are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyType {
    Startup,
    Mnc,
    Other(String),
}

impl CompanyType {
    pub fn as_str(&self) -> &str {
        match self {
            CompanyType::Startup => "startup",
            CompanyType::Mnc => "mnc",
            CompanyType::Other(s) => s,
        }
    }
}

impl From<String> for CompanyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "startup" => CompanyType::Startup,
            "mnc" => CompanyType::Mnc,
            _ => CompanyType::Other(value),
        }
    }
}

impl From<CompanyType> for String {
    fn from(value: CompanyType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit economics, passed through as delivered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    #[serde(default)]
    pub customer_acquisition_cost: Option<MetricValue>,
    #[serde(default)]
    pub customer_lifetime_value: Option<MetricValue>,
    #[serde(default)]
    pub ltv_cac_ratio: Option<MetricValue>,
    #[serde(default)]
    pub churn_rate: Option<MetricValue>,
    #[serde(default)]
    pub monthly_recurring_revenue: Option<MetricValue>,
    #[serde(default)]
    pub net_revenue_retention: Option<MetricValue>,
}

/// Market sizing, each figure a string like "$12.8B"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketResearch {
    #[serde(default)]
    pub total_addressable_market: String,
    #[serde(default)]
    pub serviceable_addressable_market: String,
    #[serde(default)]
    pub target_segment_size: String,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub primary_research_methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStrategy {
    #[serde(default)]
    pub primary_channels: Vec<PrimaryChannel>,
    #[serde(default)]
    pub sales_methodology: Option<String>,
    #[serde(default)]
    pub average_sales_cycle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryChannel {
    pub channel: String,
    /// Share of pipeline, e.g. "65%"
    pub contribution: String,
    #[serde(default)]
    pub focus: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    #[serde(default)]
    pub positioning: String,
    #[serde(default)]
    pub direct_competitors: Vec<Competitor>,
    #[serde(default)]
    pub competitive_advantage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    /// e.g. "34%"
    pub market_share: String,
    #[serde(default)]
    pub key_weakness: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingStrategy {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub pricing_psychology: String,
    #[serde(default)]
    pub discount_strategy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub target: String,
}
