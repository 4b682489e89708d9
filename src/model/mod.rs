//! Portfolio Data Model
//!
//! Typed mirrors of the JSON documents served by the GTM backend:
//!
//! - **case_study**: `CaseStudy` and its nested research, channel,
//!   competitor, timeline and pricing sections
//! - **framework**: `Framework` and its ordered phases
//! - **stats**: `DashboardStats`, the list envelopes, and per-study metrics
//! - **value**: `MetricValue`, a number-or-string key metric
//!
//! Everything here is read-only view data. The frontend never writes back.

mod case_study;
mod framework;
mod stats;
mod value;

pub use case_study::{
    CaseStudy, ChannelStrategy, CompanyType, CompetitiveAnalysis, Competitor, KeyMetrics,
    MarketResearch, PricingStrategy, PricingTier, PrimaryChannel, TimelinePhase,
};
pub use framework::{Framework, FrameworkPhase};
pub use stats::{CaseMetric, CaseStudyList, DashboardStats, FrameworkList, MetricList};
pub use value::MetricValue;
