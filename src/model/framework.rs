//! Framework methodology documents

use serde::{Deserialize, Serialize};

/// A named, phased GTM methodology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub success_rate: f64,
    #[serde(default)]
    pub use_cases: Vec<String>,
    /// Sequential steps; order is meaningful
    #[serde(default)]
    pub phases: Vec<FrameworkPhase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkPhase {
    pub phase_name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub key_deliverables: Vec<String>,
    #[serde(default)]
    pub success_metrics: Vec<String>,
}
