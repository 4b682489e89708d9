//! Advisory insight sentences for a case study
//!
//! Output is randomized. The caller passes the random source, so tests can
//! pin it with a seeded `StdRng`.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::format_percentage;
use crate::model::CaseStudy;

/// Every sentence that can be produced for `study`
///
/// Templates whose inputs are missing or unparseable are left out.
pub fn insight_candidates(study: &CaseStudy) -> Vec<String> {
    let mut out = vec![format!(
        "{} success rate achieved through strategic positioning",
        format_percentage(study.success_rate, 1)
    )];

    if !study.revenue_impact.trim().is_empty() {
        out.push(format!(
            "{} revenue impact demonstrates exceptional market execution",
            study.revenue_impact
        ));
    }

    if let Some(ratio) = &study.key_metrics.ltv_cac_ratio {
        out.push(format!(
            "LTV:CAC ratio of {} indicates highly efficient customer acquisition",
            ratio
        ));
    }

    if let Some(nrr) = study
        .key_metrics
        .net_revenue_retention
        .as_ref()
        .and_then(|v| v.as_f64())
    {
        out.push(format!(
            "{} net revenue retention shows strong product-market fit",
            format_percentage(nrr - 100.0, 1)
        ));
    }

    out
}

/// Pick one insight for `study`
pub fn generate_insight<R: Rng + ?Sized>(study: &CaseStudy, rng: &mut R) -> Option<String> {
    insight_candidates(study).choose(rng).cloned()
}
