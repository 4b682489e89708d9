//! Dashboard Page
//!
//! Portfolio overview: headline stats, aggregate revenue impact, and one
//! card per case study. Stats and the case-study list are fetched together;
//! the page is ready only when both arrive.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::{metric_currency, metric_percentage, LoadState, LoadTicket, Loader, PageError, StatTile};
use crate::api::{ApiError, GtmApi};
use crate::app::Route;
use crate::format::{
    company_type_badge, format_currency, format_percentage, success_rate_color, truncate_text,
    BadgeStyle, Notation, SuccessTier,
};
use crate::model::{CaseStudy, DashboardStats};

const LOAD_ERROR: &str = "Failed to load dashboard data";

/// Card challenge text is cut to this many characters
const CHALLENGE_PREVIEW_LEN: usize = 120;

/// Everything the dashboard renders from
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub case_studies: Vec<CaseStudy>,
}

/// Revenue aggregate plus the studies left out of it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub total: f64,
    pub counted: usize,
    /// Ids of studies whose `revenue_impact` did not parse
    pub excluded: Vec<String>,
}

/// One case study as shown in the dashboard grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyCard {
    pub id: String,
    pub company_name: String,
    pub company_type: String,
    pub badge: BadgeStyle,
    pub industry: String,
    pub success_rate: String,
    pub success_tier: SuccessTier,
    pub revenue_impact: String,
    pub challenge: String,
    pub customer_acquisition_cost: String,
    pub monthly_recurring_revenue: String,
    pub churn_rate: String,
    pub link: String,
}

/// Dollar amount embedded in a free-text revenue string
///
/// Finds the first `$<number>M` or `$<number>B` anywhere in the text:
/// `"$18.7M ARR in 18 months"` gives 18,700,000. Anything else is `None`.
pub fn parse_revenue_impact(text: &str) -> Option<f64> {
    static REVENUE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\$(\d+(?:\.\d+)?)([MB])").expect("valid revenue regex")
    });

    let caps = REVENUE.captures(text)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let scale = match caps.get(2)?.as_str() {
        "M" => 1_000_000.0,
        _ => 1_000_000_000.0,
    };

    Some(value * scale)
}

impl DashboardData {
    /// Sum of parseable revenue figures; malformed entries are excluded
    pub fn total_revenue_impact(&self) -> f64 {
        self.case_studies
            .iter()
            .filter_map(|s| parse_revenue_impact(&s.revenue_impact))
            .sum()
    }

    /// Revenue aggregate with a record of what was skipped
    pub fn revenue_summary(&self) -> RevenueSummary {
        let mut summary = RevenueSummary {
            total: 0.0,
            counted: 0,
            excluded: Vec::new(),
        };

        for study in &self.case_studies {
            match parse_revenue_impact(&study.revenue_impact) {
                Some(value) => {
                    summary.total += value;
                    summary.counted += 1;
                }
                None => {
                    tracing::warn!(
                        case_study = %study.id,
                        revenue_impact = %study.revenue_impact,
                        "Revenue impact not in $<n>M/$<n>B form, excluded from total"
                    );
                    summary.excluded.push(study.id.clone());
                }
            }
        }

        summary
    }

    pub fn headline_success_rate(&self) -> String {
        format_percentage(self.stats.average_success_rate, 1)
    }

    pub fn stat_tiles(&self) -> Vec<StatTile> {
        vec![
            StatTile::new(
                "Total Case Studies",
                self.stats.total_case_studies.to_string(),
                Some(format!(
                    "{} Startups, {} MNC",
                    self.stats.startup_studies, self.stats.mnc_studies
                )),
            ),
            StatTile::new(
                "Average Success Rate",
                self.headline_success_rate(),
                Some("Across all campaigns".to_string()),
            ),
            StatTile::new(
                "Revenue Impact",
                format_currency(self.total_revenue_impact(), "USD", Notation::Compact),
                Some("Total generated revenue".to_string()),
            ),
        ]
    }

    /// One card per study, in backend order
    pub fn cards(&self) -> Vec<CaseStudyCard> {
        self.case_studies.iter().map(card).collect()
    }
}

fn card(study: &CaseStudy) -> CaseStudyCard {
    let metrics = &study.key_metrics;

    CaseStudyCard {
        id: study.id.clone(),
        company_name: study.company_name.clone(),
        company_type: study.company_type.as_str().to_uppercase(),
        badge: company_type_badge(&study.company_type),
        industry: study.industry.clone(),
        success_rate: format_percentage(study.success_rate, 1),
        success_tier: success_rate_color(study.success_rate),
        revenue_impact: study.revenue_impact.clone(),
        challenge: truncate_text(&study.challenge, CHALLENGE_PREVIEW_LEN),
        customer_acquisition_cost: metric_currency(
            metrics.customer_acquisition_cost.as_ref(),
            Notation::Standard,
        ),
        monthly_recurring_revenue: metric_currency(
            metrics.monthly_recurring_revenue.as_ref(),
            Notation::Compact,
        ),
        churn_rate: metric_percentage(metrics.churn_rate.as_ref()),
        link: Route::CaseStudy(study.id.clone()).path(),
    }
}

/// Fetch stats and the case-study list concurrently; both must succeed
pub async fn fetch_dashboard<A: GtmApi + ?Sized>(api: &A) -> Result<DashboardData, ApiError> {
    let (stats, list) = tokio::try_join!(api.dashboard_stats(), api.case_studies())?;

    Ok(DashboardData {
        stats,
        case_studies: list.case_studies,
    })
}

/// Dashboard view-model
#[derive(Debug, Default)]
pub struct DashboardPage {
    loader: Loader<DashboardData>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<DashboardData> {
        &self.loader.state
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    /// Apply a fetch result; partial data never reaches the page
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DashboardData, ApiError>,
    ) -> bool {
        let state = match result {
            Ok(data) => LoadState::Ready(data),
            Err(e) => {
                tracing::error!("Error fetching dashboard data: {}", e);
                LoadState::Error(PageError::retryable(LOAD_ERROR))
            }
        };
        self.loader.finish(ticket, state)
    }

    pub async fn load<A: GtmApi + ?Sized>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let result = fetch_dashboard(api).await;
        self.finish_load(ticket, result);
    }

    /// Reload after a failure; does nothing unless the page is in error
    pub async fn retry<A: GtmApi + ?Sized>(&mut self, api: &A) -> bool {
        if self.loader.state.error().is_none() {
            return false;
        }
        self.load(api).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{case_study, sample_stats, sample_studies, FakeApi};

    fn data_with_revenues(revenues: &[&str]) -> DashboardData {
        DashboardData {
            stats: sample_stats(),
            case_studies: revenues
                .iter()
                .enumerate()
                .map(|(i, r)| case_study(&format!("cs-{}", i + 1), r))
                .collect(),
        }
    }

    #[test]
    fn test_parse_revenue_impact() {
        assert_eq!(parse_revenue_impact("$45M"), Some(45_000_000.0));
        assert_eq!(parse_revenue_impact("$2B"), Some(2_000_000_000.0));
        assert_eq!(
            parse_revenue_impact("$18.7M ARR in 18 months"),
            Some(18_700_000.0)
        );
        assert_eq!(
            parse_revenue_impact("$142M ARR with 67% market share"),
            Some(142_000_000.0)
        );
        assert_eq!(parse_revenue_impact("N/A"), None);
        assert_eq!(parse_revenue_impact("$900K"), None);
    }

    #[test]
    fn test_revenue_aggregate_skips_malformed() {
        let data = data_with_revenues(&["$45M", "$2B", "N/A"]);
        assert_eq!(data.total_revenue_impact(), 2_045_000_000.0);

        let summary = data.revenue_summary();
        assert_eq!(summary.total, 2_045_000_000.0);
        assert_eq!(summary.counted, 2);
        assert_eq!(summary.excluded, vec!["cs-3".to_string()]);
    }

    #[test]
    fn test_stat_tiles() {
        let data = data_with_revenues(&["$45M", "$2B", "N/A"]);
        let tiles = data.stat_tiles();

        assert_eq!(tiles[0].value, "3");
        assert_eq!(tiles[0].subtitle.as_deref(), Some("2 Startups, 1 MNC"));
        assert_eq!(tiles[1].value, "94.2%");
        assert_eq!(tiles[2].value, "$2B");
    }

    #[test]
    fn test_cards_are_formatted() {
        let mut data = data_with_revenues(&["$45M"]);
        data.case_studies[0].challenge = "x".repeat(150);

        let cards = data.cards();
        let card = &cards[0];
        assert_eq!(card.company_type, "STARTUP");
        assert_eq!(card.badge, BadgeStyle::Startup);
        assert_eq!(card.success_rate, "94.2%");
        assert_eq!(card.success_tier, SuccessTier::Tier2);
        assert_eq!(card.challenge.chars().count(), 123);
        assert_eq!(card.customer_acquisition_cost, "$2,847");
        assert_eq!(card.monthly_recurring_revenue, "$847K");
        assert_eq!(card.churn_rate, "3.2%");
        assert_eq!(card.link, "/case-study/cs-1");
    }

    #[test]
    fn test_missing_metrics_render_na() {
        let mut data = data_with_revenues(&["$45M"]);
        data.case_studies[0].key_metrics = Default::default();

        let card = &data.cards()[0];
        assert_eq!(card.customer_acquisition_cost, "N/A");
        assert_eq!(card.churn_rate, "N/A");
    }

    #[tokio::test]
    async fn test_load_reaches_ready() {
        let api = FakeApi::default();
        let mut page = DashboardPage::new();
        assert_eq!(*page.state(), LoadState::Idle);

        page.load(&api).await;

        let data = page.state().data().expect("dashboard should be ready");
        assert_eq!(data.cards().len(), 3);
        assert_eq!(data.headline_success_rate(), "94.2%");
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_one_failed_call_fails_the_page() {
        let api = FakeApi {
            studies: None,
            ..FakeApi::default()
        };
        let mut page = DashboardPage::new();

        page.load(&api).await;

        let err = page.state().error().expect("dashboard should be in error");
        assert_eq!(err.message, "Failed to load dashboard data");
        assert!(err.retryable);
        assert!(page.state().data().is_none());
    }

    #[tokio::test]
    async fn test_retry_only_from_error() {
        let mut page = DashboardPage::new();

        let failing = FakeApi {
            stats: None,
            ..FakeApi::default()
        };
        page.load(&failing).await;
        assert!(page.state().error().is_some());

        let healthy = FakeApi::default();
        assert!(page.retry(&healthy).await);
        assert!(page.state().is_ready());

        // Already ready: retry is a no-op
        assert!(!page.retry(&healthy).await);
        assert_eq!(healthy.call_count(), 2);
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let api = FakeApi::default();
        let mut page = DashboardPage::new();

        let stale = page.begin_load();
        let current = page.begin_load();

        let stale_result = fetch_dashboard(&api).await.map(|mut d| {
            d.case_studies.truncate(1);
            d
        });
        assert!(!page.finish_load(stale, stale_result));
        assert!(page.state().is_loading());

        assert!(page.finish_load(current, fetch_dashboard(&api).await));
        assert_eq!(page.state().data().unwrap().case_studies, sample_studies());
    }
}
