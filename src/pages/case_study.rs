//! Case Study Detail Page
//!
//! Deep-dive view of one case study, keyed by its id. The study and its
//! recorded metrics are fetched together. Changing the id re-enters
//! `Loading` and invalidates any request still in flight for the old id.
//!
//! Chart arrays are reshaped from display strings ("$12.8B", "65%"). Values
//! that do not parse are dropped from the chart instead of plotting as NaN.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::{
    metric_currency, metric_percentage, LoadState, LoadTicket, Loader, PageError, StatTile,
    NOT_AVAILABLE,
};
use crate::api::{ApiError, GtmApi};
use crate::app::Route;
use crate::format::Notation;
use crate::model::{CaseMetric, CaseStudy, MetricList};

/// Five-color palette for detail charts, indexed positionally
pub const DETAIL_COLORS: [&str; 5] = ["#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#8dd1e1"];

const NOT_FOUND_ERROR: &str = "Case study not found";
const LOAD_ERROR: &str = "Failed to load case study data";

/// Everything the detail page renders from
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStudyData {
    pub case_study: CaseStudy,
    pub metrics: MetricList,
}

/// Named bar value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Channel share for the pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSlice {
    pub name: String,
    /// Whole percent
    pub value: i64,
    pub focus: String,
    pub color: &'static str,
}

/// Competitor market share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorBar {
    pub name: String,
    pub share: f64,
    pub weakness: String,
}

/// One execution phase, numbered from 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStep {
    pub order: usize,
    pub phase: String,
    pub duration: String,
    pub activity_count: usize,
    pub activities: Vec<String>,
}

/// Leading float of `s`, ignoring trailing text: `"12.8 bn"` gives 12.8
fn parse_leading_float(s: &str) -> Option<f64> {
    static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid float regex")
    });
    FLOAT.find(s.trim_start())?.as_str().parse().ok()
}

/// Leading integer of `s`, ignoring trailing text: `"12.5"` gives 12
fn parse_leading_int(s: &str) -> Option<i64> {
    static INT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer regex"));
    INT.find(s.trim_start())?.as_str().parse().ok()
}

impl CaseStudyData {
    /// TAM, SAM and target segment in billions
    pub fn market_research_chart(&self) -> Vec<ChartPoint> {
        let research = &self.case_study.market_research;

        [
            ("TAM", &research.total_addressable_market),
            ("SAM", &research.serviceable_addressable_market),
            ("Target", &research.target_segment_size),
        ]
        .into_iter()
        .filter_map(|(name, raw)| {
            let stripped: String = raw.chars().filter(|c| *c != '$' && *c != 'B').collect();
            match parse_leading_float(&stripped) {
                Some(value) => Some(ChartPoint {
                    name: name.to_string(),
                    value,
                }),
                None => {
                    tracing::warn!(field = name, value = %raw, "Unparseable market size, dropped");
                    None
                }
            }
        })
        .collect()
    }

    /// Primary channels with their contribution and chart color
    ///
    /// Colors follow the position in the backend list, so a dropped
    /// channel leaves a gap in the palette rather than shifting it.
    pub fn channel_chart(&self) -> Vec<ChannelSlice> {
        self.case_study
            .channel_strategy
            .primary_channels
            .iter()
            .enumerate()
            .filter_map(|(i, channel)| {
                let value = parse_leading_int(&channel.contribution.replacen('%', "", 1));
                if value.is_none() {
                    tracing::warn!(
                        channel = %channel.channel,
                        contribution = %channel.contribution,
                        "Unparseable channel contribution, dropped"
                    );
                }
                value.map(|value| (i, channel, value))
            })
            .map(|(i, channel, value)| ChannelSlice {
                name: channel
                    .channel
                    .replacen(" Sales", "", 1)
                    .replacen(" Network", "", 1),
                value,
                focus: channel.focus.clone(),
                color: DETAIL_COLORS[i % DETAIL_COLORS.len()],
            })
            .collect()
    }

    /// Direct competitors by market share
    pub fn competitor_chart(&self) -> Vec<CompetitorBar> {
        self.case_study
            .competitive_analysis
            .direct_competitors
            .iter()
            .filter_map(|comp| {
                let share = parse_leading_float(&comp.market_share.replacen('%', "", 1));
                if share.is_none() {
                    tracing::warn!(
                        competitor = %comp.name,
                        market_share = %comp.market_share,
                        "Unparseable market share, dropped"
                    );
                }
                share.map(|share| CompetitorBar {
                    name: comp
                        .name
                        .replacen(" Business", "", 1)
                        .replacen(" Drive", "Drive", 1),
                    share,
                    weakness: comp.key_weakness.clone(),
                })
            })
            .collect()
    }

    pub fn timeline(&self) -> Vec<TimelineStep> {
        self.case_study
            .execution_timeline
            .iter()
            .enumerate()
            .map(|(i, phase)| TimelineStep {
                order: i + 1,
                phase: phase.phase.clone(),
                duration: phase.duration.clone(),
                activity_count: phase.activities.len(),
                activities: phase.activities.clone(),
            })
            .collect()
    }

    /// CAC, LTV, LTV:CAC and churn
    pub fn key_metric_tiles(&self) -> Vec<StatTile> {
        let metrics = &self.case_study.key_metrics;

        let ratio = metrics
            .ltv_cac_ratio
            .as_ref()
            .and_then(|v| v.as_f64())
            .map(|n| format!("{:.1}x", n))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        vec![
            StatTile::new(
                "Customer Acquisition Cost",
                metric_currency(metrics.customer_acquisition_cost.as_ref(), Notation::Standard),
                None,
            ),
            StatTile::new(
                "Customer Lifetime Value",
                metric_currency(metrics.customer_lifetime_value.as_ref(), Notation::Standard),
                None,
            ),
            StatTile::new("LTV:CAC Ratio", ratio, None),
            StatTile::new(
                "Churn Rate",
                metric_percentage(metrics.churn_rate.as_ref()),
                None,
            ),
        ]
    }

    pub fn typed_metrics(&self) -> Vec<CaseMetric> {
        self.metrics.typed()
    }
}

/// Fetch a study and its metrics concurrently; both must succeed
pub async fn fetch_case_study<A: GtmApi + ?Sized>(
    api: &A,
    id: &str,
) -> Result<CaseStudyData, ApiError> {
    let (case_study, metrics) = tokio::try_join!(api.case_study(id), api.case_metrics(id))?;
    Ok(CaseStudyData {
        case_study,
        metrics,
    })
}

/// Case-study detail view-model, keyed by id
#[derive(Debug)]
pub struct CaseStudyPage {
    id: String,
    loader: Loader<CaseStudyData>,
}

impl CaseStudyPage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            loader: Loader::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &LoadState<CaseStudyData> {
        &self.loader.state
    }

    /// Switch to another study
    ///
    /// A different id drops the current data, enters `Loading` and makes any
    /// outstanding ticket stale. Returns whether the id changed.
    pub fn set_id(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if id == self.id {
            return false;
        }
        self.id = id;
        self.loader.begin();
        true
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<CaseStudyData, ApiError>,
    ) -> bool {
        let state = match result {
            Ok(data) => LoadState::Ready(data),
            Err(e) => {
                tracing::error!(case_study = %self.id, "Error fetching case study: {}", e);
                let message = if e.is_not_found() {
                    NOT_FOUND_ERROR
                } else {
                    LOAD_ERROR
                };
                LoadState::Error(PageError::with_back_link(message, Route::Dashboard))
            }
        };
        self.loader.finish(ticket, state)
    }

    pub async fn load<A: GtmApi + ?Sized>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let id = self.id.clone();
        let result = fetch_case_study(api, &id).await;
        self.finish_load(ticket, result);
    }
}
