//! Page View-Models
//!
//! Each page owns its own load state and walks the same state machine:
//!
//! ```text
//!   Idle ──begin_load──▶ Loading ──finish_load(Ok)──▶ Ready(data)
//!                           │
//!                           └──finish_load(Err)──▶ Error(message)
//! ```
//!
//! `begin_load` hands out a [`LoadTicket`]. A later `begin_load` (a retry or
//! a route-parameter change) supersedes it, and `finish_load` with a
//! superseded ticket is ignored. That is the guard against a slow response
//! overwriting newer state.
//!
//! Pages: [`DashboardPage`], [`CaseStudyPage`], [`FrameworksPage`].

mod case_study;
mod dashboard;
mod frameworks;

pub use case_study::{
    fetch_case_study, CaseStudyData, CaseStudyPage, ChannelSlice, ChartPoint, CompetitorBar,
    TimelineStep, DETAIL_COLORS,
};
pub use dashboard::{
    fetch_dashboard, parse_revenue_impact, CaseStudyCard, DashboardData, DashboardPage,
    RevenueSummary,
};
pub use frameworks::{
    fetch_frameworks, FrameworksData, FrameworksPage, PhaseCard, NEUTRAL_ACCENT, PHASE_ACCENTS,
};

use serde::Serialize;

use crate::app::Route;
use crate::format::{format_currency, format_percentage, Notation};
use crate::model::MetricValue;

/// Shown where a key metric is missing or unparseable
pub const NOT_AVAILABLE: &str = "N/A";

/// Lifecycle of one page's data
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(PageError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PageError> {
        match self {
            LoadState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// User-facing failure of a page load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageError {
    pub message: String,
    /// Whether the page offers a manual retry
    pub retryable: bool,
    /// Where the page points the user instead
    pub back_link: Option<Route>,
}

impl PageError {
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
            back_link: None,
        }
    }

    pub fn with_back_link(message: impl Into<String>, route: Route) -> Self {
        Self {
            message: message.into(),
            retryable: false,
            back_link: Some(route),
        }
    }
}

/// Headline figure with a caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatTile {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
}

impl StatTile {
    fn new(title: &str, value: String, subtitle: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            value,
            subtitle,
        }
    }
}

fn metric_currency(value: Option<&MetricValue>, notation: Notation) -> String {
    value
        .and_then(MetricValue::as_f64)
        .map(|n| format_currency(n, "USD", notation))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn metric_percentage(value: Option<&MetricValue>) -> String {
    value
        .and_then(MetricValue::as_f64)
        .map(|n| format_percentage(n, 1))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Identifies one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Load state plus the generation counter behind the stale-result guard
#[derive(Debug)]
struct Loader<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
        }
    }
}

impl<T> Loader<T> {
    fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply `state` if `ticket` is still the latest attempt
    fn finish(&mut self, ticket: LoadTicket, state: LoadState<T>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded load result"
            );
            return false;
        }
        self.state = state;
        true
    }
}
