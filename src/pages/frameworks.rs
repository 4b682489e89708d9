//! Frameworks Page
//!
//! Catalog of GTM methodologies. One framework is selected at a time (the
//! first one after loading) and its phases are laid out as numbered steps.

use serde::Serialize;

use super::{LoadState, LoadTicket, Loader, PageError};
use crate::api::{ApiError, GtmApi};
use crate::model::Framework;

const LOAD_ERROR: &str = "Failed to load GTM frameworks";

/// Accent per phase position; phases past the end use [`NEUTRAL_ACCENT`]
pub const PHASE_ACCENTS: [&str; 4] = ["yellow", "blue", "green", "purple"];

pub const NEUTRAL_ACCENT: &str = "gray";

#[derive(Debug, Clone, PartialEq)]
pub struct FrameworksData {
    pub frameworks: Vec<Framework>,
    selected: Option<usize>,
}

/// One framework phase laid out as a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseCard {
    pub number: usize,
    pub name: String,
    pub duration: String,
    pub accent: &'static str,
    pub activities: Vec<String>,
    pub key_deliverables: Vec<String>,
    pub success_metrics: Vec<String>,
    /// Whether a connector to a following phase is drawn
    pub has_next: bool,
}

impl FrameworksData {
    pub fn new(frameworks: Vec<Framework>) -> Self {
        let selected = if frameworks.is_empty() { None } else { Some(0) };
        Self {
            frameworks,
            selected,
        }
    }

    pub fn selected(&self) -> Option<&Framework> {
        self.selected.and_then(|i| self.frameworks.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select by position; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.frameworks.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Phases of the selected framework, numbered from 1
    pub fn phase_cards(&self) -> Vec<PhaseCard> {
        let Some(framework) = self.selected() else {
            return Vec::new();
        };
        let count = framework.phases.len();

        framework
            .phases
            .iter()
            .enumerate()
            .map(|(i, phase)| PhaseCard {
                number: i + 1,
                name: phase.phase_name.clone(),
                duration: phase.duration.clone(),
                accent: PHASE_ACCENTS.get(i).copied().unwrap_or(NEUTRAL_ACCENT),
                activities: phase.activities.clone(),
                key_deliverables: phase.key_deliverables.clone(),
                success_metrics: phase.success_metrics.clone(),
                has_next: i + 1 < count,
            })
            .collect()
    }
}

pub async fn fetch_frameworks<A: GtmApi + ?Sized>(api: &A) -> Result<FrameworksData, ApiError> {
    let list = api.frameworks().await?;
    Ok(FrameworksData::new(list.frameworks))
}

/// Framework catalog view-model
#[derive(Debug, Default)]
pub struct FrameworksPage {
    loader: Loader<FrameworksData>,
}

impl FrameworksPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<FrameworksData> {
        &self.loader.state
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<FrameworksData, ApiError>,
    ) -> bool {
        let state = match result {
            Ok(data) => LoadState::Ready(data),
            Err(e) => {
                tracing::error!("Error fetching frameworks: {}", e);
                LoadState::Error(PageError::retryable(LOAD_ERROR))
            }
        };
        self.loader.finish(ticket, state)
    }

    pub async fn load<A: GtmApi + ?Sized>(&mut self, api: &A) {
        let ticket = self.begin_load();
        let result = fetch_frameworks(api).await;
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

    /// Change the selected framework; only meaningful once ready
    pub fn select(&mut self, index: usize) -> bool {
        match &mut self.loader.state {
            LoadState::Ready(data) => data.select(index),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{framework, FakeApi};

    #[test]
    fn test_first_framework_selected() {
        let data = FrameworksData::new(vec![framework("A", 2), framework("B", 3)]);
        assert_eq!(data.selected_index(), Some(0));
        assert_eq!(data.selected().unwrap().name, "A");

        let empty = FrameworksData::new(vec![]);
        assert!(empty.selected().is_none());
        assert!(empty.phase_cards().is_empty());
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut data = FrameworksData::new(vec![framework("A", 2), framework("B", 3)]);
        assert!(data.select(1));
        assert_eq!(data.selected().unwrap().name, "B");
        assert!(!data.select(2));
        assert_eq!(data.selected().unwrap().name, "B");
    }

    #[test]
    fn test_phase_cards_accents_and_connectors() {
        let data = FrameworksData::new(vec![framework("Long", 5)]);
        let cards = data.phase_cards();

        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].number, 1);
        assert_eq!(cards[0].accent, "yellow");
        assert_eq!(cards[3].accent, "purple");
        assert_eq!(cards[4].accent, NEUTRAL_ACCENT);
        assert!(cards[3].has_next);
        assert!(!cards[4].has_next);
        assert_eq!(cards[2].key_deliverables, vec!["Deliverable 3".to_string()]);
    }

    #[tokio::test]
    async fn test_load_and_select() {
        let api = FakeApi::default();
        let mut page = FrameworksPage::new();

        assert!(!page.select(1));
        page.load(&api).await;
        assert!(page.select(1));

        let data = page.state().data().unwrap();
        assert_eq!(data.selected().unwrap().name, "Enterprise Rollout");
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let mut page = FrameworksPage::new();
        let failing = FakeApi {
            frameworks: None,
            ..FakeApi::default()
        };

        page.load(&failing).await;
        let err = page.state().error().unwrap();
        assert_eq!(err.message, "Failed to load GTM frameworks");
        assert!(err.retryable);

        assert!(page.retry(&FakeApi::default()).await);
        assert_eq!(page.state().data().unwrap().frameworks.len(), 2);
    }
}
