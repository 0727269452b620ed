use serde::Serialize;

use crate::compare::{Category, compare};
use crate::dataset::{Dataset, DatasetSummary, Record};
use crate::error::LoadError;
use crate::resolve::resolve;

/// Everything the controller owns between events.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    dataset: Dataset,
    load_error: Option<String>,
    query: String,
    // Bumped on every finished load, successful or not.
    dataset_version: u64,
}

#[derive(Debug)]
pub enum AppEvent {
    LoadFinished(Result<Dataset, LoadError>),
    QueryChanged(String),
    SuggestionClicked(String),
}

impl AppState {
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dataset_version(&self) -> u64 {
        self.dataset_version
    }
}

/// Applies one event. A finished load replaces the dataset wholesale; a
/// failed one leaves an empty dataset behind, never the previous records.
pub fn transition(state: AppState, event: AppEvent) -> AppState {
    match event {
        AppEvent::LoadFinished(Ok(dataset)) => AppState {
            dataset,
            load_error: None,
            dataset_version: state.dataset_version + 1,
            ..state
        },
        AppEvent::LoadFinished(Err(err)) => AppState {
            dataset: Dataset::empty(),
            load_error: Some(err.user_message()),
            dataset_version: state.dataset_version + 1,
            ..state
        },
        AppEvent::QueryChanged(query) | AppEvent::SuggestionClicked(query) => {
            AppState { query, ..state }
        }
    }
}

/// What presentation needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<'a> {
    pub dataset: DatasetSummary,
    pub load_error: Option<&'a str>,
    pub query: &'a str,
    pub suggestions: Vec<&'a Record>,
    pub selected: Option<&'a Record>,
    pub baseline: Option<&'a Record>,
    pub comparison: Option<Category>,
    pub missing_baseline: bool,
}

pub fn derive_view(state: &AppState) -> View<'_> {
    let resolution = resolve(&state.query, &state.dataset);
    let baseline = state.dataset.baseline();
    let comparison = match (resolution.selected, baseline) {
        (Some(selected), Some(baseline)) => Some(compare(selected, baseline)),
        _ => None,
    };

    View {
        dataset: state.dataset.summary(),
        load_error: state.load_error(),
        query: &state.query,
        suggestions: resolution.suggestions,
        selected: resolution.selected,
        baseline,
        comparison,
        missing_baseline: state.load_error.is_none()
            && !state.dataset.is_empty()
            && baseline.is_none(),
    }
}
