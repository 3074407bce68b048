//! Owned dashboard session state
//!
//! One explicitly owned object holding the run store and the
//! session-scoped UI state (filter criteria, comparison selection,
//! per-run expansion). The presentation layer holds a reference to this
//! and pulls the view model after each mutation; every accessor
//! recomputes from current state, so there is nothing to invalidate.

use crate::analytics::{
    daily_volume_series, headline_metrics, latency_series, DailyVolumePoint, HeadlineMetrics,
    LatencyPoint,
};
use crate::error::Result;
use crate::query::{filtered_runs, FilterCriteria};
use crate::selection::ComparisonSelection;
use crate::store::RunStore;
use crate::types::{Run, RunStatus};

/// Dashboard session: the run store plus transient review state.
pub struct Dashboard {
    store: RunStore,
    criteria: FilterCriteria,
    selection: ComparisonSelection,
    expanded_run_id: Option<String>,
    comparison_open: bool,
}

impl Dashboard {
    pub fn new(store: RunStore) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            selection: ComparisonSelection::new(),
            expanded_run_id: None,
            comparison_open: false,
        }
    }

    // ============================================
    // Store access
    // ============================================

    pub fn store(&self) -> &RunStore {
        &self.store
    }

    /// Mutable store access for the reviewer mutation entry points.
    pub fn store_mut(&mut self) -> &mut RunStore {
        &mut self.store
    }

    // ============================================
    // Filter criteria
    // ============================================

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
    }

    /// `None` selects "All".
    pub fn set_status_filter(&mut self, status: Option<RunStatus>) {
        self.criteria.status = status;
    }

    /// `None` selects "All".
    pub fn set_model_filter(&mut self, model: Option<String>) {
        self.criteria.model = model;
    }

    // ============================================
    // Selection and expansion
    // ============================================

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    pub fn toggle_selection(&mut self, run_id: &str, selected: bool) {
        self.selection.toggle(run_id, selected);
    }

    pub fn set_comparison_open(&mut self, open: bool) {
        self.comparison_open = open;
    }

    pub fn comparison_open(&self) -> bool {
        self.comparison_open
    }

    /// Expand a run's detail view, or collapse it if already expanded.
    /// At most one run is expanded at a time.
    pub fn toggle_detail(&mut self, run_id: &str) {
        if self.expanded_run_id.as_deref() == Some(run_id) {
            self.expanded_run_id = None;
        } else {
            self.expanded_run_id = Some(run_id.to_string());
        }
    }

    pub fn expanded_run_id(&self) -> Option<&str> {
        self.expanded_run_id.as_deref()
    }

    // ============================================
    // View model
    // ============================================

    /// Runs matching the current filter criteria, store order preserved.
    pub fn filtered_runs(&self) -> Vec<&Run> {
        filtered_runs(self.store.runs(), &self.criteria)
    }

    /// Headline metrics over the full collection (unfiltered).
    pub fn metrics(&self) -> HeadlineMetrics {
        headline_metrics(self.store.runs())
    }

    /// Latency/tokens chart over the filtered view.
    pub fn latency_series(&self) -> Vec<LatencyPoint> {
        latency_series(&self.filtered_runs())
    }

    /// Daily volume chart over the full collection.
    pub fn daily_volume(&self) -> Vec<DailyVolumePoint> {
        daily_volume_series(self.store.runs())
    }

    /// Runs selected for side-by-side comparison, store order preserved.
    pub fn selected_runs(&self) -> Vec<&Run> {
        self.selection.selected_runs(self.store.runs())
    }

    /// Options for the model filter dropdown.
    pub fn model_options(&self) -> Vec<String> {
        self.store.distinct_models()
    }

    /// Pretty-printed export document of the full collection.
    pub fn export_json(&self) -> Result<String> {
        crate::export::export_json(self.store.runs())
    }
}
