//! Side-by-side comparison selection
//!
//! Tracks the run ids chosen for comparison. The selection references
//! runs but does not own them, so an id may outlive its run; projection
//! silently drops ids with no matching record.

use crate::types::Run;

/// Ordered, duplicate-free set of run ids selected for comparison.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove an id. Adding an already-selected id is a no-op.
    pub fn toggle(&mut self, run_id: &str, selected: bool) {
        if selected {
            if !self.is_selected(run_id) {
                self.ids.push(run_id.to_string());
            }
        } else {
            self.ids.retain(|id| id != run_id);
        }
    }

    pub fn is_selected(&self, run_id: &str) -> bool {
        self.ids.iter().any(|id| id == run_id)
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Project the selected runs, preserving `runs` order.
    ///
    /// Ids without a matching run (dangling references) are dropped
    /// without error.
    pub fn selected_runs<'a>(&self, runs: &'a [Run]) -> Vec<&'a Run> {
        runs.iter().filter(|r| self.is_selected(&r.id)).collect()
    }
}
