//! Pure filtering over the run collection.
//!
//! The dashboard recomputes the filtered view on demand from current
//! store state and the session's filter criteria; nothing is cached.

use crate::types::{Run, RunStatus};

/// Session-scoped filter criteria narrowing the displayed runs.
///
/// `None` on the optional fields means "All" (no narrowing). The default
/// value applies no filtering at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against run id and input text
    pub search_query: String,
    /// Restrict to one outcome
    pub status: Option<RunStatus>,
    /// Restrict to one exact model name
    pub model: Option<String>,
}

impl FilterCriteria {
    /// Whether the criteria narrow anything.
    pub fn is_unfiltered(&self) -> bool {
        self.search_query.is_empty() && self.status.is_none() && self.model.is_none()
    }
}

/// Compute the filtered view of `runs`.
///
/// Filters compose as logical AND and preserve the input order
/// (store order, newest-first). The input is never mutated.
pub fn filtered_runs<'a>(runs: &'a [Run], criteria: &FilterCriteria) -> Vec<&'a Run> {
    let query = criteria.search_query.to_lowercase();

    runs.iter()
        .filter(|run| {
            if !query.is_empty()
                && !run.id.to_lowercase().contains(&query)
                && !run.input_text.to_lowercase().contains(&query)
            {
                return false;
            }
            if let Some(status) = criteria.status {
                if run.status != status {
                    return false;
                }
            }
            if let Some(model) = &criteria.model {
                if &run.model != model {
                    return false;
                }
            }
            true
        })
        .collect()
}
