//! Dashboard projections over the run collection.
//!
//! Pure functions computing the headline metrics and the two chart-ready
//! series. Headline metrics and daily volume are computed from the full
//! collection; the latency series reflects the currently filtered view.
//! Everything is recomputed on demand; run counts are small enough that
//! recomputation cost is irrelevant.

use crate::types::{round_currency, Run};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of most-recent runs shown in the latency chart.
pub const LATENCY_SERIES_LIMIT: usize = 20;

/// Headline metrics for the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    /// Total number of runs
    pub total_runs: usize,
    /// Mean latency in milliseconds, floored; 0 for an empty collection
    pub average_latency_ms: u64,
    /// Sum of token counts
    pub total_tokens: u64,
    /// Sum of run costs, rounded to 4 decimal places
    pub total_cost: f64,
}

/// One point of the latency/tokens chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyPoint {
    /// Run id, used as the x-axis label
    pub label: String,
    pub latency_ms: u64,
    pub tokens: u64,
}

/// One point of the daily volume chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyVolumePoint {
    /// `YYYY-MM-DD` date key
    pub date: String,
    /// Runs recorded on that date
    pub count: u64,
}

/// Compute the four headline metrics from the full run collection.
pub fn headline_metrics(runs: &[Run]) -> HeadlineMetrics {
    if runs.is_empty() {
        return HeadlineMetrics::default();
    }

    let total_duration: u64 = runs.iter().map(|r| r.duration_ms).sum();
    HeadlineMetrics {
        total_runs: runs.len(),
        average_latency_ms: total_duration / runs.len() as u64,
        total_tokens: runs.iter().map(|r| r.tokens).sum(),
        total_cost: round_currency(runs.iter().map(|r| r.cost).sum(), 4),
    }
}

/// Latency/tokens series over the filtered view: the last
/// [`LATENCY_SERIES_LIMIT`] runs in ascending timestamp order.
///
/// Empty input yields an empty series; there is no zero-record
/// placeholder.
pub fn latency_series(filtered: &[&Run]) -> Vec<LatencyPoint> {
    let mut ordered: Vec<&Run> = filtered.to_vec();
    // Fixed-width timestamps: lexicographic order is chronological order.
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let start = ordered.len().saturating_sub(LATENCY_SERIES_LIMIT);
    ordered[start..]
        .iter()
        .map(|r| LatencyPoint {
            label: r.id.clone(),
            latency_ms: r.duration_ms,
            tokens: r.tokens,
        })
        .collect()
}

/// Daily run volume over the full collection, ascending by date.
pub fn daily_volume_series(runs: &[Run]) -> Vec<DailyVolumePoint> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for run in runs {
        *counts.entry(run.date()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(date, count)| DailyVolumePoint {
            date: date.to_string(),
            count,
        })
        .collect()
}
