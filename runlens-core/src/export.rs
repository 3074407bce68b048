//! JSON export of the run collection
//!
//! Projects runs into a stable, human-diffable JSON document for
//! download. The field set is deliberately narrower than [`Run`]:
//! transcript and duration are excluded, and key order follows the
//! struct declaration so repeated exports diff cleanly.

use crate::error::Result;
use crate::types::{Run, RunStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Filename the export document is written under.
pub const EXPORT_FILENAME: &str = "evaluation_runs.json";

/// One exported run. Field declaration order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: String,
    pub timestamp: String,
    pub status: RunStatus,
    pub model: String,
    pub tokens: u64,
    /// Full precision; not re-rounded on export
    pub cost: f64,
    pub input: String,
    pub output: String,
    pub rating: u8,
    pub feedback: String,
    pub tags: Vec<String>,
}

impl From<&Run> for ExportRecord {
    fn from(run: &Run) -> Self {
        Self {
            id: run.id.clone(),
            timestamp: run.timestamp.clone(),
            status: run.status,
            model: run.model.clone(),
            tokens: run.tokens,
            cost: run.cost,
            input: run.input_text.clone(),
            output: run.output_text.clone(),
            rating: run.rating,
            feedback: run.feedback_comment.clone(),
            tags: run.tags.clone(),
        }
    }
}

/// Project the collection into export records, preserving input order.
pub fn export_records(runs: &[Run]) -> Vec<ExportRecord> {
    runs.iter().map(ExportRecord::from).collect()
}

/// Serialize the collection as a pretty-printed UTF-8 JSON array.
pub fn export_json(runs: &[Run]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_records(runs))?)
}

/// Write the export document as `evaluation_runs.json` under `dir`.
///
/// Returns the path of the written file.
pub fn write_export(runs: &[Run], dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILENAME);
    std::fs::write(&path, export_json(runs)?)?;

    tracing::info!(path = %path.display(), runs = runs.len(), "Wrote export document");
    Ok(path)
}
