//! Transcript ingestion
//!
//! Converts a finished chat transcript into a new run record with derived
//! fields (token estimate, cost estimate) and prepends it to the store.
//! The chat collaborator calls this once per completed exchange; an empty
//! transcript is a guarded no-op, not an error.

use crate::store::RunStore;
use crate::types::{minute_timestamp, round_currency, ChatTurn, FeedbackThumb, Run, RunStatus};
use chrono::Utc;

/// Estimated tokens per whitespace-separated word.
pub const TOKENS_PER_WORD: f64 = 1.3;
/// Per-1K-token rate applied to chat-sourced runs.
pub const CHAT_RATE_PER_1K: f64 = 0.002;
/// Tag every chat-sourced run is created with.
pub const CHAT_TAG: &str = "chat-session";

// Simulated latency range for chat-sourced runs.
const MIN_CHAT_DURATION_MS: u64 = 800;
const MAX_CHAT_DURATION_MS: u64 = 2500;

/// Estimate the token count of a transcript.
///
/// All turn contents are joined with single spaces; the word count of the
/// joined text is scaled by [`TOKENS_PER_WORD`] and rounded.
pub fn estimate_tokens(transcript: &[ChatTurn]) -> u64 {
    let joined = transcript
        .iter()
        .map(|t| t.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let words = joined.split_whitespace().count();
    (words as f64 * TOKENS_PER_WORD).round() as u64
}

/// Estimate the cost of a chat-sourced run, rounded to 5 decimal places.
pub fn estimate_cost(tokens: u64) -> f64 {
    round_currency(tokens as f64 / 1000.0 * CHAT_RATE_PER_1K, 5)
}

/// Ingest a completed chat transcript as a new run.
///
/// Input text is the first turn's content and output text the last turn's
/// (both equal for a single-turn transcript). Returns the id of the newly
/// stored run, or `None` for an empty transcript.
pub fn ingest_transcript(
    store: &mut RunStore,
    transcript: &[ChatTurn],
    model: &str,
) -> Option<String> {
    let first = match transcript.first() {
        Some(turn) => turn,
        None => {
            tracing::debug!("Empty transcript, nothing to ingest");
            return None;
        }
    };
    let last = transcript.last().unwrap_or(first);

    let tokens = estimate_tokens(transcript);
    let cost = estimate_cost(tokens);

    let run = Run {
        id: store.mint_run_id(),
        timestamp: minute_timestamp(Utc::now()),
        status: RunStatus::Success,
        duration_ms: store.sample_duration_ms(MIN_CHAT_DURATION_MS, MAX_CHAT_DURATION_MS),
        tokens,
        cost,
        model: model.to_string(),
        input_text: first.content.clone(),
        output_text: last.content.clone(),
        tags: vec![CHAT_TAG.to_string()],
        transcript: transcript.to_vec(),
        feedback_thumb: FeedbackThumb::None,
        rating: 0,
        feedback_comment: String::new(),
    };
    let id = store.prepend(run);

    tracing::info!(run_id = %id, model, tokens, "Ingested chat transcript");
    Some(id)
}
