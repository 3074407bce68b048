//! In-memory run store
//!
//! Owns the mutable collection of evaluation runs, newest-first. All
//! mutation goes through store entry points; each entry point runs to
//! completion before any derived view observes the collection, so reads
//! always see a consistent state. Mutations that target an unknown run id
//! are tolerated as silent no-ops (the UI may race against an edit), but
//! every mutation reports whether it applied so tests can tell the cases
//! apart.

use crate::types::{minute_timestamp, round_currency, FeedbackThumb, Run, RunStatus, MAX_RATING};
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-1K-token rate applied to models whose name contains "gpt-4".
pub const GPT4_RATE_PER_1K: f64 = 0.03;
/// Per-1K-token rate applied to every other model.
pub const BASE_RATE_PER_1K: f64 = 0.002;

// Id space for minted run ids. Collisions are resolved by redrawing, so
// ids are unique as long as the collection stays well below 90k runs.
const RUN_ID_MIN: u32 = 10_000;
const RUN_ID_MAX: u32 = 99_999;

const SYNTHETIC_MODELS: &[&str] = &["gpt-4-turbo", "gpt-3.5-turbo", "claude-3-opus"];

const SYNTHETIC_PROMPTS: &[&str] = &[
    "Explain quantum computing",
    "Write a python script for scraping",
    "Summarize this article",
    "Translate to Spanish",
    "Debug this code snippet",
];

const SYNTHETIC_RESPONSE: &str =
    "The simulated model works through the request step by step and returns \
     a plausible multi-paragraph answer for review.";

/// Store owning the run collection and the random source used to mint
/// ids and generate synthetic fixtures.
pub struct RunStore {
    runs: Vec<Run>,
    rng: StdRng,
}

impl RunStore {
    /// Create an empty store with an entropy-seeded random source.
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an empty store with a fixed seed, for reproducible data.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            runs: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ============================================
    // Read accessors
    // ============================================

    /// All runs, newest-first.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Look up a run by id.
    pub fn get(&self, run_id: &str) -> Option<&Run> {
        self.runs.iter().find(|r| r.id == run_id)
    }

    /// Distinct model names across the collection, sorted. Feeds the
    /// model filter options.
    pub fn distinct_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.runs.iter().map(|r| r.model.clone()).collect();
        models.sort();
        models.dedup();
        models
    }

    // ============================================
    // Id minting
    // ============================================

    /// Mint a run id that is unique across the current collection.
    ///
    /// Ids keep the `run_NNNNN` display shape; a drawn id that collides
    /// with a live run is redrawn.
    pub fn mint_run_id(&mut self) -> String {
        loop {
            let candidate = format!("run_{}", self.rng.gen_range(RUN_ID_MIN..=RUN_ID_MAX));
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Draw a latency sample from the store's random source.
    pub(crate) fn sample_duration_ms(&mut self, low: u64, high: u64) -> u64 {
        self.rng.gen_range(low..=high)
    }

    // ============================================
    // Seeding and insertion
    // ============================================

    /// Populate an empty store with `count` synthetic runs.
    ///
    /// Load guard: a store that already holds runs is left untouched, so
    /// repeated invocation (page revisits) cannot duplicate data. Returns
    /// the number of runs generated.
    pub fn seed_synthetic(&mut self, count: usize) -> usize {
        if !self.runs.is_empty() {
            tracing::debug!(
                existing = self.runs.len(),
                "Store already populated, skipping synthetic seed"
            );
            return 0;
        }

        let now = Utc::now();
        for i in 0..count {
            let model = SYNTHETIC_MODELS[self.rng.gen_range(0..SYNTHETIC_MODELS.len())];
            // 4:1 bias toward success
            let status = if self.rng.gen_ratio(1, 5) {
                RunStatus::Error
            } else {
                RunStatus::Success
            };
            let tokens = self.rng.gen_range(150..=2000u64);
            let duration_ms = self.rng.gen_range(500..=5000u64);
            let rate = if model.contains("gpt-4") {
                GPT4_RATE_PER_1K
            } else {
                BASE_RATE_PER_1K
            };
            let cost = round_currency(tokens as f64 / 1000.0 * rate, 4);
            let rating = self.rng.gen_range(0..=MAX_RATING);
            let feedback_thumb = match self.rng.gen_range(0..3u8) {
                0 => FeedbackThumb::Up,
                1 => FeedbackThumb::Down,
                _ => FeedbackThumb::None,
            };
            let tags = if i % 2 == 0 {
                vec!["production".to_string()]
            } else {
                vec!["test".to_string()]
            };
            let id = self.mint_run_id();

            self.runs.push(Run {
                id,
                timestamp: minute_timestamp(now - Duration::hours(i as i64 * 2)),
                status,
                duration_ms,
                tokens,
                cost,
                model: model.to_string(),
                input_text: SYNTHETIC_PROMPTS[i % SYNTHETIC_PROMPTS.len()].to_string(),
                output_text: SYNTHETIC_RESPONSE.to_string(),
                tags,
                transcript: Vec::new(),
                feedback_thumb,
                rating,
                feedback_comment: String::new(),
            });
        }

        // Newest-first; fixed-width timestamps sort lexicographically in
        // chronological order.
        self.runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        tracing::info!(count, "Seeded synthetic runs");
        count
    }

    /// Insert a run at the front of the collection (newest-first).
    ///
    /// If the incoming id collides with a live run, a fresh id is minted
    /// to preserve the uniqueness invariant. Returns the id the run was
    /// stored under.
    pub fn prepend(&mut self, mut run: Run) -> String {
        if self.get(&run.id).is_some() {
            let replacement = self.mint_run_id();
            tracing::warn!(
                colliding = %run.id,
                replacement = %replacement,
                "Run id collision on prepend, reminting"
            );
            run.id = replacement;
        }
        let id = run.id.clone();
        self.runs.insert(0, run);
        id
    }

    // ============================================
    // Reviewer mutations
    // ============================================

    fn find_mut(&mut self, run_id: &str) -> Option<&mut Run> {
        self.runs.iter_mut().find(|r| r.id == run_id)
    }

    /// Set the thumb feedback on a run. Returns whether a run was updated.
    pub fn set_thumb(&mut self, run_id: &str, value: FeedbackThumb) -> bool {
        match self.find_mut(run_id) {
            Some(run) => {
                run.feedback_thumb = value;
                tracing::debug!(run_id, thumb = value.as_str(), "Thumb feedback set");
                true
            }
            None => {
                tracing::debug!(run_id, "Thumb update for unknown run ignored");
                false
            }
        }
    }

    /// Set the star rating on a run, clamped to 0-5.
    pub fn set_rating(&mut self, run_id: &str, rating: u8) -> bool {
        let rating = rating.min(MAX_RATING);
        match self.find_mut(run_id) {
            Some(run) => {
                run.rating = rating;
                tracing::debug!(run_id, rating, "Rating set");
                true
            }
            None => {
                tracing::debug!(run_id, "Rating update for unknown run ignored");
                false
            }
        }
    }

    /// Replace the free-text feedback comment on a run.
    pub fn set_comment(&mut self, run_id: &str, comment: &str) -> bool {
        match self.find_mut(run_id) {
            Some(run) => {
                run.feedback_comment = comment.to_string();
                true
            }
            None => false,
        }
    }

    /// Append a tag to a run. Blank tags and duplicates are no-ops.
    pub fn add_tag(&mut self, run_id: &str, tag: &str) -> bool {
        if tag.trim().is_empty() {
            return false;
        }
        match self.find_mut(run_id) {
            Some(run) => {
                if run.tags.iter().any(|t| t == tag) {
                    return false;
                }
                run.tags.push(tag.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove a tag from a run. Absent tags are a no-op.
    pub fn remove_tag(&mut self, run_id: &str, tag: &str) -> bool {
        match self.find_mut(run_id) {
            Some(run) => {
                let before = run.tags.len();
                run.tags.retain(|t| t != tag);
                run.tags.len() != before
            }
            None => false,
        }
    }
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_run(id: &str, timestamp: &str) -> Run {
        Run {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            status: RunStatus::Success,
            duration_ms: 1200,
            tokens: 300,
            cost: 0.0006,
            model: "gpt-3.5-turbo".to_string(),
            input_text: "Summarize this article".to_string(),
            output_text: "A summary.".to_string(),
            tags: vec!["test".to_string()],
            transcript: Vec::new(),
            feedback_thumb: FeedbackThumb::None,
            rating: 0,
            feedback_comment: String::new(),
        }
    }

    #[test]
    fn test_seed_synthetic_populates_empty_store() {
        let mut store = RunStore::with_seed(42);
        assert_eq!(store.seed_synthetic(15), 15);
        assert_eq!(store.len(), 15);
    }

    #[test]
    fn test_seed_synthetic_is_idempotent() {
        let mut store = RunStore::with_seed(42);
        store.seed_synthetic(15);
        assert_eq!(store.seed_synthetic(15), 0);
        assert_eq!(store.len(), 15);
    }

    #[test]
    fn test_synthetic_ids_are_unique() {
        let mut store = RunStore::with_seed(7);
        store.seed_synthetic(500);
        let ids: HashSet<&str> = store.runs().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_synthetic_values_are_in_range() {
        let mut store = RunStore::with_seed(3);
        store.seed_synthetic(50);
        for run in store.runs() {
            assert!((500..=5000).contains(&run.duration_ms));
            assert!((150..=2000).contains(&run.tokens));
            assert!(run.rating <= MAX_RATING);
            assert!(SYNTHETIC_MODELS.contains(&run.model.as_str()));
            assert!(run.transcript.is_empty());

            let rate = if run.model.contains("gpt-4") {
                GPT4_RATE_PER_1K
            } else {
                BASE_RATE_PER_1K
            };
            let expected = round_currency(run.tokens as f64 / 1000.0 * rate, 4);
            assert_eq!(run.cost, expected);
        }
    }

    #[test]
    fn test_synthetic_runs_sorted_newest_first_with_alternating_tags() {
        let mut store = RunStore::with_seed(11);
        store.seed_synthetic(10);
        let runs = store.runs();
        for pair in runs.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        // 2-hour steps keep generation order identical to sorted order,
        // so tag parity survives the sort.
        for (i, run) in runs.iter().enumerate() {
            let expected = if i % 2 == 0 { "production" } else { "test" };
            assert_eq!(run.tags, vec![expected.to_string()]);
        }
    }

    #[test]
    fn test_prepend_inserts_at_front() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_a", "2024-01-01 10:00"));
        store.prepend(sample_run("run_b", "2024-01-02 10:00"));
        assert_eq!(store.runs()[0].id, "run_b");
        assert_eq!(store.runs()[1].id, "run_a");
    }

    #[test]
    fn test_prepend_remints_colliding_id() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_dup", "2024-01-01 10:00"));
        let stored = store.prepend(sample_run("run_dup", "2024-01-02 10:00"));
        assert_ne!(stored, "run_dup");
        assert_eq!(store.len(), 2);
        let ids: HashSet<&str> = store.runs().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_mutations_on_unknown_run_are_silent_noops() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_a", "2024-01-01 10:00"));

        assert!(!store.set_thumb("run_missing", FeedbackThumb::Up));
        assert!(!store.set_rating("run_missing", 4));
        assert!(!store.set_comment("run_missing", "great"));
        assert!(!store.add_tag("run_missing", "x"));
        assert!(!store.remove_tag("run_missing", "x"));
        // The collection itself is untouched
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("run_a").unwrap().rating, 0);
    }

    #[test]
    fn test_set_thumb_and_comment() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_a", "2024-01-01 10:00"));

        assert!(store.set_thumb("run_a", FeedbackThumb::Up));
        assert!(store.set_comment("run_a", "solid answer"));

        let run = store.get("run_a").unwrap();
        assert_eq!(run.feedback_thumb, FeedbackThumb::Up);
        assert_eq!(run.feedback_comment, "solid answer");
    }

    #[test]
    fn test_set_rating_clamps_to_bounds() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_a", "2024-01-01 10:00"));

        assert!(store.set_rating("run_a", 9));
        assert_eq!(store.get("run_a").unwrap().rating, MAX_RATING);

        assert!(store.set_rating("run_a", 0));
        assert_eq!(store.get("run_a").unwrap().rating, 0);
    }

    #[test]
    fn test_add_tag_rejects_blank_and_duplicate() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_a", "2024-01-01 10:00"));

        assert!(store.add_tag("run_a", "reviewed"));
        assert!(!store.add_tag("run_a", "reviewed"));
        assert!(!store.add_tag("run_a", "   "));

        let tags = &store.get("run_a").unwrap().tags;
        assert_eq!(
            tags.iter().filter(|t| t.as_str() == "reviewed").count(),
            1
        );
    }

    #[test]
    fn test_remove_tag_absent_is_noop() {
        let mut store = RunStore::with_seed(1);
        store.prepend(sample_run("run_a", "2024-01-01 10:00"));

        assert!(store.remove_tag("run_a", "test"));
        assert!(!store.remove_tag("run_a", "test"));
        assert!(store.get("run_a").unwrap().tags.is_empty());
    }

    #[test]
    fn test_distinct_models_sorted_and_deduped() {
        let mut store = RunStore::with_seed(1);
        let mut a = sample_run("run_a", "2024-01-01 10:00");
        a.model = "gpt-4-turbo".to_string();
        let mut b = sample_run("run_b", "2024-01-01 11:00");
        b.model = "claude-3-opus".to_string();
        let mut c = sample_run("run_c", "2024-01-01 12:00");
        c.model = "gpt-4-turbo".to_string();
        store.prepend(a);
        store.prepend(b);
        store.prepend(c);

        assert_eq!(
            store.distinct_models(),
            vec!["claude-3-opus".to_string(), "gpt-4-turbo".to_string()]
        );
    }
}
