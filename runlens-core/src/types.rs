//! Core domain types for runlens
//!
//! These types model one recorded simulated-model invocation (a [`Run`])
//! together with the reviewer feedback attached to it, and the chat
//! transcript turns that runs can be built from.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Run** | One recorded simulated model invocation with metrics, transcript, and reviewer feedback |
//! | **Transcript** | Ordered turn-by-turn conversation log attached to a run |
//! | **Synthetic run** | A randomly generated placeholder run seeding the dashboard before real data exists |
//! | **Ingestion** | Conversion of a completed chat exchange into a stored Run |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used for run timestamps.
///
/// Fixed-width and zero-padded, so lexicographic order on the formatted
/// string equals chronological order. Sorting and daily grouping both rely
/// on this; changing the format requires switching those sites to true
/// chronological comparison.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a timestamp at minute precision for storage on a [`Run`].
pub fn minute_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Format a timestamp as a short `HH:MM` clock time for chat turns.
pub fn clock_time(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

/// Round a currency amount to a fixed number of decimal places.
pub fn round_currency(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ============================================
// Run Status
// ============================================

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    /// Case-insensitive: the original records carried free-form casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(RunStatus::Success),
            "error" => Ok(RunStatus::Error),
            _ => Err(format!("unknown run status: {}", s)),
        }
    }
}

// ============================================
// Reviewer Feedback
// ============================================

/// Thumb feedback left by a reviewer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackThumb {
    Up,
    Down,
    #[default]
    None,
}

impl FeedbackThumb {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackThumb::Up => "up",
            FeedbackThumb::Down => "down",
            FeedbackThumb::None => "none",
        }
    }
}

impl std::str::FromStr for FeedbackThumb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(FeedbackThumb::Up),
            "down" => Ok(FeedbackThumb::Down),
            "none" => Ok(FeedbackThumb::None),
            _ => Err(format!("unknown thumb value: {}", s)),
        }
    }
}

/// Maximum star rating a reviewer can assign. 0 means unrated.
pub const MAX_RATING: u8 = 5;

// ============================================
// Chat Transcript
// ============================================

/// Author of a chat transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One turn of a chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who authored the turn
    pub role: ChatRole,
    /// Text of the turn
    pub content: String,
    /// `HH:MM` clock time the turn was appended
    pub created_at: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            created_at: created_at.into(),
        }
    }

    pub fn assistant(content: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            created_at: created_at.into(),
        }
    }
}

// ============================================
// Run
// ============================================

/// One recorded simulated model invocation.
///
/// Owned exclusively by the run store; all mutation goes through store
/// entry points so the collection invariants (unique ids, duplicate-free
/// tags, rating bounds) hold at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Opaque unique identifier, immutable after creation
    pub id: String,
    /// Creation time at minute precision, `YYYY-MM-DD HH:MM`
    pub timestamp: String,
    /// Outcome of the invocation
    pub status: RunStatus,
    /// Wall-clock latency in milliseconds
    pub duration_ms: u64,
    /// Token count (estimated for chat-sourced runs)
    pub tokens: u64,
    /// Cost in currency units; display-rounded at creation
    pub cost: f64,
    /// Name of the simulated model
    pub model: String,
    /// First prompt shown in the run list
    pub input_text: String,
    /// Final response shown in the run list
    pub output_text: String,
    /// Ordered, duplicate-free labels
    pub tags: Vec<String>,
    /// Turn-by-turn conversation log; empty for synthetic runs
    #[serde(default)]
    pub transcript: Vec<ChatTurn>,
    /// Reviewer thumb feedback
    #[serde(default)]
    pub feedback_thumb: FeedbackThumb,
    /// Reviewer star rating, 0-5 (0 = unrated)
    #[serde(default)]
    pub rating: u8,
    /// Free-text reviewer comment
    #[serde(default)]
    pub feedback_comment: String,
}

impl Run {
    /// Date portion of the timestamp, used for daily grouping.
    pub fn date(&self) -> &str {
        self.timestamp
            .split(' ')
            .next()
            .unwrap_or(&self.timestamp)
    }

    /// Whether the run carries a chat transcript.
    ///
    /// Synthetic runs have none; the list view falls back to
    /// `input_text`/`output_text` for them.
    pub fn has_transcript(&self) -> bool {
        !self.transcript.is_empty()
    }
}
