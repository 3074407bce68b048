//! Simulated chat playground
//!
//! Append-only message log with a simulated model round-trip. Submitting
//! a message appends the user turn immediately, suspends for a fixed
//! artificial delay, appends a canned echo reply, and then ingests the
//! whole session transcript into the run store. `send_message` takes
//! `&mut self`, so submissions cannot overlap: a second submission during
//! the delay waits its turn and replies land in submission order.

use crate::config::ChatConfig;
use crate::ingest::ingest_transcript;
use crate::store::RunStore;
use crate::types::{clock_time, ChatTurn};
use chrono::Utc;
use std::time::Duration;

/// Simulated model round-trip delay used by [`ChatSession::new`].
pub const DEFAULT_REPLY_DELAY_MS: u64 = 800;
/// Model name reported by [`ChatSession::new`].
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo-sim";

/// One simulated chat conversation feeding the run store.
pub struct ChatSession {
    messages: Vec<ChatTurn>,
    model: String,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_model(DEFAULT_CHAT_MODEL, DEFAULT_REPLY_DELAY_MS)
    }

    pub fn with_model(model: &str, reply_delay_ms: u64) -> Self {
        Self {
            messages: Vec::new(),
            model: model.to_string(),
            reply_delay: Duration::from_millis(reply_delay_ms),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::with_model(&config.model, config.reply_delay_ms)
    }

    /// The full message log, oldest-first.
    pub fn messages(&self) -> &[ChatTurn] {
        &self.messages
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit a message and complete one simulated exchange.
    ///
    /// Blank input is ignored. Otherwise the user turn is appended, the
    /// artificial delay elapses (the one suspension point; no timeout, no
    /// cancellation), the canned reply is appended, and the cumulative
    /// transcript is ingested as a new run. Returns the ingested run id.
    pub async fn send_message(&mut self, store: &mut RunStore, content: &str) -> Option<String> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        self.messages
            .push(ChatTurn::user(content, clock_time(Utc::now())));
        tracing::debug!(turns = self.messages.len(), "User message appended");

        tokio::time::sleep(self.reply_delay).await;

        let reply = format!(
            "You said: \"{}\". This is a canned reply from the simulated model.",
            content
        );
        self.messages
            .push(ChatTurn::assistant(reply, clock_time(Utc::now())));

        ingest_transcript(store, &self.messages, &self.model)
    }

    /// Empty the message log. The store keeps any runs already ingested.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::CHAT_TAG;
    use crate::types::ChatRole;

    #[test]
    fn test_from_config_uses_configured_model_and_delay() {
        let config = ChatConfig {
            model: "claude-3-opus-sim".to_string(),
            reply_delay_ms: 5,
        };
        let session = ChatSession::from_config(&config);
        assert_eq!(session.model(), "claude-3-opus-sim");
        assert_eq!(session.reply_delay, Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let mut store = RunStore::with_seed(1);
        let mut session = ChatSession::with_model("m", 0);

        assert_eq!(session.send_message(&mut store, "   ").await, None);
        assert!(session.messages().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_exchange_appends_both_turns_and_ingests() {
        let mut store = RunStore::with_seed(1);
        let mut session = ChatSession::with_model("m", 0);

        let id = session
            .send_message(&mut store, "hello model")
            .await
            .expect("exchange should ingest a run");

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert_eq!(session.messages()[0].content, "hello model");
        assert_eq!(session.messages()[1].role, ChatRole::Assistant);

        let run = store.get(&id).expect("ingested run");
        assert_eq!(run.input_text, "hello model");
        assert_eq!(run.tags, vec![CHAT_TAG.to_string()]);
        assert_eq!(run.model, "m");
    }

    #[tokio::test]
    async fn test_second_exchange_ingests_cumulative_transcript() {
        let mut store = RunStore::with_seed(1);
        let mut session = ChatSession::with_model("m", 0);

        session.send_message(&mut store, "first").await;
        let id = session
            .send_message(&mut store, "second")
            .await
            .expect("second exchange should ingest");

        assert_eq!(session.messages().len(), 4);
        let run = store.get(&id).expect("second run");
        // Input is still the first turn of the whole session
        assert_eq!(run.input_text, "first");
        assert_eq!(run.transcript.len(), 4);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_delay_elapses_without_wall_clock_time() {
        let mut store = RunStore::with_seed(1);
        let mut session = ChatSession::new();

        // Paused clock: the 800ms artificial delay auto-advances
        let id = session.send_message(&mut store, "hi").await;
        assert!(id.is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_replies_land_in_submission_order() {
        let mut store = RunStore::with_seed(1);
        let mut session = ChatSession::with_model("m", 1);

        session.send_message(&mut store, "one").await;
        session.send_message(&mut store, "two").await;

        let contents: Vec<&str> = session
            .messages()
            .iter()
            .filter(|t| t.role == ChatRole::User)
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "two"]);
        // Each user turn is directly followed by its reply
        assert_eq!(session.messages()[1].role, ChatRole::Assistant);
        assert_eq!(session.messages()[3].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_clear_empties_log_but_keeps_runs() {
        let mut store = RunStore::with_seed(1);
        let mut session = ChatSession::with_model("m", 0);

        session.send_message(&mut store, "hello").await;
        session.clear();

        assert!(session.messages().is_empty());
        assert_eq!(store.len(), 1);
    }
}
