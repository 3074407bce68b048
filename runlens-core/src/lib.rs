//! # runlens-core
//!
//! Core library for runlens - an evaluation playground for simulated
//! model runs.
//!
//! This library provides:
//! - Domain types for runs, transcripts, and reviewer feedback
//! - An in-memory run store with synthetic seeding and tolerant mutations
//! - Pure query and metrics projections feeding the dashboard view model
//! - Chat transcript ingestion and a stable JSON export
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The store is the single owner of the run collection; the presentation
//! layer forwards user intents as discrete commands and pulls derived
//! views (filtered list, headline metrics, chart series) after each
//! mutation. Derived views are pure recomputations over current state,
//! never cached.
//!
//! ## Example
//!
//! ```rust
//! use runlens_core::{Dashboard, RunStore};
//!
//! let mut store = RunStore::with_seed(42);
//! store.seed_synthetic(15);
//!
//! let dashboard = Dashboard::new(store);
//! let metrics = dashboard.metrics();
//! assert_eq!(metrics.total_runs, 15);
//! ```

// Re-export commonly used items at the crate root
pub use chat::ChatSession;
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use query::FilterCriteria;
pub use selection::ComparisonSelection;
pub use store::RunStore;
pub use types::*;

// Public modules
pub mod analytics;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod query;
pub mod selection;
pub mod store;
pub mod types;
