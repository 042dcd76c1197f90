//! # contribstreak-core
//!
//! Core library for contribstreak - merged contribution streaks and a yearly
//! calendar heatmap across several accounts on a code-hosting platform.
//!
//! This library provides:
//! - Domain types for calendar days and daily contribution tables
//! - Aggregation, streak and heatmap analytics
//! - Contribution sources (HTTP API and JSON files)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way:
//! - **Sources:** one daily table per account, fetched or loaded from disk
//! - **Aggregation:** tables merged into one canonical table
//! - **Derivation:** streaks and heatmap computed from the canonical table
//!
//! Derivations are pure and take `today` explicitly.
//!
//! ## Example
//!
//! ```rust
//! use contribstreak_core::analytics::generate_report;
//! use contribstreak_core::{CalendarDay, DailyContributionTable, SourceSeries};
//!
//! let alice = DailyContributionTable::from_entries([("2024-03-09", 2), ("2024-03-10", 1)]);
//! let work = DailyContributionTable::from_entries([("2024-03-08", 4)]);
//! let series = vec![SourceSeries::new("alice", alice), SourceSeries::new("alice-work", work)];
//!
//! let today = CalendarDay::from_ymd(2024, 3, 10).unwrap();
//! let report = generate_report(&series, None, today);
//! assert_eq!(report.streaks.current_streak, 3);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod types;
