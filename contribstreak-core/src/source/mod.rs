//! Contribution sources
//!
//! Sources turn an account into a [`SourceSeries`](crate::types::SourceSeries):
//! - [`ContributionsClient`] fetches from the public contributions API
//! - [`load_series`] reads a JSON file, for offline and reproducible runs
//!
//! Network failures never abort a run. A failed account is replaced by an
//! empty series flagged as degraded, and the remaining accounts still merge.

mod client;
mod file;

pub use client::ContributionsClient;
pub use file::{load_series, load_series_file};
