//! Series loaded from JSON files
//!
//! Two shapes are accepted:
//! - a flat object keyed by date: `{"2024-01-01": 3, "2024-01-02": 0}`
//! - a saved contributions API response: `{"contributions": [{"date": ..., "count": ...}]}`

use std::path::Path;

use serde::Deserialize;

use super::client::{ContributionDay, ContributionsResponse};
use crate::error::Result;
use crate::types::{DailyContributionTable, SourceSeries};

/// Accepted file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesFile {
    Flat(DailyContributionTable),
    Api { contributions: Vec<ContributionDay> },
}

/// Load a table from a JSON file.
///
/// Keys that are not dates are dropped, but every value must be a
/// non-negative integer: any other value rejects the whole file with
/// [`Error::Json`](crate::error::Error::Json).
pub fn load_series_file(path: &Path) -> Result<DailyContributionTable> {
    let content = std::fs::read_to_string(path)?;
    let table = match serde_json::from_str::<SeriesFile>(&content)? {
        SeriesFile::Flat(table) => table,
        SeriesFile::Api { contributions } => ContributionsResponse { contributions }.into_table(),
    };

    tracing::debug!(path = %path.display(), days = table.len(), "Loaded series file");
    Ok(table)
}

/// Load a series named after the file stem (`alice.json` -> `alice`).
pub fn load_series(path: &Path) -> Result<SourceSeries> {
    let account = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SourceSeries::new(account, load_series_file(path)?))
}
