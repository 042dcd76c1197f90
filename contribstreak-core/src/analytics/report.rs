//! Report - one merged view of several accounts
//!
//! Runs aggregation, streaks and the heatmap for a single request and bundles
//! the results for presentation.

use serde::Serialize;

use super::{aggregate, build_heatmap, compute_streaks, HeatmapGrid, StreakResult};
use crate::types::{CalendarDay, SourceSeries};

/// Per-account contribution summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Account name
    pub account: String,
    /// Sum of this account's counts
    pub total: u64,
    /// True when this account's series could not be fetched
    pub degraded: bool,
}

/// Streaks and heatmap for the merged accounts.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionReport {
    /// Year shown by the heatmap
    pub year: i32,
    /// Reference day for streaks and clipping
    pub today: CalendarDay,
    /// Accounts that fed the report, in input order
    pub accounts: Vec<AccountSummary>,
    /// Streaks over the whole merged table
    pub streaks: StreakResult,
    /// Heatmap for `year`
    pub heatmap: HeatmapGrid,
    /// Contributions within the visible part of `year`
    pub year_total: u64,
}

impl ContributionReport {
    /// True when no account recorded any contribution.
    pub fn is_empty(&self) -> bool {
        self.streaks.total_contributions == 0
    }

    /// Accounts whose series were replaced by empty ones.
    pub fn degraded_accounts(&self) -> impl Iterator<Item = &str> + '_ {
        self.accounts
            .iter()
            .filter(|a| a.degraded)
            .map(|a| a.account.as_str())
    }

    /// Account names joined for headings, e.g. "alice + alice-work".
    pub fn accounts_display(&self) -> String {
        self.accounts
            .iter()
            .map(|a| a.account.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Build a report for `year` (default: `today`'s year).
pub fn generate_report(
    series: &[SourceSeries],
    year: Option<i32>,
    today: CalendarDay,
) -> ContributionReport {
    let year = year.unwrap_or_else(|| today.year());

    let merged = aggregate(series.iter().map(|s| &s.table));
    let streaks = compute_streaks(&merged, today);
    let heatmap = build_heatmap(&merged, year, today);
    let year_total = heatmap.total;

    let accounts = series
        .iter()
        .map(|s| AccountSummary {
            account: s.account.clone(),
            total: s.table.total(),
            degraded: s.degraded,
        })
        .collect();

    tracing::info!(
        year,
        today = %today,
        accounts = series.len(),
        merged_days = merged.len(),
        current_streak = streaks.current_streak,
        longest_streak = streaks.longest_streak,
        year_total,
        "Generated contribution report"
    );

    ContributionReport {
        year,
        today,
        accounts,
        streaks,
        heatmap,
        year_total,
    }
}

/// Compact count for display (e.g., "1.2k", "3.4M").
///
/// Counts that would round up to "1000.0k" are shown in millions.
pub fn count_display(n: u64) -> String {
    if n >= 999_950 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DailyContributionTable;

    fn day(s: &str) -> CalendarDay {
        CalendarDay::parse(s).unwrap()
    }

    fn series(account: &str, entries: &[(&str, u64)]) -> SourceSeries {
        SourceSeries::new(
            account,
            DailyContributionTable::from_entries(entries.iter().copied()),
        )
    }

    #[test]
    fn test_report_merges_accounts() {
        let all = vec![
            series("alice", &[("2024-03-08", 1), ("2024-03-09", 2)]),
            series("alice-work", &[("2024-03-09", 3), ("2024-03-10", 1)]),
            SourceSeries::degraded("alice-old"),
        ];

        let report = generate_report(&all, None, day("2024-03-10"));

        assert_eq!(report.year, 2024);
        assert_eq!(report.streaks.current_streak, 3);
        assert_eq!(report.streaks.total_contributions, 7);
        assert_eq!(report.year_total, 7);
        assert_eq!(report.heatmap.max_count, 5);
        assert_eq!(report.accounts.len(), 3);
        assert_eq!(report.accounts[1].total, 4);
        assert_eq!(report.degraded_accounts().collect::<Vec<_>>(), vec!["alice-old"]);
        assert_eq!(report.accounts_display(), "alice + alice-work + alice-old");
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_for_other_year_keeps_streaks_global() {
        let all = vec![series("bob", &[("2023-06-01", 4), ("2024-01-01", 1)])];

        let report = generate_report(&all, Some(2023), day("2024-01-01"));

        assert_eq!(report.year, 2023);
        assert_eq!(report.year_total, 4);
        assert_eq!(report.streaks.total_contributions, 5);
        assert_eq!(report.streaks.current_streak, 1);
    }

    #[test]
    fn test_report_without_series() {
        let report = generate_report(&[], None, day("2024-07-04"));
        assert!(report.is_empty());
        assert!(report.accounts.is_empty());
        assert_eq!(report.heatmap.days().count(), 186);
    }

    #[test]
    fn test_count_display() {
        assert_eq!(count_display(999), "999");
        assert_eq!(count_display(1_234), "1.2k");
        assert_eq!(count_display(3_400_000), "3.4M");
        assert_eq!(count_display(999_949), "999.9k");
        assert_eq!(count_display(999_950), "1.0M");
        assert_eq!(count_display(999_999), "1.0M");
    }
}
