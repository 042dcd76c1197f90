//! Core domain types for contribstreak
//!
//! These types carry per-day contribution counts from the sources into the
//! analytics layer.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **CalendarDay** | A local calendar date with no time-of-day component |
//! | **Active day** | A day whose contribution count is greater than zero |
//! | **Series** | The daily counts of one tracked account |
//! | **Canonical table** | The merged daily counts of all accounts |
//!
//! All arithmetic on days goes through [`CalendarDay`], which steps whole
//! calendar days and is unaffected by timezones or daylight saving.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================
// CalendarDay
// ============================================

/// A calendar date (year, month, day) in the observer's local calendar.
///
/// Serializes as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Build a day from its parts. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse an ISO `YYYY-MM-DD` key. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .map(Self)
    }

    /// The current day in the local timezone.
    ///
    /// Only entry points call this; analytics take `today` as a parameter.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// January 1 of `year`.
    pub fn first_of_year(year: i32) -> Option<Self> {
        Self::from_ymd(year, 1, 1)
    }

    /// December 31 of `year`.
    pub fn last_of_year(year: i32) -> Option<Self> {
        Self::from_ymd(year, 12, 31)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of week with 0=Sunday .. 6=Saturday.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// The following day.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The preceding day.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Move by `days` calendar days (negative moves backwards).
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let stepped = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        stepped.map(Self)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: CalendarDay) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }

    /// The Sunday on or before this day.
    pub fn week_start(&self) -> Option<Self> {
        self.add_days(-i64::from(self.weekday_from_sunday()))
    }

    /// Short display form, e.g. "Mar 05".
    pub fn short_display(&self) -> String {
        self.0.format("%b %d").to_string()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ============================================
// DailyContributionTable
// ============================================

/// Per-day contribution counts.
///
/// A day missing from the table counts as zero. Iteration is chronological.
/// On the wire this is a JSON object keyed by ISO date; keys that are not
/// valid dates are dropped when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct DailyContributionTable {
    counts: BTreeMap<CalendarDay, u64>,
}

impl DailyContributionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from ISO-date-keyed entries.
    ///
    /// Malformed keys are skipped. Keys that name the same day are summed.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (key, count) in entries {
            match CalendarDay::parse(key.as_ref()) {
                Some(day) => table.add(day, count),
                None => {
                    tracing::debug!(key = key.as_ref(), count, "Skipping malformed date key");
                }
            }
        }
        table
    }

    /// Add `count` to `day`, saturating at `u64::MAX`.
    pub(crate) fn add(&mut self, day: CalendarDay, count: u64) {
        let entry = self.counts.entry(day).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count for `day` (zero when absent).
    pub fn get(&self, day: CalendarDay) -> u64 {
        self.counts.get(&day).copied().unwrap_or(0)
    }

    /// Whether `day` has at least one contribution.
    pub fn is_active(&self, day: CalendarDay) -> bool {
        self.get(day) > 0
    }

    /// Entries in chronological order, including explicit zeros.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarDay, u64)> + '_ {
        self.counts.iter().map(|(day, count)| (*day, *count))
    }

    /// Active days in chronological order.
    pub fn active_days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(day, _)| day)
    }

    /// Number of entries (zero-count entries included).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// Sum of counts for days in `start..=end`.
    pub fn total_between(&self, start: CalendarDay, end: CalendarDay) -> u64 {
        if start > end {
            return 0;
        }
        self.counts
            .range(start..=end)
            .fold(0u64, |acc, (_, c)| acc.saturating_add(*c))
    }

    /// Largest single-day count for days in `start..=end` (zero when none).
    pub fn max_count_between(&self, start: CalendarDay, end: CalendarDay) -> u64 {
        if start > end {
            return 0;
        }
        self.counts
            .range(start..=end)
            .map(|(_, c)| *c)
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(CalendarDay, u64)> for DailyContributionTable {
    fn from_iter<T: IntoIterator<Item = (CalendarDay, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (day, count) in iter {
            table.add(day, count);
        }
        table
    }
}

impl From<BTreeMap<String, u64>> for DailyContributionTable {
    fn from(raw: BTreeMap<String, u64>) -> Self {
        Self::from_entries(raw)
    }
}

impl From<DailyContributionTable> for BTreeMap<String, u64> {
    fn from(table: DailyContributionTable) -> Self {
        table
            .counts
            .into_iter()
            .map(|(day, count)| (day.to_string(), count))
            .collect()
    }
}

// ============================================
// SourceSeries
// ============================================

/// The daily counts of one tracked account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSeries {
    /// Account name on the code-hosting platform
    pub account: String,
    /// Daily counts for this account
    pub table: DailyContributionTable,
    /// True when the fetch failed and an empty table was substituted
    pub degraded: bool,
}

impl SourceSeries {
    pub fn new(account: impl Into<String>, table: DailyContributionTable) -> Self {
        Self {
            account: account.into(),
            table,
            degraded: false,
        }
    }

    /// Empty stand-in for an account whose series could not be obtained.
    pub fn degraded(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            table: DailyContributionTable::new(),
            degraded: true,
        }
    }
}
