//! Current and longest contribution streaks.
//!
//! A streak is a run of consecutive active days. The current streak ends at
//! `today`, or at yesterday when nothing has been recorded today yet; the
//! reference day is always passed in so results never depend on the clock.

use serde::Serialize;

use crate::types::{CalendarDay, DailyContributionTable};

/// Streak statistics over a canonical table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    /// Consecutive active days ending today (or yesterday)
    pub current_streak: u32,
    /// Longest run of consecutive active days in the table
    pub longest_streak: u32,
    /// Sum of all counts in the table
    pub total_contributions: u64,
    /// Number of days with at least one contribution
    pub active_days: u32,
    /// First day of the longest streak (earliest one on ties)
    pub longest_streak_start: Option<CalendarDay>,
    /// Last day of the longest streak
    pub longest_streak_end: Option<CalendarDay>,
}

/// A run of consecutive active days.
#[derive(Debug, Clone, Copy)]
struct Run {
    start: CalendarDay,
    end: CalendarDay,
    len: u32,
}

/// Compute streaks for `table` as seen on `today`.
pub fn compute_streaks(table: &DailyContributionTable, today: CalendarDay) -> StreakResult {
    let longest = longest_run(table);

    StreakResult {
        current_streak: current_streak(table, today),
        longest_streak: longest.map_or(0, |run| run.len),
        total_contributions: table.total(),
        active_days: u32::try_from(table.active_days().count()).unwrap_or(u32::MAX),
        longest_streak_start: longest.map(|run| run.start),
        longest_streak_end: longest.map(|run| run.end),
    }
}

/// Walk back from today (or yesterday if today is still empty) counting
/// active days until the first inactive one.
fn current_streak(table: &DailyContributionTable, today: CalendarDay) -> u32 {
    let mut cursor = if table.is_active(today) {
        Some(today)
    } else {
        today.pred()
    };

    let mut streak = 0u32;
    while let Some(day) = cursor {
        if !table.is_active(day) {
            break;
        }
        streak += 1;
        cursor = day.pred();
    }
    streak
}

/// Single ascending scan over active days; a gap starts a fresh run of 1.
fn longest_run(table: &DailyContributionTable) -> Option<Run> {
    let mut best: Option<Run> = None;
    let mut run: Option<Run> = None;

    for day in table.active_days() {
        let next = match run {
            Some(prev) if day.days_since(prev.end) == 1 => Run {
                end: day,
                len: prev.len + 1,
                ..prev
            },
            _ => Run {
                start: day,
                end: day,
                len: 1,
            },
        };

        if best.map_or(true, |b| next.len > b.len) {
            best = Some(next);
        }
        run = Some(next);
    }

    best
}

/// Presentation tier for a current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTier {
    /// 30 days or more
    OnFire,
    /// 7 days or more
    Charged,
    /// At least one day
    Sparked,
    /// No current streak
    Dormant,
}

impl StreakTier {
    /// Classify a current streak length.
    pub fn for_streak(days: u32) -> Self {
        match days {
            30.. => StreakTier::OnFire,
            7..=29 => StreakTier::Charged,
            1..=6 => StreakTier::Sparked,
            0 => StreakTier::Dormant,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StreakTier::OnFire => "🔥",
            StreakTier::Charged => "⚡",
            StreakTier::Sparked => "✨",
            StreakTier::Dormant => "💤",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreakTier::OnFire => "on fire",
            StreakTier::Charged => "charged",
            StreakTier::Sparked => "sparked",
            StreakTier::Dormant => "dormant",
        }
    }
}
