//! Analytics module for contribstreak
//!
//! Pure derivations over daily contribution counts:
//! - [`aggregate`]: merge per-account tables into the canonical table
//! - [`streak`]: current and longest streaks
//! - [`heatmap`]: week-column calendar grid for one year
//! - [`report`]: all of the above for one request
//!
//! Nothing here reads the clock or performs I/O; callers pass `today`.

pub mod aggregate;
pub mod heatmap;
pub mod report;
pub mod streak;

pub use aggregate::aggregate;
pub use heatmap::{
    build_heatmap, color_bucket, HeatmapCell, HeatmapGrid, HeatmapRange, MonthLabel,
    BUCKET_COUNT, MONTH_ABBREVIATIONS,
};
pub use report::{count_display, generate_report, AccountSummary, ContributionReport};
pub use streak::{compute_streaks, StreakResult, StreakTier};
