//! Calendar heatmap layout for one year.
//!
//! The grid is a sequence of week columns, each holding seven cells with
//! row 0 = Sunday through row 6 = Saturday. The first column starts on the
//! Sunday on or before January 1; in the current year the grid stops at
//! `today`. Cells outside the visible range carry no date and never affect
//! counts or bucketing.

use serde::Serialize;

use crate::types::{CalendarDay, DailyContributionTable};

/// Number of intensity levels (bucket 0 through 4).
pub const BUCKET_COUNT: u8 = 5;

/// Three-letter month names, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// The day shown here; `None` marks an out-of-range position
    pub date: Option<CalendarDay>,
    /// Contribution count (zero for out-of-range cells)
    pub count: u64,
    /// Intensity level 0-4
    pub bucket: u8,
}

impl HeatmapCell {
    const OUT_OF_RANGE: HeatmapCell = HeatmapCell {
        date: None,
        count: 0,
        bucket: 0,
    };

    pub fn is_in_range(&self) -> bool {
        self.date.is_some()
    }
}

/// Month name anchored to a week column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// Column index into [`HeatmapGrid::weeks`]
    pub column: usize,
    /// Month, 1-12
    pub month: u32,
    /// Three-letter month name
    pub name: &'static str,
}

/// Days covered by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapRange {
    /// Sunday on or before January 1 (row 0 of the first column)
    pub grid_start: CalendarDay,
    /// January 1
    pub first_day: CalendarDay,
    /// December 31, or today in the current year
    pub last_day: CalendarDay,
}

/// Week-column calendar grid for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapGrid {
    /// Requested year
    pub year: i32,
    /// Visible range; `None` when the year is outside the supported calendar
    pub range: Option<HeatmapRange>,
    /// Week columns, each Sunday through Saturday
    pub weeks: Vec<[HeatmapCell; 7]>,
    /// Month labels in column order
    pub month_labels: Vec<MonthLabel>,
    /// Bucketing denominator: largest in-range count, at least 1
    pub max_count: u64,
    /// Sum of in-range counts
    pub total: u64,
    /// In-range days with at least one contribution
    pub active_days: u32,
}

impl HeatmapGrid {
    fn empty(year: i32) -> Self {
        Self {
            year,
            range: None,
            weeks: Vec::new(),
            month_labels: Vec::new(),
            max_count: 1,
            total: 0,
            active_days: 0,
        }
    }

    /// In-range cells in chronological order.
    pub fn days(&self) -> impl Iterator<Item = &HeatmapCell> + '_ {
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .filter(|cell| cell.is_in_range())
    }

    /// Label anchored at `column`, if any.
    pub fn label_at(&self, column: usize) -> Option<&MonthLabel> {
        self.month_labels.iter().find(|label| label.column == column)
    }
}

/// Lay out `year` from `table`, clipping at `today` in the current year.
pub fn build_heatmap(table: &DailyContributionTable, year: i32, today: CalendarDay) -> HeatmapGrid {
    let Some(range) = visible_range(year, today) else {
        tracing::debug!(year, "Year outside supported calendar, returning empty heatmap");
        return HeatmapGrid::empty(year);
    };

    let max_count = table
        .max_count_between(range.first_day, range.last_day)
        .max(1);
    let total = table.total_between(range.first_day, range.last_day);

    // Inclusive day count from the aligned Sunday, rounded up to whole weeks
    let span = range.last_day.days_since(range.grid_start);
    let week_count = usize::try_from(span / 7 + 1).unwrap_or(0);

    let mut weeks = Vec::with_capacity(week_count);
    let mut month_labels = Vec::new();
    let mut last_labeled: Option<u32> = None;
    let mut active_days = 0u32;

    for column in 0..week_count {
        let mut week = [HeatmapCell::OUT_OF_RANGE; 7];

        for (row, cell) in week.iter_mut().enumerate() {
            let offset = (column * 7 + row) as i64;
            let Some(date) = range.grid_start.add_days(offset) else {
                continue;
            };
            if date < range.first_day || date > range.last_day {
                continue;
            }

            let count = table.get(date);
            *cell = HeatmapCell {
                date: Some(date),
                count,
                bucket: color_bucket(count, max_count),
            };
            if count > 0 {
                active_days += 1;
            }

            if row == 0 && last_labeled != Some(date.month()) {
                last_labeled = Some(date.month());
                month_labels.push(MonthLabel {
                    column,
                    month: date.month(),
                    name: MONTH_ABBREVIATIONS[(date.month() - 1) as usize],
                });
            }
        }

        weeks.push(week);
    }

    HeatmapGrid {
        year,
        range: Some(range),
        weeks,
        month_labels,
        max_count,
        total,
        active_days,
    }
}

/// January 1 through December 31, ending at `today` in the current year.
fn visible_range(year: i32, today: CalendarDay) -> Option<HeatmapRange> {
    let first_day = CalendarDay::first_of_year(year)?;
    let december_31 = CalendarDay::last_of_year(year)?;
    let last_day = if today.year() == year {
        today.min(december_31)
    } else {
        december_31
    };

    Some(HeatmapRange {
        grid_start: first_day.week_start()?,
        first_day,
        last_day,
    })
}

/// Quantize `count` against `max` into 0-4.
///
/// Zero maps to 0; otherwise `count / max` selects 1 (<= 25%), 2 (<= 50%),
/// 3 (<= 75%) or 4. Comparisons are exact integer arithmetic, so a count
/// sitting on a threshold lands in the lower bucket.
pub fn color_bucket(count: u64, max: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let count = u128::from(count);
    let max = u128::from(max.max(1));

    if count * 4 <= max {
        1
    } else if count * 2 <= max {
        2
    } else if count * 4 <= max * 3 {
        3
    } else {
        4
    }
}
