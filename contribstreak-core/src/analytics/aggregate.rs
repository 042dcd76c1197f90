//! Merging per-account series into one canonical table.

use crate::types::DailyContributionTable;

/// Merge any number of tables by summing counts per day.
///
/// Days present in a single table pass through unchanged. Empty tables
/// contribute nothing, and no tables at all yields an empty table.
pub fn aggregate<'a, I>(tables: I) -> DailyContributionTable
where
    I: IntoIterator<Item = &'a DailyContributionTable>,
{
    tables
        .into_iter()
        .fold(DailyContributionTable::new(), |merged, table| {
            merge(merged, table)
        })
}

/// Fold step: `acc` plus every entry of `table`.
fn merge(mut acc: DailyContributionTable, table: &DailyContributionTable) -> DailyContributionTable {
    for (day, count) in table.iter() {
        acc.add(day, count);
    }
    acc
}
