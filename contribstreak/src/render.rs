//! Text rendering of a heatmap grid.

use contribstreak_core::analytics::{HeatmapGrid, BUCKET_COUNT};

/// Shade per bucket, lightest first.
const GLYPHS: [char; BUCKET_COUNT as usize] = ['·', '░', '▒', '▓', '█'];

/// Shown for positions outside the visible range.
const BLANK: char = ' ';

/// Row labels, Sunday first. Only alternate weekdays are named.
const ROW_LABELS: [&str; 7] = ["   ", "Mon", "   ", "Wed", "   ", "Fri", "   "];

/// Width of the row-label gutter, including the separating space.
const GUTTER: usize = 4;

/// Glyph for a bucket (out-of-range buckets clamp to the darkest).
pub fn glyph(bucket: u8) -> char {
    GLYPHS[usize::from(bucket).min(GLYPHS.len() - 1)]
}

/// Month header, seven weekday rows, and a legend.
///
/// Each week column is one character wide.
pub fn heatmap_lines(grid: &HeatmapGrid) -> Vec<String> {
    let mut lines = Vec::with_capacity(9);
    lines.push(month_header(grid));

    for (row, label) in ROW_LABELS.iter().enumerate() {
        let mut line = format!("{label} ");
        line.extend(grid.weeks.iter().map(|week| {
            let cell = &week[row];
            if cell.is_in_range() {
                glyph(cell.bucket)
            } else {
                BLANK
            }
        }));
        lines.push(line.trim_end().to_string());
    }

    lines.push(legend());
    lines
}

/// Month names placed above their anchor columns; a name that would run into
/// the previous one is dropped.
fn month_header(grid: &HeatmapGrid) -> String {
    let mut header: Vec<char> = vec![' '; GUTTER + grid.weeks.len()];
    let mut next_free = 0;

    for label in (0..grid.weeks.len()).filter_map(|column| grid.label_at(column)) {
        let at = GUTTER + label.column;
        if at < next_free {
            continue;
        }
        for (i, ch) in label.name.chars().enumerate() {
            if at + i < header.len() {
                header[at + i] = ch;
            } else {
                header.push(ch);
            }
        }
        next_free = at + label.name.len() + 1;
    }

    header.into_iter().collect::<String>().trim_end().to_string()
}

fn legend() -> String {
    let shades: Vec<String> = GLYPHS.iter().map(|g| g.to_string()).collect();
    format!("{}Less {} More", " ".repeat(GUTTER), shades.join(" "))
}
