//! Sort, dedupe and sanity-check a raw series.

use tracing::warn;

use crate::domain::PricePoint;

/// Output of [`canonicalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Canonicalized {
    /// Ascending by date, one point per date.
    pub points: Vec<PricePoint>,
    /// Points dropped because an earlier row had the same date.
    pub duplicates_dropped: usize,
    /// Kept points that fail [`PricePoint::is_sane`].
    pub insane_rows: usize,
}

/// Stable-sort by date, keep the first row for each date, count insane rows.
///
/// Insane rows are kept: the engines only read closes, and dropping a day
/// would shift every window.
pub fn canonicalize(mut points: Vec<PricePoint>) -> Canonicalized {
    points.sort_by_key(|p| p.date);

    let before = points.len();
    points.dedup_by_key(|p| p.date);
    let duplicates_dropped = before - points.len();
    if duplicates_dropped > 0 {
        warn!(duplicates_dropped, "dropped rows with duplicate dates");
    }

    let insane_rows = points.iter().filter(|p| !p.is_sane()).count();
    if insane_rows > 0 {
        warn!(insane_rows, "series contains rows failing OHLC sanity checks");
    }

    Canonicalized {
        points,
        duplicates_dropped,
        insane_rows,
    }
}
