use chrono::Days;

use crate::types::{AnalysisWindow, EntitySeries};

/// Lookback applied when a view supplies no explicit analysis window.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// Restrict a series to the points inside `window` (inclusive per side).
///
/// - Both bounds unset: returns the series unchanged.
/// - `start > end`: a valid degenerate window; the result is empty, no error.
///
/// The input is never mutated; the result is a new series.
#[must_use]
pub fn clip(series: &EntitySeries, window: &AnalysisWindow) -> EntitySeries {
    if window.is_unbounded() {
        return series.clone();
    }
    EntitySeries {
        entity_id: series.entity_id.clone(),
        points: series
            .points
            .iter()
            .filter(|p| window.contains(p.date))
            .copied()
            .collect(),
    }
}

/// Compute the default analysis window for a series: the most recent
/// `lookback_days` days, clamped so the start never precedes the series'
/// earliest available date.
///
/// An empty series resolves to the unbounded window.
#[must_use]
pub fn default_window(series: &EntitySeries, lookback_days: u32) -> AnalysisWindow {
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return AnalysisWindow::UNBOUNDED;
    };
    let start = last
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .map_or(first, |s| s.max(first));
    AnalysisWindow::between(start, last)
}
