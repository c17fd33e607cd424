use crate::types::EntitySeries;

/// Reduce a series to a bounded number of points for rendering.
///
/// - `len <= max_points` returns the series unchanged.
/// - Otherwise keeps every point at index `i` with `i % step == 0`, where
///   `step = ceil(len / max_points)`, and always force-includes the final
///   point even when the stride missed it: the most recent value is the one
///   a dashboard cannot afford to drop. Output length is therefore at most
///   `max_points + 1`.
/// - `max_points == 0` is treated as "no bound" and returns the input
///   unchanged.
#[must_use]
pub fn downsample(series: &EntitySeries, max_points: usize) -> EntitySeries {
    let len = series.points.len();
    if max_points == 0 || len <= max_points {
        return series.clone();
    }

    let step = len.div_ceil(max_points);
    let mut points: Vec<_> = series
        .points
        .iter()
        .step_by(step)
        .copied()
        .collect();

    let last = len - 1;
    if last % step != 0 {
        points.push(series.points[last]);
    }

    EntitySeries {
        entity_id: series.entity_id.clone(),
        points,
    }
}
