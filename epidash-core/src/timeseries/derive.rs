use crate::types::{DailyPoint, DerivedPoint, EntitySeries, Metric};

/// Derive a daily new-count series from a cumulative series.
///
/// `value[0]` is 0; for `i > 0`, `value[i] = max(0, cum[i] - cum[i-1])`.
/// Downward revisions of the cumulative total clamp to zero rather than
/// produce negative counts — the correction is discarded, not redistributed.
#[must_use]
pub fn daily_deltas(series: &EntitySeries, metric: Metric) -> Vec<DailyPoint> {
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| DailyPoint {
            date: p.date,
            value: if i == 0 {
                0
            } else {
                metric
                    .value_of(p)
                    .saturating_sub(metric.value_of(&series.points[i - 1]))
            },
        })
        .collect()
}

/// Rolling mean with a shrinking window at the head of the series.
///
/// For index `i` the mean runs over `[max(0, i - window + 1), i]`: early
/// indices average over however many values exist instead of padding with
/// zeros or staying undefined. `window <= 1` is the identity on the input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_mean(values: &[u64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return values.iter().map(|&v| v as f64).collect();
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum: u128 = 0;
    for (i, &v) in values.iter().enumerate() {
        sum += u128::from(v);
        if i >= window {
            sum -= u128::from(values[i - window]);
        }
        let denom = (i + 1).min(window);
        out.push(sum as f64 / denom as f64);
    }
    out
}

/// Zip daily case/death deltas with their rolling means into render-ready
/// rows for a single-entity analytical view.
#[must_use]
pub fn derived_points(series: &EntitySeries, avg_window: usize) -> Vec<DerivedPoint> {
    let cases = daily_deltas(series, Metric::Cases);
    let deaths = daily_deltas(series, Metric::Deaths);

    let case_values: Vec<u64> = cases.iter().map(|p| p.value).collect();
    let death_values: Vec<u64> = deaths.iter().map(|p| p.value).collect();
    let avg_cases = rolling_mean(&case_values, avg_window);
    let avg_deaths = rolling_mean(&death_values, avg_window);

    cases
        .iter()
        .zip(&deaths)
        .zip(avg_cases.iter().zip(&avg_deaths))
        .map(|((c, d), (&ac, &ad))| DerivedPoint {
            date: c.date,
            new_cases: c.value,
            new_deaths: d.value,
            avg_new_cases: ac,
            avg_new_deaths: ad,
        })
        .collect()
}
