use chrono::NaiveDate;
use epidash_core::{EntitySeries, Metric, TimeSeriesPoint, daily_deltas, derived_points, rolling_mean};
use proptest::prelude::*;

fn d0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
}

fn cumulative_series(values: &[u64]) -> EntitySeries {
    EntitySeries::new(
        "prop",
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(d0() + chrono::Days::new(i as u64), v, v / 10)),
    )
}

proptest! {
    #[test]
    fn deltas_are_never_negative(values in proptest::collection::vec(0u64..1_000_000, 0..200)) {
        // Inputs include downward revisions; the clamp must absorb them all.
        let s = cumulative_series(&values);
        let deltas = daily_deltas(&s, Metric::Cases);
        prop_assert_eq!(deltas.len(), s.len());
        if let Some(first) = deltas.first() {
            prop_assert_eq!(first.value, 0);
        }
        for (i, p) in deltas.iter().enumerate().skip(1) {
            let prev = s.points[i - 1].cumulative_cases;
            let cur = s.points[i].cumulative_cases;
            prop_assert_eq!(p.value, cur.saturating_sub(prev));
        }
    }

    #[test]
    fn rolling_mean_window_one_is_identity(values in proptest::collection::vec(0u64..1_000_000, 0..200)) {
        let out = rolling_mean(&values, 1);
        let expected: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn rolling_mean_matches_naive_windowed_mean(
        values in proptest::collection::vec(0u64..100_000, 0..120),
        window in 1usize..20,
    ) {
        let fast = rolling_mean(&values, window);
        for (i, got) in fast.iter().enumerate() {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            let naive = slice.iter().map(|&v| v as f64).sum::<f64>() / slice.len() as f64;
            prop_assert!((got - naive).abs() < 1e-6);
        }
    }
}

#[test]
fn downward_revision_clamps_to_zero() {
    let s = cumulative_series(&[10, 20, 15, 30]);
    let deltas: Vec<u64> = daily_deltas(&s, Metric::Cases).iter().map(|p| p.value).collect();
    assert_eq!(deltas, vec![0, 10, 0, 15]);
}

#[test]
fn shrinking_window_averages_over_available_prefix() {
    let out = rolling_mean(&[6, 0, 3], 3);
    assert_eq!(out, vec![6.0, 3.0, 3.0]);
}

#[test]
fn derived_points_zip_both_metrics() {
    let s = EntitySeries::new(
        "France",
        [
            TimeSeriesPoint::new(d0(), 100, 10),
            TimeSeriesPoint::new(d0() + chrono::Days::new(1), 130, 12),
            TimeSeriesPoint::new(d0() + chrono::Days::new(2), 150, 11),
        ],
    );
    let rows = derived_points(&s, 2);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].new_cases, 0);
    assert_eq!(rows[0].new_deaths, 0);
    assert_eq!(rows[1].new_cases, 30);
    assert_eq!(rows[1].new_deaths, 2);
    // Deaths dipped from 12 to 11 -> clamped to zero.
    assert_eq!(rows[2].new_cases, 20);
    assert_eq!(rows[2].new_deaths, 0);

    assert!((rows[1].avg_new_cases - 15.0).abs() < f64::EPSILON);
    assert!((rows[2].avg_new_cases - 25.0).abs() < f64::EPSILON);
    assert!((rows[2].avg_new_deaths - 1.0).abs() < f64::EPSILON);
}

#[test]
fn empty_series_derives_empty_outputs() {
    let s = EntitySeries::empty("Nowhere");
    assert!(daily_deltas(&s, Metric::Cases).is_empty());
    assert!(derived_points(&s, 7).is_empty());
    assert!(rolling_mean(&[], 7).is_empty());
}
