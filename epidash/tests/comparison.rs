mod helpers;

use std::sync::Arc;

use epidash::{AnalysisWindow, Dashboard, EpidashError, Metric};
use epidash_mock::MockSource;
use helpers::{d, dashboard};

fn two_country_source() -> Arc<MockSource> {
    Arc::new(
        MockSource::builder()
            .with_rows(
                "A",
                &[("2020-03-01", 10, 1), ("2020-03-02", 20, 2), ("2020-03-03", 35, 4)],
            )
            .with_rows("B", &[("2020-03-02", 5, 0), ("2020-03-03", 15, 1)])
            .build(),
    )
}

#[tokio::test]
async fn aligns_on_the_union_axis_with_explicit_gaps() {
    let dash = dashboard(two_country_source());
    let report = dash
        .comparison_frame(&["A", "B"], Metric::Cases, None, None)
        .await
        .unwrap();

    assert!(report.failures.is_empty());
    let frame = &report.frame;
    assert_eq!(frame.dates(), &[d("2020-03-01"), d("2020-03-02"), d("2020-03-03")]);
    assert_eq!(frame.column("A").unwrap(), &[Some(10), Some(20), Some(35)]);
    assert_eq!(frame.column("B").unwrap(), &[None, Some(5), Some(15)]);
}

#[tokio::test]
async fn deaths_metric_selects_the_other_cumulative_field() {
    let dash = dashboard(two_country_source());
    let report = dash
        .comparison_frame(&["A", "B"], Metric::Deaths, None, None)
        .await
        .unwrap();
    assert_eq!(report.frame.column("A").unwrap(), &[Some(1), Some(2), Some(4)]);
    assert_eq!(report.frame.column("B").unwrap(), &[None, Some(0), Some(1)]);
}

#[tokio::test]
async fn one_failing_entity_does_not_discard_the_others() {
    let source = Arc::new(
        MockSource::builder()
            .with_rows("A", &[("2020-03-01", 10, 1), ("2020-03-02", 20, 2)])
            .with_rows("FAIL", &[("2020-03-01", 1, 0)])
            .will_fail("FAIL")
            .build(),
    );
    let dash = dashboard(Arc::clone(&source));

    let report = dash
        .comparison_frame(&["A", "FAIL"], Metric::Cases, None, None)
        .await
        .unwrap();

    assert_eq!(report.frame.entities().collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(report.frame.column("A").unwrap(), &[Some(10), Some(20)]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0], EpidashError::Source { .. }));
}

#[tokio::test]
async fn unknown_entities_are_reported_not_fatal() {
    let dash = dashboard(two_country_source());
    let report = dash
        .comparison_frame(&["A", "Atlantis"], Metric::Cases, None, None)
        .await
        .unwrap();
    assert_eq!(report.frame.entities().collect::<Vec<_>>(), vec!["A"]);
    assert!(matches!(report.failures[0], EpidashError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_ids_collapse_to_one_fetch_and_one_column() {
    let source = two_country_source();
    let dash = dashboard(Arc::clone(&source));

    let report = dash
        .comparison_frame(&["A", "A", "A"], Metric::Cases, None, None)
        .await
        .unwrap();

    assert_eq!(report.frame.entities().count(), 1);
    assert_eq!(source.fetch_count("A"), 1);
}

#[tokio::test]
async fn explicit_window_restricts_the_axis() {
    let dash = dashboard(two_country_source());
    let window = AnalysisWindow::between(d("2020-03-02"), d("2020-03-03"));
    let report = dash
        .comparison_frame(&["A", "B"], Metric::Cases, Some(window), None)
        .await
        .unwrap();

    assert_eq!(report.frame.dates(), &[d("2020-03-02"), d("2020-03-03")]);
    assert_eq!(report.frame.column("A").unwrap(), &[Some(20), Some(35)]);
}

#[tokio::test]
async fn inverted_window_yields_an_empty_frame_not_an_error() {
    let dash = dashboard(two_country_source());
    let window = AnalysisWindow::between(d("2020-03-03"), d("2020-03-01"));
    let report = dash
        .comparison_frame(&["A", "B"], Metric::Cases, Some(window), None)
        .await
        .unwrap();
    assert!(report.frame.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn default_window_is_resolved_per_entity() {
    // A long series and a short one; with a 1-day lookback each entity keeps
    // its own most recent two dates.
    let source = Arc::new(
        MockSource::builder()
            .with_rows(
                "Long",
                &[
                    ("2020-03-01", 1, 0),
                    ("2020-03-02", 2, 0),
                    ("2020-03-05", 5, 0),
                    ("2020-03-06", 6, 0),
                ],
            )
            .with_rows("Short", &[("2020-03-02", 7, 0), ("2020-03-03", 8, 0)])
            .build(),
    );
    let dash = Dashboard::builder()
        .source(source)
        .lookback_days(1)
        .build()
        .unwrap();

    let report = dash
        .comparison_frame(&["Long", "Short"], Metric::Cases, None, None)
        .await
        .unwrap();

    assert_eq!(
        report.frame.dates(),
        &[d("2020-03-02"), d("2020-03-03"), d("2020-03-05"), d("2020-03-06")]
    );
    assert_eq!(report.frame.value("Long", d("2020-03-01")), None);
    assert_eq!(report.frame.value("Long", d("2020-03-05")), Some(5));
    assert_eq!(report.frame.value("Short", d("2020-03-03")), Some(8));
}

#[tokio::test]
async fn downsampling_caps_points_and_keeps_the_latest() {
    let rows: Vec<(String, u64, u64)> = (0..30u64)
        .map(|i| {
            let date = d("2020-03-01") + chrono::Days::new(i);
            (date.to_string(), (i + 1) * 10, i)
        })
        .collect();
    let borrowed: Vec<(&str, u64, u64)> = rows
        .iter()
        .map(|(date, c, dd)| (date.as_str(), *c, *dd))
        .collect();

    let source = Arc::new(MockSource::builder().with_rows("A", &borrowed).build());
    let dash = dashboard(source);

    let report = dash
        .comparison_frame(&["A"], Metric::Cases, Some(AnalysisWindow::UNBOUNDED), Some(8))
        .await
        .unwrap();

    let column = report.frame.column("A").unwrap();
    assert!(column.len() <= 9);
    // The most recent point must survive downsampling and alignment.
    assert_eq!(report.frame.dates().last(), Some(&d("2020-03-30")));
    assert_eq!(report.frame.value("A", d("2020-03-30")), Some(300));
}

#[tokio::test]
async fn zero_max_points_is_rejected() {
    let dash = dashboard(two_country_source());
    let err = dash
        .comparison_frame(&["A"], Metric::Cases, None, Some(0))
        .await
        .unwrap_err();
    assert!(matches!(err, EpidashError::InvalidArg(_)));
}

#[tokio::test]
async fn empty_request_produces_an_empty_frame() {
    let dash = dashboard(two_country_source());
    let report = dash
        .comparison_frame(&[], Metric::Cases, None, None)
        .await
        .unwrap();
    assert!(report.frame.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn builder_requires_a_source() {
    let err = Dashboard::builder().build().unwrap_err();
    assert!(matches!(err, EpidashError::InvalidArg(_)));
}
