#![allow(dead_code)]

use std::sync::Arc;

use epidash::{Dashboard, EntitySeries, TimeSeriesPoint};
use epidash_mock::MockSource;

pub fn d(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

pub fn series(id: &str, rows: &[(&str, u64, u64)]) -> EntitySeries {
    EntitySeries::new(
        id,
        rows.iter()
            .map(|&(date, cases, deaths)| TimeSeriesPoint::new(d(date), cases, deaths)),
    )
}

pub fn dashboard(source: Arc<MockSource>) -> Dashboard {
    Dashboard::builder().source(source).build().unwrap()
}
