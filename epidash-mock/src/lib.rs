//! epidash-mock
//!
//! Deterministic in-memory [`DataSource`] for tests and examples. Series are
//! seeded up front; per-entity failures and artificial latency can be
//! injected, and every `entity_series` call is counted so tests can assert
//! cache hits and request de-duplication.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use epidash_core::{
    AnalysisWindow, DataSource, EntitySeries, EpidashError, LatestStats, TimeSeriesPoint, clip,
};

/// In-memory data source with scripted behavior.
pub struct MockSource {
    series: HashMap<String, EntitySeries>,
    snapshot: Option<HashMap<String, LatestStats>>,
    failing: HashSet<String>,
    delay: Duration,
    fetch_counts: Mutex<HashMap<String, usize>>,
    total_fetches: AtomicUsize,
}

impl MockSource {
    /// Start building a mock source.
    #[must_use]
    pub fn builder() -> MockSourceBuilder {
        MockSourceBuilder::new()
    }

    /// How many times `entity_series` was called for `entity_id`.
    #[must_use]
    pub fn fetch_count(&self, entity_id: &str) -> usize {
        self.fetch_counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(entity_id)
            .copied()
            .unwrap_or(0)
    }

    /// How many times `entity_series` was called in total.
    #[must_use]
    pub fn total_fetches(&self) -> usize {
        self.total_fetches.load(Ordering::SeqCst)
    }

    fn record_fetch(&self, entity_id: &str) {
        self.total_fetches.fetch_add(1, Ordering::SeqCst);
        *self
            .fetch_counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(entity_id.to_string())
            .or_insert(0) += 1;
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &'static str {
        "epidash-mock"
    }

    async fn entity_series(
        &self,
        entity_id: &str,
        window: &AnalysisWindow,
    ) -> Result<EntitySeries, EpidashError> {
        self.record_fetch(entity_id);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.contains(entity_id) {
            return Err(EpidashError::source(
                self.name(),
                format!("forced failure: series for {entity_id}"),
            ));
        }
        let series = self
            .series
            .get(entity_id)
            .ok_or_else(|| EpidashError::not_found(format!("series for {entity_id}")))?;
        Ok(clip(series, window))
    }

    async fn entity_list(&self) -> Result<Vec<String>, EpidashError> {
        let mut ids: Vec<String> = self.series.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn latest_snapshot(&self) -> Result<HashMap<String, LatestStats>, EpidashError> {
        if let Some(snapshot) = &self.snapshot {
            return Ok(snapshot.clone());
        }
        // Derive from the seeded series when no snapshot was scripted.
        Ok(self
            .series
            .iter()
            .filter_map(|(id, s)| {
                s.latest().map(|p| {
                    (
                        id.clone(),
                        LatestStats {
                            cases: p.cumulative_cases,
                            deaths: p.cumulative_deaths,
                        },
                    )
                })
            })
            .collect())
    }
}

/// Builder for [`MockSource`].
pub struct MockSourceBuilder {
    series: HashMap<String, EntitySeries>,
    snapshot: Option<HashMap<String, LatestStats>>,
    failing: HashSet<String>,
    delay: Duration,
}

impl Default for MockSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSourceBuilder {
    /// Empty builder: no entities, no failures, no latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            snapshot: None,
            failing: HashSet::new(),
            delay: Duration::ZERO,
        }
    }

    /// Seed a full series for its entity.
    #[must_use]
    pub fn with_series(mut self, series: EntitySeries) -> Self {
        self.series.insert(series.entity_id.clone(), series);
        self
    }

    /// Seed a series from `(date, cases, deaths)` rows.
    ///
    /// # Panics
    /// Panics when a date is not `YYYY-MM-DD`; acceptable in test fixtures.
    #[must_use]
    pub fn with_rows(self, entity_id: &str, rows: &[(&str, u64, u64)]) -> Self {
        let series = EntitySeries::new(
            entity_id,
            rows.iter()
                .map(|&(date, cases, deaths)| {
                    TimeSeriesPoint::new(date.parse().expect("fixture date"), cases, deaths)
                }),
        );
        self.with_series(series)
    }

    /// Replace the derived latest snapshot with a scripted one.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: HashMap<String, LatestStats>) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Make every `entity_series` call for `entity_id` fail.
    #[must_use]
    pub fn will_fail(mut self, entity_id: &str) -> Self {
        self.failing.insert(entity_id.to_string());
        self
    }

    /// Add artificial latency to every `entity_series` call.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> MockSource {
        MockSource {
            series: self.series,
            snapshot: self.snapshot,
            failing: self.failing,
            delay: self.delay,
            fetch_counts: Mutex::new(HashMap::new()),
            total_fetches: AtomicUsize::new(0),
        }
    }
}
