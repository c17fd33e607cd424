//! Core data structures for per-entity cumulative series and derived views.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reported observation for an entity: cumulative totals as of `date`.
///
/// Dates are day-granularity calendar dates; their ISO `YYYY-MM-DD` textual
/// form sorts lexicographically in chronological order at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Reporting date.
    pub date: NaiveDate,
    /// Running total of confirmed cases as of `date`.
    pub cumulative_cases: u64,
    /// Running total of deaths as of `date`.
    pub cumulative_deaths: u64,
}

impl TimeSeriesPoint {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(date: NaiveDate, cumulative_cases: u64, cumulative_deaths: u64) -> Self {
        Self {
            date,
            cumulative_cases,
            cumulative_deaths,
        }
    }
}

/// Which cumulative field an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cumulative confirmed cases.
    Cases,
    /// Cumulative deaths.
    Deaths,
}

impl Metric {
    /// Read the selected cumulative value out of a point.
    #[must_use]
    pub const fn value_of(self, point: &TimeSeriesPoint) -> u64 {
        match self {
            Self::Cases => point.cumulative_cases,
            Self::Deaths => point.cumulative_deaths,
        }
    }
}

impl core::fmt::Display for Metric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cases => f.write_str("cases"),
            Self::Deaths => f.write_str("deaths"),
        }
    }
}

/// A single entity's cumulative series, sorted strictly ascending by date.
///
/// Invariant: at most one point per date. Cumulative fields are *expected*
/// to be non-decreasing but sources do publish downward revisions; nothing
/// here rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySeries {
    /// Unique entity identifier (e.g. a country name).
    pub entity_id: String,
    /// Observations, sorted ascending by date, one per date.
    pub points: Vec<TimeSeriesPoint>,
}

impl EntitySeries {
    /// Build a series, normalizing the input: points are sorted ascending and
    /// de-duplicated by date. When a source reports a date twice, the later
    /// report wins (it is treated as a revision of the earlier one).
    #[must_use]
    pub fn new(entity_id: impl Into<String>, points: impl IntoIterator<Item = TimeSeriesPoint>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, TimeSeriesPoint> = BTreeMap::new();
        for p in points {
            by_date.insert(p.date, p);
        }
        Self {
            entity_id: entity_id.into(),
            points: by_date.into_values().collect(),
        }
    }

    /// An entity with no observations.
    #[must_use]
    pub fn empty(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            points: Vec::new(),
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest reporting date, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Latest reporting date, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Most recent observation, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }
}

/// An inclusive `[start, end]` analysis range; an absent side is unbounded.
///
/// `start > end` is a valid degenerate window that matches nothing. Absent
/// bounds are modeled as `None`, never as sentinel dates, so "no bound" and
/// "bound at some date" cannot be conflated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    /// Inclusive lower bound, unbounded when `None`.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound, unbounded when `None`.
    pub end: Option<NaiveDate>,
}

impl AnalysisWindow {
    /// A window with no bounds on either side.
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// A window bounded on both sides.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether both sides are unbounded.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `date` falls inside the window (per-side inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start
            && date < start
        {
            return false;
        }
        if let Some(end) = self.end
            && date > end
        {
            return false;
        }
        true
    }
}

/// Multiple entities' values placed on one shared, sorted date axis.
///
/// Every column is parallel to `dates`; a `None` cell means the entity
/// reported nothing for that date. Absence is deliberately distinct from
/// `Some(0)` and must stay that way downstream, so the fields are
/// crate-private and the frame is only built by [`crate::timeseries::align`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedFrame {
    pub(crate) dates: Vec<NaiveDate>,
    pub(crate) columns: BTreeMap<String, Vec<Option<u64>>>,
}

impl AlignedFrame {
    /// A frame with no dates and no entities.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            columns: BTreeMap::new(),
        }
    }

    /// The shared date axis, sorted ascending.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Entity identifiers present in the frame, in sorted order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// One entity's column, parallel to [`Self::dates`].
    #[must_use]
    pub fn column(&self, entity_id: &str) -> Option<&[Option<u64>]> {
        self.columns.get(entity_id).map(Vec::as_slice)
    }

    /// Cell lookup. `None` means the entity has no data for that date (or the
    /// entity/date is not in the frame at all).
    #[must_use]
    pub fn value(&self, entity_id: &str, date: NaiveDate) -> Option<u64> {
        let idx = self.dates.binary_search(&date).ok()?;
        self.columns.get(entity_id)?.get(idx).copied().flatten()
    }

    /// Number of dates on the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the date axis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// One entity's day-over-day increase for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Reporting date.
    pub date: NaiveDate,
    /// New count for the day, clamped non-negative.
    pub value: u64,
}

/// Render-ready derived row for a single-entity analytical view: daily new
/// counts plus their rolling means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    /// Reporting date.
    pub date: NaiveDate,
    /// New cases for the day.
    pub new_cases: u64,
    /// New deaths for the day.
    pub new_deaths: u64,
    /// Rolling mean of new cases over the configured window.
    pub avg_new_cases: f64,
    /// Rolling mean of new deaths over the configured window.
    pub avg_new_deaths: f64,
}

/// Latest cumulative totals for one entity, as published by the source's
/// snapshot endpoint (map/leaderboard feed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestStats {
    /// Cumulative confirmed cases.
    pub cases: u64,
    /// Cumulative deaths.
    pub deaths: u64,
}

impl LatestStats {
    /// Read the selected metric.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
        }
    }
}

/// Latest cumulative totals tagged with the owning entity, for leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    /// Entity identifier.
    pub entity_id: String,
    /// Cumulative confirmed cases.
    pub cases: u64,
    /// Cumulative deaths.
    pub deaths: u64,
}

impl EntityStats {
    /// Deaths per confirmed case, as a percentage. Zero cases yields 0.0,
    /// never a NaN or an infinity.
    #[must_use]
    pub fn fatality_rate(&self) -> f64 {
        fatality_rate(self.deaths, self.cases)
    }
}

/// Totals summed across every entity at the latest common snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSummary {
    /// Cumulative confirmed cases across all entities.
    pub cases: u64,
    /// Cumulative deaths across all entities.
    pub deaths: u64,
}

impl GlobalSummary {
    /// Deaths per confirmed case, as a percentage; 0.0 when there are no cases.
    #[must_use]
    pub fn fatality_rate(&self) -> f64 {
        fatality_rate(self.deaths, self.cases)
    }
}

/// Deaths per case as a percentage, defined as 0.0 when `cases == 0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fatality_rate(deaths: u64, cases: u64) -> f64 {
    if cases == 0 {
        0.0
    } else {
        deaths as f64 / cases as f64 * 100.0
    }
}

/// Capacity and freshness bounds for the series cache.
///
/// The cache is an explicit, injected object rather than ambient global
/// state; both bounds are always enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of resident entity series (LRU-evicted beyond this).
    pub capacity: usize,
    /// How long a fetched series stays servable before it must be re-fetched.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// Global configuration for the `Dashboard` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Series cache bounds.
    pub cache: CacheConfig,
    /// Default lookback when a view supplies no explicit analysis window.
    pub lookback_days: u32,
    /// Default per-entity point bound for chart-ready frames.
    pub max_chart_points: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            lookback_days: crate::timeseries::window::DEFAULT_LOOKBACK_DAYS,
            max_chart_points: 365,
        }
    }
}
