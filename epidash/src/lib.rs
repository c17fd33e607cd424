//! Epidash serves render-ready epidemiological views over a cached data source.
//!
//! Overview
//! - Fetches per-entity cumulative series through a bounded, request
//!   de-duplicating cache (`epidash-cache`).
//! - Clips each series to an analysis window, resolving a default window
//!   (most recent N days) when none is given.
//! - Aligns multiple entities onto one shared date axis with explicit gaps
//!   where an entity lacks data, and bounds per-entity point counts for
//!   chart rendering.
//! - Derives daily new-count series and shrinking-window rolling means for
//!   single-entity analytical views.
//!
//! Key behaviors and trade-offs
//! - Fan-out: fetches for distinct, uncached entities run concurrently, and
//!   a failure in one entity never discards results obtained for others —
//!   the comparison view reports partial success plus an error list.
//! - Request de-duplication: overlapping requests for the same entity share
//!   one outstanding source call; a failed fetch clears the in-flight marker
//!   so the entity can be retried.
//! - Absence semantics: a cell missing from an entity's series stays an
//!   explicit gap in the aligned frame; it is never coerced to zero.
//! - Delta clamping: downward revisions of a cumulative total clamp the
//!   daily delta to zero rather than going negative; the correction is
//!   discarded, not redistributed.
//!
//! Examples
//! Building a dashboard against a data source:
//! ```rust,ignore
//! use std::sync::Arc;
//! use epidash::{Dashboard, Metric};
//!
//! let dashboard = Dashboard::builder()
//!     .source(Arc::new(source))
//!     .lookback_days(90)
//!     .max_chart_points(365)
//!     .build()?;
//! ```
//!
//! Comparing entities on a shared date axis:
//! ```rust,ignore
//! let report = dashboard
//!     .comparison_frame(&["France", "Italy"], Metric::Cases, None, None)
//!     .await?;
//! for entity in report.frame.entities() {
//!     // one column per entity, parallel to report.frame.dates()
//! }
//! ```
//!
//! Single-entity daily analytics with a 7-day rolling mean:
//! ```rust,ignore
//! let rows = dashboard.derived_metrics("France", None, 7).await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod view;

pub use core::{Dashboard, DashboardBuilder};
pub use view::comparison::ComparisonReport;

pub use epidash_cache::SeriesCache;

// Re-export core types for convenience
pub use epidash_core::{
    // Frames & series
    AlignedFrame,
    AnalysisWindow,
    // Foundational types
    DailyPoint,
    DataSource,
    DerivedPoint,
    EntitySeries,
    EntityStats,
    EpidashError,
    GlobalSummary,
    LatestStats,
    Metric,
    TimeSeriesPoint,

    CacheConfig,
    DashboardConfig,

    DEFAULT_LOOKBACK_DAYS,
};
