use std::sync::Arc;

use epidash_cache::SeriesCache;
use epidash_core::types::{AnalysisWindow, CacheConfig, DashboardConfig};
use epidash_core::{DataSource, EntitySeries, EpidashError};

/// Orchestrator that serves render-ready views over a cached data source.
pub struct Dashboard {
    pub(crate) source: Arc<dyn DataSource>,
    pub(crate) cache: SeriesCache,
    pub(crate) cfg: DashboardConfig,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a `Dashboard` with custom configuration.
pub struct DashboardBuilder {
    source: Option<Arc<dyn DataSource>>,
    cfg: DashboardConfig,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a data source; you must register one via [`source`].
    /// - Defaults are conservative: 256-entry / 1 h series cache, 90-day
    ///   default lookback, 365-point chart bound.
    ///
    /// [`source`]: Self::source
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: DashboardConfig::default(),
        }
    }

    /// Register the data source collaborator.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Override the series cache bounds.
    ///
    /// Behavior and trade-offs:
    /// - A larger capacity keeps more entities warm across view switches at
    ///   the cost of memory; a shorter TTL keeps data fresher at the cost of
    ///   more source traffic.
    #[must_use]
    pub const fn cache(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Override the default lookback used when a view supplies no window.
    #[must_use]
    pub const fn lookback_days(mut self, days: u32) -> Self {
        self.cfg.lookback_days = days;
        self
    }

    /// Override the default per-entity point bound for chart frames.
    #[must_use]
    pub const fn max_chart_points(mut self, max_points: usize) -> Self {
        self.cfg.max_chart_points = max_points;
        self
    }

    /// Build the `Dashboard`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no data source has been registered via
    /// [`Self::source`].
    pub fn build(self) -> Result<Dashboard, EpidashError> {
        let source = self.source.ok_or_else(|| {
            EpidashError::InvalidArg(
                "no data source registered; add one via source(...)".to_string(),
            )
        })?;
        let cache = SeriesCache::new(&self.cfg.cache);
        Ok(Dashboard {
            source,
            cache,
            cfg: self.cfg,
        })
    }
}

/// Tag an opaque source failure with the source name; already-tagged and
/// not-found errors pass through unchanged.
pub(crate) fn tag_err(source_name: &str, e: EpidashError) -> EpidashError {
    match e {
        e @ (EpidashError::NotFound { .. } | EpidashError::Source { .. }) => e,
        other => EpidashError::source(source_name, other.to_string()),
    }
}

impl Dashboard {
    /// Start building a new `Dashboard` instance.
    ///
    /// Typical usage chains source registration and configuration, e.g.:
    ///
    /// ```rust,ignore
    /// let dashboard = epidash::Dashboard::builder()
    ///     .source(source)
    ///     .lookback_days(30)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Fetch one entity's full series through the cache.
    ///
    /// Concurrent calls for the same uncached entity share one outstanding
    /// source request. The cached series is normalized (sorted, one point per
    /// date) and keyed by the requested identifier.
    pub(crate) async fn fetch_series(&self, entity_id: &str) -> Result<EntitySeries, EpidashError> {
        self.cache
            .get_or_fetch(entity_id, || {
                let source = Arc::clone(&self.source);
                let id = entity_id.to_string();
                async move {
                    match source.entity_series(&id, &AnalysisWindow::UNBOUNDED).await {
                        Ok(series) => Ok(EntitySeries::new(id, series.points)),
                        Err(e) => Err(tag_err(source.name(), e)),
                    }
                }
            })
            .await
    }
}
