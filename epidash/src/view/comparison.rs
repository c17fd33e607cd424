use epidash_core::types::{AlignedFrame, AnalysisWindow, Metric};
use epidash_core::{EpidashError, align, clip, default_window, downsample};

use crate::Dashboard;

/// Outcome of a multi-entity comparison request.
///
/// Partial success is first-class: entities whose fetch failed are omitted
/// from the frame and reported in `failures` instead of aborting the batch.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    /// Aligned, downsampled frame over the entities that resolved.
    pub frame: AlignedFrame,
    /// One error per entity that could not be fetched.
    pub failures: Vec<EpidashError>,
}

impl Dashboard {
    /// Build a chart-ready comparison frame for a set of entities.
    ///
    /// Behavior:
    /// - Requested ids are treated as a set: duplicates collapse to one fetch
    ///   and one column.
    /// - Fetches for distinct uncached entities are issued concurrently; the
    ///   cache de-duplicates overlapping requests for the same entity.
    /// - Without an explicit `window`, each entity gets its own default
    ///   window (most recent `lookback_days`, clamped to its earliest date).
    /// - Each entity is clipped and downsampled *before* alignment, so the
    ///   final point of every series survives into the frame.
    /// - The frame contains only the requested entities; a late fetch for an
    ///   entity no longer of interest lands in the cache, never in a frame.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `max_points` is `Some(0)`. Per-entity fetch
    /// failures never fail the call; they are reported in
    /// [`ComparisonReport::failures`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "epidash::view::comparison_frame",
            skip(self, entity_ids),
            fields(entities = entity_ids.len(), metric = %metric),
        )
    )]
    pub async fn comparison_frame(
        &self,
        entity_ids: &[&str],
        metric: Metric,
        window: Option<AnalysisWindow>,
        max_points: Option<usize>,
    ) -> Result<ComparisonReport, EpidashError> {
        if max_points == Some(0) {
            return Err(EpidashError::InvalidArg(
                "max_points must be at least 1".to_string(),
            ));
        }
        let max_points = max_points.unwrap_or(self.cfg.max_chart_points);

        let mut ids: Vec<&str> = Vec::with_capacity(entity_ids.len());
        for &id in entity_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let tasks = ids.iter().map(|id| self.fetch_series(id));
        let joined = futures::future::join_all(tasks).await;

        let mut ready = Vec::with_capacity(ids.len());
        let mut failures = Vec::new();
        for result in joined {
            match result {
                Ok(series) => {
                    let win = window
                        .unwrap_or_else(|| default_window(&series, self.cfg.lookback_days));
                    ready.push(downsample(&clip(&series, &win), max_points));
                }
                Err(e) => failures.push(e),
            }
        }

        Ok(ComparisonReport {
            frame: align(&ready, metric),
            failures,
        })
    }
}
