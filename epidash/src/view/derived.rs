use epidash_core::types::{AnalysisWindow, DerivedPoint};
use epidash_core::{EpidashError, clip, default_window, derived_points};

use crate::Dashboard;

impl Dashboard {
    /// Daily new counts and rolling means for one entity's analytical view.
    ///
    /// The entity's cumulative series is fetched through the cache, clipped
    /// to `window` (or to the default lookback when none is given), then
    /// differenced and smoothed. Rolling means use a shrinking window at the
    /// start of the range; `avg_window == 1` leaves the daily values as-is.
    ///
    /// # Errors
    /// - `InvalidArg` when `avg_window` is 0.
    /// - Propagates the fetch error when the entity cannot be loaded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "epidash::view::derived_metrics",
            skip(self),
            fields(entity_id, avg_window),
        )
    )]
    pub async fn derived_metrics(
        &self,
        entity_id: &str,
        window: Option<AnalysisWindow>,
        avg_window: usize,
    ) -> Result<Vec<DerivedPoint>, EpidashError> {
        if avg_window == 0 {
            return Err(EpidashError::InvalidArg(
                "avg_window must be at least 1".to_string(),
            ));
        }
        let series = self.fetch_series(entity_id).await?;
        let win = window.unwrap_or_else(|| default_window(&series, self.cfg.lookback_days));
        Ok(derived_points(&clip(&series, &win), avg_window))
    }
}
