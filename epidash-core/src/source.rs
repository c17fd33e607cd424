use std::collections::HashMap;

use async_trait::async_trait;

use crate::EpidashError;
use crate::types::{AnalysisWindow, EntitySeries, LatestStats};

/// Contract implemented by data-source crates (network, storage, fixtures).
///
/// The engine itself never performs I/O: every transformation runs over
/// already-fetched series, and these three calls are the only suspension
/// points in the system.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// A stable identifier used for error tagging and logging
    /// (e.g. "jhu-csse", "epidash-mock").
    fn name(&self) -> &'static str;

    /// Fetch one entity's cumulative series, optionally bounded by `window`.
    ///
    /// Implementations may ignore the window and return the full series; the
    /// engine clips locally either way. Returned points need not be sorted or
    /// unique per date — callers normalize via [`EntitySeries::new`].
    async fn entity_series(
        &self,
        entity_id: &str,
        window: &AnalysisWindow,
    ) -> Result<EntitySeries, EpidashError>;

    /// List every known entity identifier, sorted ascending.
    async fn entity_list(&self) -> Result<Vec<String>, EpidashError>;

    /// Latest cumulative totals per entity, for map/leaderboard views.
    async fn latest_snapshot(&self) -> Result<HashMap<String, LatestStats>, EpidashError>;
}
