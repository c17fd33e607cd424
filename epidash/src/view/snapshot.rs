use epidash_core::types::{EntityStats, GlobalSummary, Metric};
use epidash_core::EpidashError;

use crate::Dashboard;
use crate::core::tag_err;

impl Dashboard {
    /// Every known entity identifier, sorted ascending.
    ///
    /// # Errors
    /// Propagates the source failure, tagged with the source name.
    pub async fn entity_list(&self) -> Result<Vec<String>, EpidashError> {
        let mut ids = self
            .source
            .entity_list()
            .await
            .map_err(|e| tag_err(self.source.name(), e))?;
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    /// Latest cumulative totals per entity, sorted by identifier. Feed for
    /// map views.
    ///
    /// # Errors
    /// Propagates the source failure, tagged with the source name.
    pub async fn latest_snapshot(&self) -> Result<Vec<EntityStats>, EpidashError> {
        let snapshot = self
            .source
            .latest_snapshot()
            .await
            .map_err(|e| tag_err(self.source.name(), e))?;
        let mut stats: Vec<EntityStats> = snapshot
            .into_iter()
            .map(|(entity_id, s)| EntityStats {
                entity_id,
                cases: s.cases,
                deaths: s.deaths,
            })
            .collect();
        stats.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
        Ok(stats)
    }

    /// The `limit` entities with the highest totals for `metric`, descending.
    /// Ties break on the entity identifier so the order is deterministic.
    ///
    /// # Errors
    /// Propagates the source failure, tagged with the source name.
    pub async fn top_entities(
        &self,
        metric: Metric,
        limit: usize,
    ) -> Result<Vec<EntityStats>, EpidashError> {
        let mut stats = self.latest_snapshot().await?;
        stats.sort_by(|a, b| {
            let av = match metric {
                Metric::Cases => a.cases,
                Metric::Deaths => a.deaths,
            };
            let bv = match metric {
                Metric::Cases => b.cases,
                Metric::Deaths => b.deaths,
            };
            bv.cmp(&av).then_with(|| a.entity_id.cmp(&b.entity_id))
        });
        stats.truncate(limit);
        Ok(stats)
    }

    /// Totals summed across every entity at the latest snapshot, for the
    /// headline KPI row. The fatality rate on the summary is zero-safe.
    ///
    /// # Errors
    /// Propagates the source failure, tagged with the source name.
    pub async fn global_summary(&self) -> Result<GlobalSummary, EpidashError> {
        let snapshot = self
            .source
            .latest_snapshot()
            .await
            .map_err(|e| tag_err(self.source.name(), e))?;
        let mut summary = GlobalSummary { cases: 0, deaths: 0 };
        for s in snapshot.values() {
            summary.cases += s.cases;
            summary.deaths += s.deaths;
        }
        Ok(summary)
    }
}
