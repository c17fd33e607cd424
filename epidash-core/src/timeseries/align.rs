use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::types::{AlignedFrame, EntitySeries, Metric};

/// Merge N per-entity series (each on its own sparse date set) onto one
/// shared, sorted date axis.
///
/// - The axis is the date union across all inputs, ascending.
/// - A cell is `None` exactly when the entity has no point for that date;
///   a reported value of zero stays `Some(0)`.
/// - Aligning a single series reproduces its own dates and values with no
///   absent cells.
///
/// Each entity's points are indexed date → value in a single pass before the
/// union walk, so the walk does O(1) lookups per entity instead of re-scanning
/// the series for every axis date.
///
/// If the same `entity_id` appears more than once in `series_list`, the last
/// occurrence wins.
#[must_use]
pub fn align(series_list: &[EntitySeries], metric: Metric) -> AlignedFrame {
    let mut axis: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut indexes: Vec<(&str, HashMap<NaiveDate, u64>)> = Vec::with_capacity(series_list.len());

    for series in series_list {
        let mut index = HashMap::with_capacity(series.points.len());
        for p in &series.points {
            axis.insert(p.date);
            index.insert(p.date, metric.value_of(p));
        }
        indexes.push((series.entity_id.as_str(), index));
    }

    let dates: Vec<NaiveDate> = axis.into_iter().collect();
    let mut columns: BTreeMap<String, Vec<Option<u64>>> = BTreeMap::new();
    for (entity_id, index) in indexes {
        let column = dates.iter().map(|d| index.get(d).copied()).collect();
        columns.insert(entity_id.to_string(), column);
    }

    AlignedFrame { dates, columns }
}
