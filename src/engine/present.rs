//! Selection and ordering of aggregated series for the rendering layer.

use std::collections::{BTreeMap, BTreeSet};

use crate::engine::edition::EditionId;
use crate::engine::types::{AggregationResult, ChartView, DaySeries, EngineConfig};

/// Filters an [`AggregationResult`] down to the requested editions and
/// arranges it for charting.
///
/// Days come out ascending; within a day, editions follow the color table's
/// canonical order (editions outside the table sort after it, by label), so
/// legends look the same on every chart. An empty `filter` means all table
/// editions. The palette covers the filtered editions in table order; filter
/// entries the table does not know contribute no color and no series, so a
/// typo degrades to an empty chart instead of an error.
pub fn present(
    config: &EngineConfig,
    result: &AggregationResult,
    filter: &BTreeSet<EditionId>,
) -> ChartView {
    let table = &config.table;

    let filter: BTreeSet<EditionId> = if filter.is_empty() {
        table.editions().cloned().collect()
    } else {
        filter.clone()
    };

    let known: BTreeSet<EditionId> = filter
        .iter()
        .filter(|e| table.canonical_index(e).is_some())
        .cloned()
        .collect();
    let palette = table.colors_for(&known).unwrap_or_default();

    let mut days = Vec::new();
    let mut series_per_day = BTreeMap::new();

    for (day, editions) in &result.by_day {
        days.push(*day);

        let mut entries: Vec<DaySeries> = editions
            .iter()
            .filter(|(edition, _)| filter.contains(*edition))
            .map(|(edition, samples)| DaySeries {
                edition: edition.clone(),
                samples: samples.clone(),
            })
            .collect();

        entries.sort_by_key(|s| {
            (
                table.canonical_index(&s.edition).unwrap_or(usize::MAX),
                s.edition.clone(),
            )
        });

        series_per_day.insert(*day, entries);
    }

    ChartView {
        days,
        series_per_day,
        palette,
    }
}
