//! The aggregation pass: raw records in, per-day per-edition series out.

use std::collections::BTreeSet;

use crate::engine::edition::EditionId;
use crate::engine::merge::merge_or_append;
use crate::engine::normalize::normalize;
use crate::engine::types::{
    AggregationResult, EngineConfig, LastSample, OrderingPolicy, RawRecord,
};

/// Folds raw records into day -> edition -> series, merging same-bucket
/// neighbours along the way.
///
/// Records are visited in input order under [`OrderingPolicy::ArrivalOrder`],
/// or sorted by ping time first under [`OrderingPolicy::TimeSorted`]. A
/// non-empty `filter` drops records of other editions entirely; unknown
/// filter entries simply match nothing. `last_sample` reflects the last
/// record retained in iteration order.
///
/// Pure over its input: no I/O, identical calls yield identical results.
pub fn aggregate(
    config: &EngineConfig,
    records: &[RawRecord],
    filter: Option<&BTreeSet<EditionId>>,
) -> AggregationResult {
    let filter = filter.filter(|f| !f.is_empty());

    let sorted;
    let records = match config.ordering {
        OrderingPolicy::ArrivalOrder => records,
        OrderingPolicy::TimeSorted => {
            let mut by_ping = records.to_vec();
            by_ping.sort_by_key(|r| r.ping);
            sorted = by_ping;
            &sorted
        }
    };

    let mut result = AggregationResult::default();

    for record in records {
        let norm = normalize(&config.table, record);

        if let Some(filter) = filter {
            if !filter.contains(&norm.edition) {
                continue;
            }
        }

        let series = result
            .by_day
            .entry(norm.day)
            .or_default()
            .entry(norm.edition.clone())
            .or_default();
        merge_or_append(series, norm.sample.clone());

        result.last_sample = Some(LastSample {
            edition: norm.edition,
            day: norm.day,
            year: norm.year,
            sample: norm.sample,
        });
    }

    result
}
