//! Data types used by the aggregation engine.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::edition::{EditionId, EditionTable};

/// One submitted ping/pong pair: arrival at the back of the queue and
/// arrival at the front.
///
/// `pong >= ping` is expected but not enforced; a negative interval is odd
/// data, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub ping: NaiveDateTime,
    pub pong: NaiveDateTime,
}

/// A single wait-duration measurement on the 5-minute chart grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Ping time-of-day floored to a 5-minute boundary.
    pub time_bucket: NaiveTime,
    /// Wait in minutes, rounded to one decimal. May be negative or zero.
    pub duration_minutes: f64,
    /// How many raw records have been folded into this sample.
    pub merged_count: u32,
}

/// Ordered wait-duration samples for one (day, edition) pair, in the arrival
/// order of the underlying records.
pub type Series = Vec<Sample>;

/// A raw record broken down into its chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub day: u32,
    pub year: i32,
    pub edition: EditionId,
    pub sample: Sample,
}

/// Metadata of the last record the aggregator retained, in iteration order.
/// Under arrival-order iteration this is the last-read record, not
/// necessarily the latest by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastSample {
    pub edition: EditionId,
    pub day: u32,
    pub year: i32,
    pub sample: Sample,
}

/// Full output of one aggregation pass: day -> edition -> series, plus the
/// most recently processed sample.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    pub by_day: BTreeMap<u32, BTreeMap<EditionId, Series>>,
    pub last_sample: Option<LastSample>,
}

/// One edition's series within a day, as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySeries {
    pub edition: EditionId,
    pub samples: Series,
}

/// Chart-ready view of an [`AggregationResult`]: days ascending, editions in
/// canonical table order within each day, and a stable color palette.
#[derive(Debug, PartialEq, Serialize)]
pub struct ChartView {
    pub days: Vec<u32>,
    pub series_per_day: BTreeMap<u32, Vec<DaySeries>>,
    pub palette: Vec<String>,
}

/// Whether the aggregator processes records as read or sorted by ping time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Process records in log order. Reproduces the historical last-read
    /// `last_sample` semantics; callers wanting increasing time per series
    /// must supply time-ordered input.
    #[default]
    ArrivalOrder,
    /// Sort records by ping time before aggregating.
    TimeSorted,
}

/// Immutable engine configuration, constructed once at startup and passed by
/// reference into the classifier, aggregator, and selector.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub table: EditionTable,
    pub ordering: OrderingPolicy,
}
