//! Collapsing of near-simultaneous samples within one series.

use crate::engine::normalize::round1;
use crate::engine::types::{Sample, Series};

/// Appends `sample` to `series`, or folds it into the last element when both
/// share a time bucket.
///
/// Merging replaces the last element with an incremental weighted average:
/// the new duration is re-derived from the previous *rounded* average and
/// its count, then rounded again. This repeated rounding is lossy but
/// matches the historical chart output, so it is kept as is.
///
/// Only the last element is ever considered; an earlier sample in the same
/// bucket never merges.
pub fn merge_or_append(series: &mut Series, sample: Sample) {
    if let Some(last) = series.last_mut() {
        if last.time_bucket == sample.time_bucket {
            let merged_count = last.merged_count + 1;
            last.duration_minutes = round1(
                (last.duration_minutes * last.merged_count as f64 + sample.duration_minutes)
                    / merged_count as f64,
            );
            last.merged_count = merged_count;
            return;
        }
    }
    series.push(sample);
}
