//! Sampling engine: bounded cumulative-growth series for the line chart.
//!
//! A subgroup with hundreds of records would make an unreadable line chart,
//! so the series is strided down to at most `max_points` evenly spaced
//! points, then tail-corrected so it always terminates at the subgroup's
//! true total. Cumulative counts come from each record's ordinal position
//! within its own subgroup, not from its global position in the store.

use serde::Serialize;

use crate::store::Record;

/// Default cap on the number of stride-sampled points per series.
pub const DEFAULT_MAX_POINTS: usize = 10;

/// One plotted cumulative-progress value for a subgroup's growth curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePoint {
    /// Axis label, `"Post {ordinal}"`.
    pub label: String,
    /// Cumulative record count at this ordinal.
    pub cumulative_count: usize,
}

/// Samples a subgroup's cumulative series down to a bounded point count.
///
/// `subgroup` is one group's records in store order (see
/// [`RecordStore::group`](crate::store::RecordStore::group)). With
/// `step = ceil(len / max_points)`, a point is emitted for every index
/// divisible by `step`; if the stride misses the final record, one extra
/// point for the true total is appended.
///
/// Guarantees for non-empty input: output length is between 1 and
/// `max_points + 1`, cumulative counts are strictly increasing, and the
/// last point's count equals `subgroup.len()`. An empty subgroup yields an
/// empty series.
pub fn sample_cumulative(subgroup: &[&Record], max_points: usize) -> Vec<SamplePoint> {
    let len = subgroup.len();
    if len == 0 {
        return Vec::new();
    }

    // max_points is expected to be >= 1; clamp so the stride stays valid.
    let step = len.div_ceil(max_points.max(1));

    let mut points: Vec<SamplePoint> = (0..len)
        .step_by(step)
        .map(|i| SamplePoint {
            label: format!("Post {}", i + 1),
            cumulative_count: i + 1,
        })
        .collect();

    // Tail correction: every series terminates at the true total.
    if points.last().is_some_and(|p| p.cumulative_count < len) {
        points.push(SamplePoint {
            label: format!("Post {len}"),
            cumulative_count: len,
        });
    }

    points
}
