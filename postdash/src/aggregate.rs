//! Aggregation engine: per-group record counts for the bar chart.
//!
//! A single left-to-right scan over the record store produces one bucket per
//! distinct group id, in the order each group was first encountered. That
//! first-seen ordering is a contract, not an accident: the chart axis shows
//! groups in the order the data introduced them.

use std::collections::HashMap;

use serde::Serialize;

use crate::store::Record;

/// A (key, count) aggregate over one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateBucket {
    /// Display key, `"User {group_id}"`.
    pub key: String,
    /// Number of records observed for this group.
    pub count: usize,
}

/// Computes per-group counts over the full record set.
///
/// Returns one [`AggregateBucket`] per distinct `group_id`, in first-seen
/// order. The sum of all bucket counts equals `records.len()`; an empty
/// input yields an empty output.
pub fn aggregate_by_group(records: &[Record]) -> Vec<AggregateBucket> {
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut buckets: Vec<AggregateBucket> = Vec::new();

    for record in records {
        match positions.get(&record.group_id) {
            Some(&index) => buckets[index].count += 1,
            None => {
                positions.insert(record.group_id, buckets.len());
                buckets.push(AggregateBucket {
                    key: format!("User {}", record.group_id),
                    count: 1,
                });
            }
        }
    }

    buckets
}
