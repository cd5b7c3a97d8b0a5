//! Record store: the immutable raw record set behind every derived view.
//!
//! The store holds the post records exactly as they were fetched, in fetch
//! order, capped at [`MAX_RECORDS`]. It is populated once per session and
//! never mutated afterwards; the aggregation, sampling and filter/pagination
//! engines all operate on borrowed views of its contents so no derived data
//! can drift from the source of truth.
//!
//! # Design
//!
//! - Created empty, populated exactly once via [`RecordStore::from_posts`]
//! - Ordering is fetch order; `id` is unique within the store (a duplicate
//!   id in the upstream payload is dropped at ingestion)
//! - All read access goes through `&[Record]` or per-group borrowed slices

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Maximum number of records ingested into a store.
///
/// The upstream source may return more; only the first `MAX_RECORDS` decoded
/// posts are kept.
pub const MAX_RECORDS: usize = 100;

/// A post record as it arrives from the upstream JSON source.
///
/// The upstream field `userId` becomes the record's group id.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    /// Owning user id (`userId` upstream).
    #[serde(rename = "userId")]
    pub user_id: u64,
    /// Unique post id.
    pub id: u64,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
}

/// One fetched post-like item: the atomic unit of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Unique id, > 0.
    pub id: u64,
    /// Partition key used for aggregation and sampling.
    pub group_id: u64,
    /// Title text (searchable).
    pub title: String,
    /// Body text (searchable).
    pub body: String,
}

impl From<RawPost> for Record {
    fn from(post: RawPost) -> Self {
        Self {
            id: post.id,
            group_id: post.user_id,
            title: post.title,
            body: post.body,
        }
    }
}

/// Ordered, immutable set of [`Record`]s.
///
/// The sole source of truth for all derived views. Deriving a view never
/// copies records; everything downstream borrows from this store.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Creates an empty store.
    ///
    /// An empty store is also the fallback when the upstream fetch or decode
    /// fails: every engine returns an empty/zero-valued result for it.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Populates a store from decoded upstream posts.
    ///
    /// Takes at most [`MAX_RECORDS`] posts in arrival order. A post whose id
    /// was already seen is dropped so that ids stay unique within the store.
    pub fn from_posts(posts: Vec<RawPost>) -> Self {
        let mut seen = HashSet::new();
        let records = posts
            .into_iter()
            .filter(|post| seen.insert(post.id))
            .take(MAX_RECORDS)
            .map(Record::from)
            .collect();

        Self { records }
    }

    /// Returns all records in fetch order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the records belonging to one group, in fetch order.
    ///
    /// This is the subgroup-selection step that feeds the sampling engine.
    pub fn group(&self, group_id: u64) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.group_id == group_id)
            .collect()
    }

    /// Returns the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
