//! # postdash
//!
//! Data-derivation pipeline for a post-record dashboard.
//!
//! postdash turns a flat list of raw post records into the derived views a
//! dashboard renders: per-group aggregate counts for a bar chart, sampled
//! cumulative-growth series for a line chart, a filtered and paginated
//! table view, and export-ready tabular snapshots for spreadsheet files.
//!
//! ## Key Properties
//!
//! - One immutable record store, populated once per session, as the sole
//!   source of truth — every derived view borrows from it
//! - All derivation engines are pure and total: raw records plus caller
//!   parameters in, derived view out, safe to recompute on every keystroke
//! - Degenerate input (empty store, empty subgroup, zero matches) yields
//!   empty/zero-valued results, never an error
//! - Errors exist only at the boundaries: the upstream fetch, the geocoding
//!   lookup, and the export sink
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postdash::{FetchConfig, FilterState, fetch_or_empty};
//! use postdash::{aggregate_by_group, filter_records, paginate, sample_cumulative};
//!
//! // Fetch once; failures fall back to an empty store.
//! let store = fetch_or_empty(&FetchConfig::default());
//!
//! // Bar chart: posts per user.
//! let buckets = aggregate_by_group(store.records());
//!
//! // Line chart: cumulative growth for one user, at most 10 points.
//! let series = sample_cumulative(&store.group(1), 10);
//!
//! // Table: filter, then slice into the current page.
//! let mut state = FilterState::new();
//! state.set_query("voluptate");
//! let filtered = filter_records(store.records(), &state.query);
//! let view = paginate(&filtered, state.page, state.page_size);
//! for record in &view.items {
//!     println!("#{} {}", record.id, record.title);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`store`] — immutable record store and ingestion
//! - [`aggregate`] — per-group counts (bar chart)
//! - [`sample`] — bounded cumulative series (line chart)
//! - [`table`] — filter, pagination and the page-number window
//! - [`export`] — export rows, sheets and the CSV sink
//! - [`fetch`] — upstream HTTP fetch of the post list
//! - [`geocode`] — free-text location lookup (map search)
//! - [`error`] — error types

pub mod aggregate;
pub mod error;
pub mod export;
pub mod fetch;
pub mod geocode;
pub mod sample;
pub mod store;
pub mod table;

// Re-export primary API types at crate root for convenience.
pub use aggregate::{AggregateBucket, aggregate_by_group};
pub use error::{PostdashError, Result};
pub use export::{
    ExportRow, ExportSheet, PageContext, build_full_export, build_page_export, to_export_rows,
    write_csv,
};
pub use fetch::{DEFAULT_POSTS_ENDPOINT, FetchConfig, fetch_or_empty, fetch_posts};
pub use geocode::{GeocodeConfig, Place};
pub use sample::{DEFAULT_MAX_POINTS, SamplePoint, sample_cumulative};
pub use store::{MAX_RECORDS, Record, RecordStore};
pub use table::{
    FilterState, PAGE_SIZE, PAGE_WINDOW, PageView, filter_records, paginate, visible_page_window,
};
