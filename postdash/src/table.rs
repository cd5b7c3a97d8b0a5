//! Filter/pagination engine: the searchable, paginated table view.
//!
//! Three pure steps, recomputed on every keystroke or page change:
//!
//! 1. [`filter_records`] — case-insensitive multi-field substring filter
//! 2. [`paginate`] — fixed-size page slicing into a [`PageView`]
//! 3. [`visible_page_window`] — bounded sliding window of page numbers
//!
//! The caller owns a [`FilterState`] and feeds it back in; nothing here is
//! cached, so repeated invocation with the same inputs is idempotent.
//! Out-of-range inputs are clamped rather than rejected with an error.

use crate::store::Record;

/// Fixed number of records per table page.
pub const PAGE_SIZE: usize = 5;

/// Fixed number of page-number buttons shown for navigation.
pub const PAGE_WINDOW: usize = 5;

/// Number of characters of `body` shown in the table's content preview.
pub const PREVIEW_LEN: usize = 80;

/// Transient filter and page position, owned by the caller.
///
/// Recomputed views never feed back into this state; the only mutations are
/// the explicit navigation methods, all of which clamp rather than fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Current search query (matched case-insensitively).
    pub query: String,
    /// Current page, 1-indexed.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
}

impl FilterState {
    /// Creates the initial state: empty query, page 1, default page size.
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    /// Replaces the search query and resets to page 1.
    ///
    /// Filtering invalidates prior page positions, so every query change
    /// returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Advances to the next page; no-op when already on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Goes back one page; no-op when already on the first page.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Jumps to a specific page; no-op when outside `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        if (1..=total_pages).contains(&page) {
            self.page = page;
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of filtered records, derived on demand.
#[derive(Debug)]
pub struct PageView<'a> {
    /// The records on this page, in store order.
    pub items: Vec<&'a Record>,
    /// Total records matching the filter (across all pages).
    pub total_filtered: usize,
    /// Total pages; 0 when nothing matched.
    pub total_pages: usize,
    /// The page these items belong to (after clamping).
    pub current_page: usize,
    /// The page size this view was sliced with.
    pub page_size: usize,
}

impl PageView<'_> {
    /// 1-based index of the first visible record, or 0 when nothing matched.
    pub fn showing_from(&self) -> usize {
        if self.total_filtered == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last visible record, or 0 when nothing matched.
    pub fn showing_to(&self) -> usize {
        self.showing_from() + self.items.len().saturating_sub(1)
    }
}

/// Returns `true` if `query` (already lower-cased) matches the record.
///
/// A record matches if the query is a substring of the lower-cased title,
/// the lower-cased body, or the decimal form of `group_id` or `id`.
fn matches(record: &Record, query: &str) -> bool {
    record.title.to_lowercase().contains(query)
        || record.body.to_lowercase().contains(query)
        || record.group_id.to_string().contains(query)
        || record.id.to_string().contains(query)
}

/// Applies the multi-field text filter, preserving store order.
///
/// An empty query matches every record.
pub fn filter_records<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &query))
        .collect()
}

/// Slices the filtered sequence into one fixed-size page.
///
/// `total_pages = ceil(filtered / page_size)` (0 for an empty filter
/// result). A `page` outside `[1, total_pages]` is clamped into range; the
/// returned [`PageView::current_page`] reflects the clamped value.
pub fn paginate<'a>(filtered: &[&'a Record], page: usize, page_size: usize) -> PageView<'a> {
    let page_size = page_size.max(1);
    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_filtered);
    let items = if start < total_filtered {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageView {
        items,
        total_filtered,
        total_pages,
        current_page,
        page_size,
    }
}

/// Computes the sliding window of page numbers shown for navigation.
///
/// The window is up to `window_size` contiguous page numbers centered on
/// `current_page`, shifted left when it hits the upper bound so it always
/// spans `min(window_size, total_pages)` pages. A `current_page` outside
/// `[1, total_pages]` is clamped into range first.
pub fn visible_page_window(
    current_page: usize,
    total_pages: usize,
    window_size: usize,
) -> Vec<usize> {
    if total_pages == 0 || window_size == 0 {
        return Vec::new();
    }

    let current_page = current_page.clamp(1, total_pages);
    let mut start = current_page.saturating_sub(window_size / 2).max(1);
    let end = (start + window_size - 1).min(total_pages);
    if end - start + 1 < window_size {
        start = (end + 1).saturating_sub(window_size).max(1);
    }

    (start..=end).collect()
}

/// Truncates a record body to the table's content preview length.
///
/// Operates on characters, not bytes, so multi-byte text never splits.
pub fn content_preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_LEN {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(PREVIEW_LEN).collect();
        format!("{truncated}...")
    }
}
