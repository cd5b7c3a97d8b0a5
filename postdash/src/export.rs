//! Export formatter: flat tabular snapshots of the table for spreadsheets.
//!
//! Projects a record subset into rows with a fixed column order
//! (`No, User ID, Post ID, Title, Content[, Page]`) plus deterministic
//! column-width hints, a sheet name and a file name. Two shapes exist:
//!
//! - **Full export** — the whole filtered set; `No` starts at 1, no `Page`
//!   column, file name carries a UTC timestamp.
//! - **Page export** — the current page only; `No` continues from the page
//!   offset, every row carries a `Page` column, file name carries the page
//!   number.
//!
//! The sink that turns rows into a file is the only fallible part; shaping
//! itself is pure and total. A sink failure never touches pipeline state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ExportError, Result};
use crate::store::Record;

/// Column-width hints for the fixed columns, in column order.
const BASE_COLUMN_WIDTHS: [u16; 5] = [5, 8, 8, 40, 50];

/// Column-width hint for the extra `Page` column of page exports.
const PAGE_COLUMN_WIDTH: u16 = 8;

/// One flat export row in fixed column order.
///
/// `page` is `Some` exactly when the row came from a page export; column
/// presence depends only on the export shape, never on data content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// 1-based running index (continues across pages for page exports).
    #[serde(rename = "No")]
    pub no: usize,
    /// The record's group id.
    #[serde(rename = "User ID")]
    pub user_id: u64,
    /// The record's id.
    #[serde(rename = "Post ID")]
    pub post_id: u64,
    /// Title text.
    #[serde(rename = "Title")]
    pub title: String,
    /// Full body text.
    #[serde(rename = "Content")]
    pub content: String,
    /// `"Page {n}"` for page exports, absent for full exports.
    #[serde(rename = "Page", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

/// Identifies which page a page export was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// 1-indexed page number.
    pub page: usize,
    /// Records per page (used to offset the `No` column).
    pub page_size: usize,
}

/// A fully shaped export: rows plus the metadata the sink needs.
#[derive(Debug)]
pub struct ExportSheet {
    /// Sheet name embedded in the artifact.
    pub sheet_name: String,
    /// Suggested file name (timestamped for full exports, numbered for
    /// page exports).
    pub file_name: String,
    /// Column headers in order.
    pub headers: Vec<&'static str>,
    /// Column-width hints in column order.
    pub widths: Vec<u16>,
    /// The shaped rows.
    pub rows: Vec<ExportRow>,
}

/// Projects records into export rows.
///
/// With no `page_context`, `No` starts at 1 and the `Page` column is
/// omitted. With one, `No` continues from `(page - 1) * page_size + 1` and
/// every row carries `Page: "Page {page}"`. Row count always equals
/// `records.len()`.
pub fn to_export_rows(records: &[&Record], page_context: Option<PageContext>) -> Vec<ExportRow> {
    // page is 1-indexed; saturate so a malformed context cannot underflow.
    let offset = page_context.map_or(0, |ctx| ctx.page.saturating_sub(1) * ctx.page_size);
    let page_label = page_context.map(|ctx| format!("Page {}", ctx.page));

    records
        .iter()
        .enumerate()
        .map(|(index, record)| ExportRow {
            no: offset + index + 1,
            user_id: record.group_id,
            post_id: record.id,
            title: record.title.clone(),
            content: record.body.clone(),
            page: page_label.clone(),
        })
        .collect()
}

/// Column headers for an export shape.
pub fn column_headers(with_page: bool) -> Vec<&'static str> {
    let mut headers = vec!["No", "User ID", "Post ID", "Title", "Content"];
    if with_page {
        headers.push("Page");
    }
    headers
}

/// Column-width hints for an export shape.
pub fn column_widths(with_page: bool) -> Vec<u16> {
    let mut widths = BASE_COLUMN_WIDTHS.to_vec();
    if with_page {
        widths.push(PAGE_COLUMN_WIDTH);
    }
    widths
}

/// Builds the full-export sheet for a filtered record set.
///
/// `at` stamps the file name (`user_posts_data_{YYYY-MM-DDTHH-MM-SS}.csv`);
/// passing it in keeps the build deterministic and testable.
pub fn build_full_export(records: &[&Record], at: DateTime<Utc>) -> ExportSheet {
    ExportSheet {
        sheet_name: "User Posts Data".to_string(),
        file_name: format!("user_posts_data_{}.csv", at.format("%Y-%m-%dT%H-%M-%S")),
        headers: column_headers(false),
        widths: column_widths(false),
        rows: to_export_rows(records, None),
    }
}

/// Builds the page-export sheet for the current page's records.
pub fn build_page_export(page_items: &[&Record], context: PageContext) -> ExportSheet {
    ExportSheet {
        sheet_name: format!("Page {} Data", context.page),
        file_name: format!("user_posts_page_{}.csv", context.page),
        headers: column_headers(true),
        widths: column_widths(true),
        rows: to_export_rows(page_items, Some(context)),
    }
}

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serializes a sheet to CSV text (header line plus one line per row).
pub fn to_csv(sheet: &ExportSheet) -> String {
    let with_page = sheet.headers.len() > BASE_COLUMN_WIDTHS.len();
    let mut out = String::new();

    out.push_str(&sheet.headers.join(","));
    out.push('\n');

    for row in &sheet.rows {
        let mut fields = vec![
            row.no.to_string(),
            row.user_id.to_string(),
            row.post_id.to_string(),
            escape_csv_field(&row.title),
            escape_csv_field(&row.content),
        ];
        if with_page {
            fields.push(escape_csv_field(row.page.as_deref().unwrap_or_default()));
        }
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Writes a sheet to `dir` under its suggested file name.
///
/// Returns the path of the written file. I/O failures are reported as
/// [`ExportError`] and leave nothing but possibly a partial file behind;
/// in-memory state is untouched.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_csv(sheet: &ExportSheet, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ExportError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(&sheet.file_name);
    fs::write(&path, to_csv(sheet)).map_err(|e| ExportError::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(group_id: u64, id: u64, title: &str, body: &str) -> Record {
        Record {
            id,
            group_id,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn fixture(count: u64) -> Vec<Record> {
        (1..=count)
            .map(|i| record((i - 1) / 10 + 1, i, &format!("title {i}"), &format!("body {i}")))
            .collect()
    }

    #[test]
    fn test_full_export_rows() {
        let records = fixture(12);
        let refs: Vec<&Record> = records.iter().collect();

        let rows = to_export_rows(&refs, None);
        assert_eq!(rows.len(), 12);

        let nos: Vec<usize> = rows.iter().map(|r| r.no).collect();
        assert_eq!(nos, (1..=12).collect::<Vec<_>>());
        assert!(rows.iter().all(|r| r.page.is_none()));
    }

    #[test]
    fn test_page_export_rows_continue_numbering() {
        let records = fixture(12);
        let refs: Vec<&Record> = records.iter().collect();
        let page_items = &refs[5..10];

        let rows = to_export_rows(
            page_items,
            Some(PageContext {
                page: 2,
                page_size: 5,
            }),
        );

        let nos: Vec<usize> = rows.iter().map(|r| r.no).collect();
        assert_eq!(nos, vec![6, 7, 8, 9, 10]);
        assert!(rows.iter().all(|r| r.page.as_deref() == Some("Page 2")));
    }

    #[test]
    fn test_zero_page_context_saturates() {
        let records = fixture(2);
        let refs: Vec<&Record> = records.iter().collect();

        // page is documented 1-indexed; a zero page behaves like page 1.
        let rows = to_export_rows(
            &refs,
            Some(PageContext {
                page: 0,
                page_size: 5,
            }),
        );

        let nos: Vec<usize> = rows.iter().map(|r| r.no).collect();
        assert_eq!(nos, vec![1, 2]);
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(to_export_rows(&[], None).is_empty());
        let ctx = PageContext {
            page: 3,
            page_size: 5,
        };
        assert!(to_export_rows(&[], Some(ctx)).is_empty());
    }

    #[test]
    fn test_headers_and_widths() {
        assert_eq!(
            column_headers(false),
            vec!["No", "User ID", "Post ID", "Title", "Content"]
        );
        assert_eq!(
            column_headers(true),
            vec!["No", "User ID", "Post ID", "Title", "Content", "Page"]
        );
        assert_eq!(column_widths(false), vec![5, 8, 8, 40, 50]);
        assert_eq!(column_widths(true), vec![5, 8, 8, 40, 50, 8]);
    }

    #[test]
    fn test_full_export_file_name() {
        let records = fixture(3);
        let refs: Vec<&Record> = records.iter().collect();
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();

        let sheet = build_full_export(&refs, at);
        assert_eq!(sheet.file_name, "user_posts_data_2024-03-09T14-30-05.csv");
        assert_eq!(sheet.sheet_name, "User Posts Data");
        assert_eq!(sheet.rows.len(), 3);
    }

    #[test]
    fn test_page_export_file_name() {
        let records = fixture(5);
        let refs: Vec<&Record> = records.iter().collect();
        let sheet = build_page_export(
            &refs,
            PageContext {
                page: 4,
                page_size: 5,
            },
        );

        assert_eq!(sheet.file_name, "user_posts_page_4.csv");
        assert_eq!(sheet.sheet_name, "Page 4 Data");
        assert_eq!(sheet.rows[0].no, 16);
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_to_csv_shape() {
        let records = vec![record(1, 1, "a, title", "body")];
        let refs: Vec<&Record> = records.iter().collect();
        let sheet = build_page_export(
            &refs,
            PageContext {
                page: 1,
                page_size: 5,
            },
        );

        let csv = to_csv(&sheet);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "No,User ID,Post ID,Title,Content,Page");
        assert_eq!(lines[1], "1,1,1,\"a, title\",body,Page 1");
    }

    #[test]
    fn test_write_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let records = fixture(2);
        let refs: Vec<&Record> = records.iter().collect();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let sheet = build_full_export(&refs, at);
        let path = write_csv(&sheet, dir.path()).unwrap();

        assert!(path.ends_with("user_posts_data_2024-01-01T00-00-00.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_csv(&sheet));
        assert!(written.starts_with("No,User ID,Post ID,Title,Content\n"));
    }

    #[test]
    fn test_write_csv_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("deep");
        let records = fixture(1);
        let refs: Vec<&Record> = records.iter().collect();
        let sheet = build_page_export(
            &refs,
            PageContext {
                page: 1,
                page_size: 5,
            },
        );

        let path = write_csv(&sheet, &nested).unwrap();
        assert!(path.exists());
    }
}
