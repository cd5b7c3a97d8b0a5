//! Integration tests for export shaping and the CSV sink.

use chrono::{TimeZone, Utc};
use postdash::export::to_csv;
use postdash::store::{RawPost, RecordStore};
use postdash::{
    PageContext, build_full_export, build_page_export, filter_records, paginate, to_export_rows,
    write_csv,
};
use tempfile::tempdir;

fn store_of(count: u64) -> RecordStore {
    let posts = (1..=count)
        .map(|id| RawPost {
            user_id: (id - 1) / 10 + 1,
            id,
            title: format!("title {id}"),
            body: format!("body {id}"),
        })
        .collect();
    RecordStore::from_posts(posts)
}

#[test]
fn test_export_page_two_of_twelve() {
    let store = store_of(12);
    let filtered = filter_records(store.records(), "");
    let view = paginate(&filtered, 2, 5);

    let rows = to_export_rows(
        &view.items,
        Some(PageContext {
            page: view.current_page,
            page_size: view.page_size,
        }),
    );

    let nos: Vec<usize> = rows.iter().map(|r| r.no).collect();
    assert_eq!(nos, vec![6, 7, 8, 9, 10]);
    assert!(rows.iter().all(|r| r.page.as_deref() == Some("Page 2")));
}

#[test]
fn test_full_export_of_same_twelve() {
    let store = store_of(12);
    let filtered = filter_records(store.records(), "");

    let rows = to_export_rows(&filtered, None);
    assert_eq!(rows.len(), 12);

    let nos: Vec<usize> = rows.iter().map(|r| r.no).collect();
    assert_eq!(nos, (1..=12).collect::<Vec<_>>());
    assert!(rows.iter().all(|r| r.page.is_none()));
}

#[test]
fn test_filtered_export_keeps_filter_order() {
    let store = store_of(100);
    let filtered = filter_records(store.records(), "title 2");
    // ids 2, 20..=29.
    assert_eq!(filtered.len(), 11);

    let rows = to_export_rows(&filtered, None);
    let post_ids: Vec<u64> = rows.iter().map(|r| r.post_id).collect();
    assert_eq!(post_ids[0], 2);
    assert_eq!(&post_ids[1..], &(20..=29).collect::<Vec<u64>>()[..]);
}

#[test]
fn test_write_full_export_to_disk() {
    let dir = tempdir().unwrap();
    let store = store_of(3);
    let filtered = filter_records(store.records(), "");
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 15, 30).unwrap();

    let sheet = build_full_export(&filtered, at);
    let path = write_csv(&sheet, dir.path()).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "user_posts_data_2025-06-01T09-15-30.csv"
    );

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "No,User ID,Post ID,Title,Content");
    assert_eq!(lines[1], "1,1,1,title 1,body 1");
}

#[test]
fn test_write_page_export_to_disk() {
    let dir = tempdir().unwrap();
    let store = store_of(12);
    let filtered = filter_records(store.records(), "");
    let view = paginate(&filtered, 3, 5);

    let sheet = build_page_export(
        &view.items,
        PageContext {
            page: view.current_page,
            page_size: view.page_size,
        },
    );
    let path = write_csv(&sheet, dir.path()).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "user_posts_page_3.csv"
    );

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "No,User ID,Post ID,Title,Content,Page");
    // Records 11 and 12 belong to user 2 ((id - 1) / 10 + 1).
    assert_eq!(lines[1], "11,2,11,title 11,body 11,Page 3");
    assert_eq!(lines[2], "12,2,12,title 12,body 12,Page 3");
}

#[test]
fn test_sink_failure_leaves_pipeline_state_intact() {
    let store = store_of(5);
    let filtered = filter_records(store.records(), "");
    let sheet = build_full_export(&filtered, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

    // A directory that cannot be created surfaces as an error...
    let result = write_csv(&sheet, std::path::Path::new("/proc/no-such-dir/exports"));
    assert!(result.is_err());

    // ...but the shaped export and the store are untouched.
    assert_eq!(sheet.rows.len(), 5);
    assert_eq!(store.len(), 5);
    assert_eq!(to_csv(&sheet).lines().count(), 6);
}

#[test]
fn test_export_round_trips_through_json_rows() {
    // Export rows serialize with their spreadsheet column names.
    let store = store_of(1);
    let filtered = filter_records(store.records(), "");
    let rows = to_export_rows(&filtered, None);

    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["No"], 1);
    assert_eq!(json["User ID"], 1);
    assert_eq!(json["Post ID"], 1);
    assert_eq!(json["Title"], "title 1");
    assert_eq!(json["Content"], "body 1");
    assert!(json.get("Page").is_none());
}
