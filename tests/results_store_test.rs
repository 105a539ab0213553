//! Results file tests
//!
//! Persistence, resume and the on-disk format of the results collection.

use std::fs;

use seasonmap::modules::mapping::{MappedEntry, EntryStatus, MappingRecord, RecordSink, ResultsStore};
use seasonmap::modules::matching::{AnchorDate, MatchResult, SeasonMatch};
use seasonmap::shared::AppError;
use tempfile::tempdir;

fn matched_record(id: u32) -> MappingRecord {
    MappingRecord::new(
        id,
        Some("進撃の巨人 Season 2".to_string()),
        Some(1429),
        MatchResult::matched(SeasonMatch {
            season_id: 85987,
            season_number: 2,
            matched_date: AnchorDate::from_ymd(2017, 4, 1).unwrap(),
            day_difference: 0,
        }),
    )
}

#[test]
fn missing_file_opens_empty() {
    let dir = tempdir().unwrap();
    let store = ResultsStore::open(dir.path().join("results.json")).unwrap();
    assert!(store.is_empty());
    assert!(store.processed_ids().is_empty());
}

#[test]
fn append_persists_pretty_utf8_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    let mut store = ResultsStore::open(&path).unwrap();
    store.append(matched_record(20958)).unwrap();
    store.append(MappingRecord::unresolved(5)).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {\n    \"anilist_id\": 20958,"));
    assert!(raw.contains("進撃の巨人"));
    assert!(raw.contains("\"tmdb_season_id\": null"));
    assert!(!dir.path().join("results.json.tmp").exists());

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn reopening_restores_records_and_skips_processed_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    {
        let mut store = ResultsStore::open(&path).unwrap();
        store.append(matched_record(20958)).unwrap();
        store.append(MappingRecord::unresolved(5)).unwrap();
    }

    let store = ResultsStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0], matched_record(20958));
    assert_eq!(
        store.filter_unprocessed(&[5, 7, 20958, 8, 7]),
        vec![7, 8]
    );
}

#[test]
fn corrupt_file_is_an_error_and_left_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");
    fs::write(&path, "[{\"anilist_id\": 1,").unwrap();

    let result = ResultsStore::open(&path);
    assert!(matches!(result, Err(AppError::SerializationError(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"anilist_id\": 1,");
}

#[test]
fn partially_filled_match_columns_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");
    fs::write(
        &path,
        r#"[{
            "anilist_id": 1,
            "title": null,
            "tmdb_show_id": 2,
            "tmdb_season_id": 3,
            "tmdb_season_number": null,
            "matched_date": null,
            "date_difference_days": null
        }]"#,
    )
    .unwrap();

    assert!(ResultsStore::open(&path).is_err());
}

#[test]
fn blank_file_opens_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");
    fs::write(&path, "\n").unwrap();

    assert!(ResultsStore::open(&path).unwrap().is_empty());
}

#[test]
fn store_accepts_pipeline_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    let mut store = ResultsStore::open(&path).unwrap();
    let entry = MappedEntry::new(matched_record(20958), EntryStatus::Matched);
    store.accept(&entry).unwrap();

    assert!(store.processed_ids().contains(&20958));
    assert_eq!(ResultsStore::open(&path).unwrap().len(), 1);
}

#[test]
fn failed_entries_are_not_stored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");

    let mut store = ResultsStore::open(&path).unwrap();
    let failed = MappedEntry::new(
        MappingRecord::new(20958, None, Some(1429), MatchResult::absent()),
        EntryStatus::Failed("Rate limit exceeded: AniList".to_string()),
    );
    store.accept(&failed).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.filter_unprocessed(&[20958]), vec![20958]);
    assert!(!path.exists());
}
