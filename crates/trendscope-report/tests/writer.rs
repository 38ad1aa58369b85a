use std::fs;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use trendscope_core::ClientConfig;
use trendscope_report::{facebook, tiktok, ResultWriter};

fn client() -> ClientConfig {
    ClientConfig {
        client: "ucsp".to_string(),
        client_full_name: "Universidad Católica San Pablo".to_string(),
        region: "PE".to_string(),
        category: "Education".to_string(),
        facebook_pages: vec!["https://www.facebook.com/ucsp".to_string()],
        topic_keywords: Vec::new(),
    }
}

#[test]
fn persist_writes_three_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ResultWriter::new(dir.path());
    let generated_at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 5, 0).unwrap();
    let items = vec![json!({ "hashtag": "becas", "views": 1500, "rank": 2 })];
    let report = tiktok::transform(&items, &client(), generated_at);

    let files = writer.persist(&report, tiktok::SOURCE_NAME).unwrap();

    assert_eq!(
        files.snapshot,
        dir.path().join("data/tiktok/tiktok_20261018.json")
    );
    assert_eq!(files.latest, dir.path().join("data/tiktok/latest.json"));
    assert_eq!(
        files.public_latest,
        dir.path().join("public/data/tiktok/latest.json")
    );

    let snapshot = fs::read(&files.snapshot).unwrap();
    assert_eq!(fs::read(&files.latest).unwrap(), snapshot);
    assert_eq!(fs::read(&files.public_latest).unwrap(), snapshot);

    let body = String::from_utf8(snapshot).unwrap();
    assert!(body.contains('\n'), "output should be pretty-printed");
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["trends"]["hashtags"][0]["hashtag"], "becas");
    assert_eq!(value["trends"]["hashtags"][0]["views"], "1.5K");
    assert_eq!(value["timestamp"], "2026-10-18T07:05:00.000Z");
}

#[test]
fn rerun_on_same_day_overwrites_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ResultWriter::new(dir.path());

    let morning = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2026, 10, 18, 20, 30, 0).unwrap();

    let first = facebook::transform(
        &[json!({ "pageName": "UCSP", "text": "becas" })],
        &client(),
        morning,
    );
    let second = facebook::transform(
        &[json!({ "pageName": "UCSP", "text": "admisión" }), json!({ "pageName": "UNSA" })],
        &client(),
        evening,
    );

    writer.persist(&first, facebook::SOURCE_NAME).unwrap();
    let files = writer.persist(&second, facebook::SOURCE_NAME).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path().join("data/meta"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 2, "expected snapshot + latest, got {entries:?}");

    let latest: Value = serde_json::from_slice(&fs::read(&files.public_latest).unwrap()).unwrap();
    assert_eq!(latest["metadata"]["posts_fetched"], 2);
    assert_eq!(latest["timestamp"], "2026-10-18T20:30:00.000Z");
}

#[test]
fn persist_reports_unwritable_root() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();

    let writer = ResultWriter::new(&blocker);
    let report = facebook::empty_report(&client(), Utc::now());
    let err = writer.persist(&report, facebook::SOURCE_NAME).unwrap_err();

    assert!(matches!(err, trendscope_report::ReportError::Io { .. }));
    assert!(!blocker.join("data").exists());
}
