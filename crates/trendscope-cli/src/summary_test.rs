use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use serde_json::json;
use trendscope_core::ClientConfig;
use trendscope_report::{facebook, tiktok};

use super::*;

fn client() -> ClientConfig {
    ClientConfig {
        client: "ucsp".to_string(),
        client_full_name: "Universidad Católica San Pablo".to_string(),
        region: "PE".to_string(),
        category: "Education".to_string(),
        facebook_pages: Vec::new(),
        topic_keywords: Vec::new(),
    }
}

fn files(source: &str) -> WrittenFiles {
    WrittenFiles {
        snapshot: PathBuf::from(format!("data/{source}/{source}_20261018.json")),
        latest: PathBuf::from(format!("data/{source}/latest.json")),
        public_latest: PathBuf::from(format!("public/data/{source}/latest.json")),
    }
}

#[test]
fn meta_summary_lists_files_and_top_five_topics() {
    let mut config = client();
    config.topic_keywords = (1..=7).map(|i| format!("tema{i}")).collect();
    let items: Vec<_> = (1..=7)
        .map(|i| json!({ "pageName": "UCSP", "text": format!("tema{i}") }))
        .collect();
    let generated_at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 5, 0).unwrap();
    let output = PipelineOutput {
        report: facebook::transform(&items, &config, generated_at),
        files: files("meta"),
    };

    let lines = meta_lines(&output);

    assert_eq!(lines[0], "files written:");
    assert_eq!(lines[1], "  data/meta/meta_20261018.json");
    assert_eq!(lines[3], "  public/data/meta/latest.json");
    assert_eq!(lines[4], "ucsp - Universidad Católica San Pablo: 1 pages, 7 posts");
    assert_eq!(lines[5], "top topics:");
    assert_eq!(lines.len(), 6 + 5);
    assert_eq!(lines[6], "  1. Tema1 (1 mentions)");
}

#[test]
fn meta_summary_omits_topics_when_empty() {
    let generated_at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 5, 0).unwrap();
    let output = PipelineOutput {
        report: facebook::empty_report(&client(), generated_at),
        files: files("meta"),
    };
    let lines = meta_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[4].ends_with("0 pages, 0 posts"));
}

#[test]
fn tiktok_summary_lists_counts_and_hashtags() {
    let items = vec![
        json!({ "hashtag": "becas", "views": 2_300_000, "rank": 1 }),
        json!({ "music": "x", "title": "Cumbia" }),
    ];
    let generated_at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 5, 0).unwrap();
    let output = PipelineOutput {
        report: tiktok::transform(&items, &client(), generated_at),
        files: files("tiktok"),
    };

    let lines = tiktok_lines(&output);

    assert_eq!(
        lines[4],
        "ucsp - Universidad Católica San Pablo: 1 hashtags, 1 sounds, 0 creators"
    );
    assert_eq!(lines[5], "top hashtags:");
    assert_eq!(lines[6], "  1. becas (2.3M views)");
}
