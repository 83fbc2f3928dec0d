//! End-to-end export of a fixture report.

use super::common::seeded_sqlite;
use fitclub_report::export::save_to_json;
use std::fs;

#[tokio::test]
async fn test_saved_report_round_trips() {
    let (_pool, runner) = seeded_sqlite().await;
    let report = runner.run_all(1).await.unwrap();
    runner.close().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.json");
    save_to_json(&report, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"Существуют\""));
    assert!(text.contains("\n    \"exists_instructors\""));
    assert!(!text.contains("\\u"));

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, report.to_json());

    let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
    assert_eq!(keys.first().map(|k| k.as_str()), Some("exists_instructors"));
    assert_eq!(keys.last().map(|k| k.as_str()), Some("full_join_query"));
}

#[tokio::test]
async fn test_null_cells_are_exported_as_json_null() {
    let (_pool, runner) = seeded_sqlite().await;
    let report = runner.run_all(1).await.unwrap();

    let json = report.to_json();
    let left = json["left_join_query"].as_array().unwrap();
    let olga = left
        .iter()
        .find(|r| r["first_name"] == "Ольга")
        .unwrap();
    assert!(olga["section_name"].is_null());
}
