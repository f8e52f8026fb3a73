mod common;

use news_ranking_service::{load_from_directory, AppError};
use std::fs;

#[test]
fn test_load_fixture_directory() {
    let dir = common::artifacts_dir();
    let loaded = load_from_directory(dir.path(), 3).unwrap();

    assert_eq!(loaded.catalog.len(), common::ITEMS.len());
    assert_eq!(loaded.content.len(), common::ITEMS.len());
    assert_eq!(loaded.content_features, 6);
    assert_eq!(loaded.interactions.users().len(), 5);
    assert_eq!(loaded.interaction_count, 10);
    assert_eq!(loaded.interactions.history_of("reader-3"), vec!["b1", "b2", "b3"]);
}

#[test]
fn test_missing_file_is_fatal() {
    for file in ["catalog.json", "content_features.json", "interactions.json"] {
        let dir = common::artifacts_dir();
        fs::remove_file(dir.path().join(file)).unwrap();

        match load_from_directory(dir.path(), 0) {
            Err(AppError::Artifact(msg)) => assert!(msg.contains(file), "{}", msg),
            Err(other) => panic!("unexpected error for {}: {}", file, other),
            Ok(_) => panic!("load succeeded without {}", file),
        }
    }
}

#[test]
fn test_corrupt_json_is_fatal() {
    let dir = common::artifacts_dir();
    fs::write(dir.path().join("interactions.json"), b"{\"user_ids\": [").unwrap();

    assert!(matches!(
        load_from_directory(dir.path(), 0),
        Err(AppError::Artifact(_))
    ));
}

#[test]
fn test_non_finite_feature_value_is_fatal() {
    let dir = common::artifacts_dir();
    let raw = r#"{"item_ids": ["a1"], "n_features": 1, "rows": [{"indices": [0], "values": [1e999]}]}"#;
    fs::write(dir.path().join("content_features.json"), raw).unwrap();

    assert!(load_from_directory(dir.path(), 0).is_err());
}

#[test]
fn test_catalog_without_popularity_fields_is_fatal() {
    let dir = common::artifacts_dir();
    let raw = serde_json::json!(common::ITEMS
        .iter()
        .map(|id| serde_json::json!({
            "page": id,
            "title": id,
            "url": format!("https://news.example/{}", id),
            "issued": "2022-08-10T09:00:00Z",
        }))
        .collect::<Vec<_>>());
    fs::write(dir.path().join("catalog.json"), raw.to_string()).unwrap();

    match load_from_directory(dir.path(), 0) {
        Err(AppError::Artifact(msg)) => assert!(msg.contains("catalog.json"), "{}", msg),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("catalog without visits / timeOnPage was accepted"),
    }
}

#[test]
fn test_interaction_items_must_exist_in_catalog() {
    let dir = common::artifacts_dir();
    let raw = serde_json::json!({
        "user_ids": ["reader-1"],
        "item_ids": ["a1", "x1", "x2", "x3"],
        "entries": [[0, 0, 1.0], [0, 1, 1.0]],
    });
    fs::write(dir.path().join("interactions.json"), raw.to_string()).unwrap();

    match load_from_directory(dir.path(), 0) {
        Err(AppError::Artifact(msg)) => {
            assert!(msg.contains("interactions.json") && msg.contains("x1"), "{}", msg)
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("interaction items outside the catalog were accepted"),
    }
}

#[test]
fn test_content_items_must_exist_in_catalog() {
    let dir = common::artifacts_dir();
    let raw = serde_json::json!({
        "item_ids": ["a1", "zz"],
        "n_features": 6,
        "rows": [
            { "indices": [0], "values": [1.0] },
            { "indices": [1], "values": [1.0] },
        ],
    });
    fs::write(dir.path().join("content_features.json"), raw.to_string()).unwrap();

    assert!(matches!(
        load_from_directory(dir.path(), 0),
        Err(AppError::Artifact(msg)) if msg.contains("zz")
    ));
}
