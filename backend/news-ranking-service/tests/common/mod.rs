#![allow(dead_code)]

use news_ranking_service::config::RecommendationConfig;
use news_ranking_service::{load_from_directory, NewsRecommendationEngine};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const ITEMS: [&str; 8] = ["a1", "a2", "a3", "b1", "b2", "b3", "c1", "c2"];

/// Eight articles in three topics (a / b / c) and five readers.
///
/// reader-1 reads topic a, reader-2 topics a and b, reader-3 topic b,
/// reader-4 topic c, reader-5 nothing.
pub fn write_artifacts(dir: &Path) {
    let catalog: Vec<_> = ITEMS
        .iter()
        .enumerate()
        .map(|(i, id)| {
            json!({
                "page": id,
                "title": format!("Title {}", id),
                "caption": format!("Caption {}", id),
                "body": format!("Body of {}", id),
                "url": format!("https://news.example/{}", id),
                "issued": format!("2022-08-{:02}T09:00:00Z", 10 + i),
                "visits": 100 - 10 * i,
                "timeOnPage": 30 + 5 * i,
            })
        })
        .collect();

    let features = json!({
        "item_ids": ITEMS,
        "n_features": 6,
        "rows": [
            { "indices": [0, 3], "values": [1.0, 0.1] },
            { "indices": [0, 4], "values": [0.9, 0.2] },
            { "indices": [0, 5], "values": [0.8, 0.3] },
            { "indices": [1, 3], "values": [1.0, 0.1] },
            { "indices": [1, 4], "values": [0.9, 0.2] },
            { "indices": [1, 5], "values": [0.8, 0.3] },
            { "indices": [2, 3], "values": [1.0, 0.2] },
            { "indices": [2, 4], "values": [0.9, 0.3] },
        ],
    });

    let interactions = json!({
        "user_ids": ["reader-1", "reader-2", "reader-3", "reader-4", "reader-5"],
        "item_ids": ITEMS,
        "entries": [
            [0, 0, 1.0], [0, 1, 1.0],
            [1, 0, 1.0], [1, 1, 1.0], [1, 2, 1.0], [1, 3, 1.0],
            [2, 3, 1.0], [2, 4, 1.0], [2, 5, 1.0],
            [3, 6, 1.0],
        ],
    });

    fs::write(dir.join("catalog.json"), serde_json::to_vec(&catalog).unwrap()).unwrap();
    fs::write(
        dir.join("content_features.json"),
        serde_json::to_vec(&features).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.join("interactions.json"),
        serde_json::to_vec(&interactions).unwrap(),
    )
    .unwrap();
}

pub fn artifacts_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    dir
}

pub fn engine() -> NewsRecommendationEngine {
    let dir = artifacts_dir();
    let artifacts = load_from_directory(dir.path(), 0).unwrap();
    NewsRecommendationEngine::new(artifacts, &RecommendationConfig::default())
}

/// Items the fixture says `user` has read
pub fn history(user: &str) -> Vec<&'static str> {
    match user {
        "reader-1" => vec!["a1", "a2"],
        "reader-2" => vec!["a1", "a2", "a3", "b1"],
        "reader-3" => vec!["b1", "b2", "b3"],
        "reader-4" => vec!["c1"],
        _ => vec![],
    }
}
