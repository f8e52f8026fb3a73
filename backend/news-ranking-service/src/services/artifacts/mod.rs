//! Precomputed model artifacts
//!
//! Expected directory layout (JSON):
//!   catalog.json           [{ page, title, caption, body, url, issued, visits, timeOnPage }, ...]
//!   content_features.json  { item_ids: [...], n_features: N, rows: [{ indices, values }, ...] }
//!   interactions.json      { user_ids: [...], item_ids: [...], entries: [[row, col, weight], ...] }
//!
//! Anything missing or inconsistent fails the load; the service must not start
//! with partial data.

use crate::error::{AppError, Result};
use crate::models::NewsItem;
use crate::services::catalog::{Catalog, CatalogProvider, UserDirectory};
use crate::services::recall::{ContentModel, InteractionModel};
use crate::services::similarity::{BruteForceCosineIndex, SparseMatrix, SparseRow, SparseVector};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const CATALOG_FILE: &str = "catalog.json";
pub const CONTENT_FEATURES_FILE: &str = "content_features.json";
pub const INTERACTIONS_FILE: &str = "interactions.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ContentFeatures {
    pub item_ids: Vec<String>,
    pub n_features: usize,
    pub rows: Vec<SparseRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Interactions {
    pub user_ids: Vec<String>,
    pub item_ids: Vec<String>,
    pub entries: Vec<(usize, usize, f32)>,
}

/// Everything the engine needs, validated and shared read-only
pub struct LoadedArtifacts {
    pub catalog: Arc<Catalog>,
    pub content: Arc<ContentModel>,
    pub interactions: Arc<InteractionModel>,
    pub content_features: usize,
    pub interaction_count: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Load and validate all artifacts under `dir`
pub fn load_from_directory(dir: impl AsRef<Path>, users_sample_size: usize) -> Result<LoadedArtifacts> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(AppError::Artifact(format!(
            "artifacts directory not found: {}",
            dir.display()
        )));
    }

    let items: Vec<NewsItem> = read_json(&dir.join(CATALOG_FILE))?;
    let features: ContentFeatures = read_json(&dir.join(CONTENT_FEATURES_FILE))?;
    let interactions: Interactions = read_json(&dir.join(INTERACTIONS_FILE))?;

    build(items, features, interactions, users_sample_size)
}

/// Validate already-deserialized artifacts and build the shared models
pub fn build(
    items: Vec<NewsItem>,
    features: ContentFeatures,
    interactions: Interactions,
    users_sample_size: usize,
) -> Result<LoadedArtifacts> {
    let catalog = Arc::new(Catalog::new(items)?);
    ensure_in_catalog(&catalog, &features.item_ids, CONTENT_FEATURES_FILE)?;
    ensure_in_catalog(&catalog, &interactions.item_ids, INTERACTIONS_FILE)?;

    let (content, content_features) = build_content_model(features)?;
    let content = Arc::new(content);

    let interaction_count = interactions.entries.len();
    let interactions = Arc::new(build_interaction_model(interactions, users_sample_size)?);

    info!(
        catalog_items = catalog.len(),
        content_items = content.len(),
        content_features = content_features,
        users = interactions.users().len(),
        interaction_items = interactions.item_count(),
        interactions = interaction_count,
        "Model artifacts loaded"
    );

    Ok(LoadedArtifacts {
        catalog,
        content,
        interactions,
        content_features,
        interaction_count,
        loaded_at: Utc::now(),
    })
}

/// Content model plus its feature count
fn build_content_model(features: ContentFeatures) -> Result<(ContentModel, usize)> {
    if features.item_ids.len() != features.rows.len() {
        return Err(AppError::Artifact(format!(
            "{}: {} item ids but {} feature rows",
            CONTENT_FEATURES_FILE,
            features.item_ids.len(),
            features.rows.len()
        )));
    }
    ensure_unique(&features.item_ids, CONTENT_FEATURES_FILE)?;

    let rows = features
        .rows
        .into_iter()
        .map(SparseVector::from_row)
        .collect::<Result<Vec<_>>>()?;
    let matrix = Arc::new(SparseMatrix::from_rows(rows, features.n_features)?);
    let n_features = matrix.n_cols();

    let model = ContentModel::new(
        features.item_ids,
        Arc::new(BruteForceCosineIndex::new(matrix)),
    );
    Ok((model, n_features))
}

fn build_interaction_model(
    interactions: Interactions,
    users_sample_size: usize,
) -> Result<InteractionModel> {
    ensure_unique(&interactions.item_ids, INTERACTIONS_FILE)?;

    let matrix = Arc::new(SparseMatrix::from_triplets(
        interactions.user_ids.len(),
        interactions.item_ids.len(),
        &interactions.entries,
    )?);
    let users = UserDirectory::new(interactions.user_ids, users_sample_size)?;
    let index = Arc::new(BruteForceCosineIndex::new(matrix.clone()));

    Ok(InteractionModel::new(
        users,
        interactions.item_ids,
        matrix,
        index,
    ))
}

fn ensure_unique(ids: &[String], source: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(AppError::Artifact(format!(
                "{}: duplicate item id {}",
                source, id
            )));
        }
    }
    Ok(())
}

/// Every model item must resolve to a catalog entry
fn ensure_in_catalog(catalog: &Catalog, ids: &[String], source: &str) -> Result<()> {
    match ids.iter().find(|id| catalog.get(id).is_none()) {
        Some(id) => Err(AppError::Artifact(format!(
            "{}: item id {} is not in {}",
            source, id, CATALOG_FILE
        ))),
        None => Ok(()),
    }
}

fn read_json<T: DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        AppError::Artifact(format!("cannot open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::Artifact(format!("{}: {}", path.display(), e)))
}
