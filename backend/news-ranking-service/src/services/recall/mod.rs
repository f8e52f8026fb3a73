mod content_expansion;
mod related_items;
mod user_cf;

use crate::services::catalog::UserDirectory;
use crate::services::similarity::{SimilarityIndex, SparseMatrix};
use std::collections::HashMap;
use std::sync::Arc;

pub use content_expansion::ContentBasedExpander;
pub use related_items::RelatedItemsLookup;
pub use user_cf::UserBasedRecommender;

/// Content side: one TF-IDF row per item, plus the index built over those rows
pub struct ContentModel {
    item_ids: Vec<String>,
    rows: HashMap<String, usize>,
    index: Arc<dyn SimilarityIndex>,
}

impl ContentModel {
    /// `item_ids[i]` must name row `i` of the index
    pub fn new(item_ids: Vec<String>, index: Arc<dyn SimilarityIndex>) -> Self {
        let rows = item_ids
            .iter()
            .enumerate()
            .map(|(row, id)| (id.clone(), row))
            .collect();

        Self {
            item_ids,
            rows,
            index,
        }
    }

    pub fn row_of(&self, item_id: &str) -> Option<usize> {
        self.rows.get(item_id).copied()
    }

    pub fn item_at(&self, row: usize) -> Option<&str> {
        self.item_ids.get(row).map(String::as_str)
    }

    pub fn index(&self) -> &dyn SimilarityIndex {
        self.index.as_ref()
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }
}

/// Collaborative side: user x item implicit-feedback matrix, the user index
/// over its rows, and the fixed column -> item id list
pub struct InteractionModel {
    users: UserDirectory,
    item_ids: Vec<String>,
    matrix: Arc<SparseMatrix>,
    index: Arc<dyn SimilarityIndex>,
}

impl InteractionModel {
    pub fn new(
        users: UserDirectory,
        item_ids: Vec<String>,
        matrix: Arc<SparseMatrix>,
        index: Arc<dyn SimilarityIndex>,
    ) -> Self {
        Self {
            users,
            item_ids,
            matrix,
            index,
        }
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    pub fn index(&self) -> &dyn SimilarityIndex {
        self.index.as_ref()
    }

    pub fn item_at(&self, column: usize) -> Option<&str> {
        self.item_ids.get(column).map(String::as_str)
    }

    pub fn item_count(&self) -> usize {
        self.item_ids.len()
    }

    /// Items the user at `row` has interacted with, in column order
    pub fn history(&self, row: usize) -> Vec<String> {
        self.matrix
            .row(row)
            .map(|r| {
                r.indices()
                    .iter()
                    .filter_map(|&col| self.item_at(col as usize).map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// History for a user id; empty for unknown users
    pub fn history_of(&self, user_id: &str) -> Vec<String> {
        self.users
            .row_of(user_id)
            .map(|row| self.history(row))
            .unwrap_or_default()
    }
}
