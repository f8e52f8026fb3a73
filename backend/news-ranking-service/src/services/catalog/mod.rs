use crate::error::{AppError, Result};
use crate::models::NewsItem;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Metadata lookup for news items
pub trait CatalogProvider: Send + Sync {
    fn get(&self, id: &str) -> Option<&NewsItem>;

    /// Items for `ids` in request order. Unknown ids are skipped.
    fn news_info(&self, ids: &[String]) -> Vec<NewsItem> {
        ids.iter().filter_map(|id| self.get(id)).cloned().collect()
    }
}

/// Source of known user identifiers
pub trait UserListProvider: Send + Sync {
    fn list_users(&self) -> Vec<String>;
}

/// In-memory news catalog keyed by `page`
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<NewsItem>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(items: Vec<NewsItem>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if by_id.insert(item.page.clone(), idx).is_some() {
                return Err(AppError::Artifact(format!(
                    "duplicate news id in catalog: {}",
                    item.page
                )));
            }
        }

        Ok(Self { items, by_id })
    }

    /// Items in catalog order
    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn get(&self, id: &str) -> Option<&NewsItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }
}

/// Known users and their row in the interaction matrix
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    user_ids: Vec<String>,
    rows: HashMap<String, usize>,
    sample_size: usize,
}

impl UserDirectory {
    pub fn new(user_ids: Vec<String>, sample_size: usize) -> Result<Self> {
        let mut rows = HashMap::with_capacity(user_ids.len());
        for (row, id) in user_ids.iter().enumerate() {
            if rows.insert(id.clone(), row).is_some() {
                return Err(AppError::Artifact(format!("duplicate user id: {}", id)));
            }
        }

        Ok(Self {
            user_ids,
            rows,
            sample_size,
        })
    }

    pub fn row_of(&self, user_id: &str) -> Option<usize> {
        self.rows.get(user_id).copied()
    }

    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }
}

impl UserListProvider for UserDirectory {
    fn list_users(&self) -> Vec<String> {
        if self.sample_size == 0 || self.sample_size >= self.user_ids.len() {
            return self.user_ids.clone();
        }

        let mut rng = rand::thread_rng();
        self.user_ids
            .choose_multiple(&mut rng, self.sample_size)
            .cloned()
            .collect()
    }
}
