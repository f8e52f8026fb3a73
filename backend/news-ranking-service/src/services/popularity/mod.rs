//! Popularity ranking for cold-start users
//!
//! Used whenever there is no interaction history to personalize from.
//!
//! Algorithm:
//! - Recency: 1 / (days_since + 1), where days are counted back from the newest
//!   `issued` timestamp in the catalog rather than the wall clock, so a static
//!   snapshot always ranks the same way
//! - Visits and time-on-page: min-max normalized over the whole catalog
//! - Score = w_recency * recency + w_visits * visits_norm + w_time * time_norm
//!
//! Ties keep catalog order.

use crate::config::RecommendationConfig;
use crate::models::NewsItem;
use crate::utils::{min_max_normalize, recency_score};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityWeights {
    pub recency: f64,
    pub visits: f64,
    pub time_on_page: f64,
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            recency: 0.3,
            visits: 0.4,
            time_on_page: 0.3,
        }
    }
}

impl From<&RecommendationConfig> for PopularityWeights {
    fn from(config: &RecommendationConfig) -> Self {
        Self {
            recency: config.popularity_weight_recency,
            visits: config.popularity_weight_visits,
            time_on_page: config.popularity_weight_time,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PopularityRanker {
    weights: PopularityWeights,
}

impl PopularityRanker {
    pub fn new(weights: PopularityWeights) -> Self {
        Self { weights }
    }

    /// Composite popularity score for every item, in catalog order
    pub fn score(&self, items: &[NewsItem]) -> Vec<f64> {
        let Some(reference) = items.iter().map(|item| item.issued).max() else {
            return Vec::new();
        };

        let visits: Vec<f64> = items.iter().map(|item| item.visits).collect();
        let time_on_page: Vec<f64> = items.iter().map(|item| item.time_on_page).collect();
        let visits_norm = min_max_normalize(&visits);
        let time_norm = min_max_normalize(&time_on_page);

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let days_since = (reference - item.issued).num_days();
                self.weights.recency * recency_score(days_since)
                    + self.weights.visits * visits_norm[idx]
                    + self.weights.time_on_page * time_norm[idx]
            })
            .collect()
    }

    /// Top `top_n` item ids by popularity, best first
    pub fn rank(&self, items: &[NewsItem], top_n: usize) -> Vec<String> {
        let scores = self.score(items);

        let mut order: Vec<usize> = (0..items.len()).collect();
        // Stable: equal scores keep catalog order
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            catalog_size = items.len(),
            top_n = top_n,
            "Popularity ranking computed"
        );

        order
            .into_iter()
            .take(top_n)
            .map(|idx| items[idx].page.clone())
            .collect()
    }
}
