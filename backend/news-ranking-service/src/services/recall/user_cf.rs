use super::InteractionModel;
use crate::utils::ScoreAccumulator;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// User-based collaborative filtering
///
/// Algorithm:
/// 1. Pull the `n_neighbors` users closest to the target's interaction row
///    (cosine distance; the target itself comes back first and is skipped)
/// 2. similarity = 1 - distance
/// 3. Add that similarity to every item the neighbour interacted with,
///    except items the target already consumed
/// 4. Rank by summed similarity and map columns back to item ids
///
/// Unknown users and users with an empty row get the popularity ranking.
pub struct UserBasedRecommender {
    interactions: Arc<InteractionModel>,
    popular: Arc<Vec<String>>,
    n_neighbors: usize,
}

impl UserBasedRecommender {
    /// `popular` is the full popularity ranking of the catalog, best first
    pub fn new(
        interactions: Arc<InteractionModel>,
        popular: Arc<Vec<String>>,
        n_neighbors: usize,
    ) -> Self {
        Self {
            interactions,
            popular,
            n_neighbors,
        }
    }

    pub fn recommend(&self, user_id: Option<&str>, top_n: usize) -> Vec<String> {
        let row = user_id.and_then(|id| self.interactions.users().row_of(id));
        let own_items = row.and_then(|r| self.interactions.matrix().row(r));

        let (row, own_items) = match (row, own_items) {
            (Some(row), Some(items)) if !items.is_empty() => (row, items),
            _ => {
                debug!(
                    user_id = user_id.unwrap_or("<anonymous>"),
                    "No interaction history, using popularity ranking"
                );
                return self.popular_top(top_n);
            }
        };

        let consumed: HashSet<u32> = own_items.indices().iter().copied().collect();
        let neighbors = self
            .interactions
            .index()
            .nearest_to_row(row, self.n_neighbors);

        let mut scores: ScoreAccumulator<u32> = ScoreAccumulator::new();
        for neighbor in &neighbors {
            if neighbor.index == row {
                continue;
            }
            let Some(neighbor_items) = self.interactions.matrix().row(neighbor.index) else {
                continue;
            };

            let similarity = neighbor.similarity();
            for &column in neighbor_items.indices() {
                if consumed.contains(&column) {
                    continue;
                }
                scores.add(column, similarity);
            }
        }

        let candidate_count = scores.len();
        let recommended: Vec<String> = scores
            .top_keys(top_n)
            .into_iter()
            .filter_map(|column| self.interactions.item_at(column as usize).map(str::to_string))
            .collect();

        info!(
            user_id = user_id.unwrap_or_default(),
            neighbors = neighbors.len().saturating_sub(1),
            candidate_items = candidate_count,
            returned = recommended.len(),
            "User-based CF recommendations generated"
        );

        recommended
    }

    fn popular_top(&self, top_n: usize) -> Vec<String> {
        self.popular.iter().take(top_n).cloned().collect()
    }
}
