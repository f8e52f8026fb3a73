use super::RelatedItemsLookup;
use crate::utils::ScoreAccumulator;
use std::collections::HashSet;
use tracing::debug;

/// Content-based candidate expansion
///
/// Algorithm:
/// 1. For each history item, take its `top_k` related items from the content index
/// 2. Skip anything already in the history
/// 3. Count how many history items voted for each candidate
/// 4. Rank by vote count (first-seen order breaks ties)
///
/// The score is a vote count, not a similarity sum: an item related to many
/// history items beats one that is very close to a single item.
pub struct ContentBasedExpander {
    related: RelatedItemsLookup,
    top_k: usize,
}

impl ContentBasedExpander {
    pub fn new(related: RelatedItemsLookup, top_k: usize) -> Self {
        Self { related, top_k }
    }

    /// Vote counts for candidates, ranked
    pub fn votes(&self, history: &[String]) -> Vec<(String, f64)> {
        let consumed: HashSet<&str> = history.iter().map(String::as_str).collect();
        let mut votes: ScoreAccumulator<String> = ScoreAccumulator::new();

        for item in history {
            for candidate in self.related.related(item, self.top_k) {
                if consumed.contains(candidate.as_str()) {
                    continue;
                }
                votes.add(candidate, 1.0);
            }
        }

        debug!(
            history_len = history.len(),
            candidates = votes.len(),
            "Content-based expansion completed"
        );

        votes.into_ranked()
    }

    /// Best `limit` candidate ids
    pub fn expand(&self, history: &[String], limit: usize) -> Vec<String> {
        self.votes(history)
            .into_iter()
            .take(limit)
            .map(|(id, _)| id)
            .collect()
    }
}
