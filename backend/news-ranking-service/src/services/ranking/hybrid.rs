use crate::config::RecommendationConfig;
use crate::utils::ScoreAccumulator;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridWeights {
    pub collaborative: f64,
    pub content: f64,
}

impl HybridWeights {
    pub fn balanced() -> Self {
        Self {
            collaborative: 0.5,
            content: 0.5,
        }
    }
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

impl From<&RecommendationConfig> for HybridWeights {
    fn from(config: &RecommendationConfig) -> Self {
        Self {
            collaborative: config.hybrid_weight_cf,
            content: config.hybrid_weight_cb,
        }
    }
}

/// Weighted fusion of the collaborative and content lists.
///
/// Every item in the collaborative list gets `collaborative`, every item in
/// the content list gets `content`; an item in both gets the sum. Position
/// inside each list does not matter. Ties keep first-insertion order
/// (collaborative list first, then content list).
#[derive(Debug, Clone, Default)]
pub struct HybridRanker {
    weights: HybridWeights,
}

impl HybridRanker {
    pub fn new(weights: HybridWeights) -> Self {
        Self { weights }
    }

    /// Fused scores for every candidate, best first
    pub fn fuse(&self, collaborative: &[String], content: &[String]) -> Vec<(String, f64)> {
        let mut scores: ScoreAccumulator<String> = ScoreAccumulator::new();

        for item in collaborative {
            scores.add(item.clone(), self.weights.collaborative);
        }
        for item in content {
            scores.add(item.clone(), self.weights.content);
        }

        scores.into_ranked()
    }

    pub fn rank(&self, collaborative: &[String], content: &[String], top_n: usize) -> Vec<String> {
        let fused = self.fuse(collaborative, content);

        debug!(
            collaborative = collaborative.len(),
            content = content.len(),
            fused = fused.len(),
            top_n = top_n,
            "Hybrid fusion completed"
        );

        fused.into_iter().take(top_n).map(|(id, _)| id).collect()
    }
}
