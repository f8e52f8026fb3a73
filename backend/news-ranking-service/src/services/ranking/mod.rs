/// Ranking Module
///
/// Final fusion stage of the news recommendation pipeline.
///
/// # Workflow
/// 1. User-based CF list (ranked by summed neighbour similarity)
/// 2. Content-based list (ranked by history vote count)
/// 3. Weighted fusion: each list contributes a flat weight per item it contains
pub mod hybrid;

pub use hybrid::{HybridRanker, HybridWeights};
