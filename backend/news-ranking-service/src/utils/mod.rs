// Utility functions for news-ranking-service

use std::collections::HashMap;
use std::hash::Hash;

/// Epsilon added to min-max denominators so constant columns do not divide by zero
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Min-max normalize `values` into [0, 1].
///
/// When every value is equal the result is all zeros instead of NaN.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min + NORMALIZE_EPSILON;

    values.iter().map(|v| (v - min) / range).collect()
}

/// Recency score: 1 / (whole days since the reference + 1)
pub fn recency_score(days_since: i64) -> f64 {
    1.0 / (days_since.max(0) as f64 + 1.0)
}

/// Additive score map that remembers first-insertion order.
///
/// `into_ranked` sorts descending by score; equal scores keep insertion order.
#[derive(Debug, Clone)]
pub struct ScoreAccumulator<K> {
    positions: HashMap<K, usize>,
    entries: Vec<(K, f64)>,
}

impl<K: Eq + Hash + Clone> Default for ScoreAccumulator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> ScoreAccumulator<K> {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K, score: f64) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 += score,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, score));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.positions.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_ranked(self) -> Vec<(K, f64)> {
        let mut ranked = self.entries;
        // Vec::sort_by is stable
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Keys of the `n` best entries, best first
    pub fn top_keys(self, n: usize) -> Vec<K> {
        self.into_ranked()
            .into_iter()
            .take(n)
            .map(|(key, _)| key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_normalize() {
        let norm = min_max_normalize(&[10.0, 50.0, 100.0]);
        assert!((norm[0] - 0.0).abs() < 1e-6);
        assert!((norm[1] - 40.0 / 90.0).abs() < 1e-6);
        assert!((norm[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_max_normalize_constant_column() {
        let norm = min_max_normalize(&[7.0, 7.0, 7.0]);
        assert!(norm.iter().all(|v| *v == 0.0));
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn test_recency_score() {
        assert_eq!(recency_score(0), 1.0);
        assert!((recency_score(9) - 0.1).abs() < 1e-12);
        assert_eq!(recency_score(-3), 1.0);
    }

    #[test]
    fn test_accumulator_adds_and_keeps_insertion_order_on_ties() {
        let mut acc = ScoreAccumulator::new();
        acc.add("b", 0.5);
        acc.add("a", 0.5);
        acc.add("c", 0.5);
        acc.add("c", 0.5);

        assert_eq!(acc.len(), 3);
        assert_eq!(acc.get(&"c"), Some(1.0));
        assert_eq!(acc.top_keys(3), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_accumulator_top_keys_truncates() {
        let mut acc = ScoreAccumulator::new();
        for (i, key) in ["x", "y", "z"].into_iter().enumerate() {
            acc.add(key, i as f64);
        }
        assert_eq!(acc.top_keys(2), vec!["z", "y"]);
    }
}
