//! Nearest-neighbour search over sparse vectors.
//!
//! Two indices are built at startup: one over item TF-IDF rows (content) and one
//! over user interaction rows (collaborative). Both are exact brute-force cosine
//! searches; distances for a query are computed across all rows in parallel.

mod sparse;

pub use sparse::{cosine_distance, SparseMatrix, SparseRow, SparseVector};

use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// One search hit: row index into the indexed matrix and its cosine distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

impl Neighbor {
    /// `1 - distance`. A relative ranking signal, not a probability.
    pub fn similarity(&self) -> f64 {
        1.0 - self.distance
    }
}

/// Nearest-neighbour structure over a fixed set of rows
#[cfg_attr(test, mockall::automock)]
pub trait SimilarityIndex: Send + Sync {
    /// Up to `k` rows closest to `query`, ascending by distance then row index
    fn nearest(&self, query: &SparseVector, k: usize) -> Vec<Neighbor>;

    /// Up to `k` rows closest to indexed row `row`. The row itself is always
    /// first at distance 0. Out-of-range rows yield an empty list.
    fn nearest_to_row(&self, row: usize, k: usize) -> Vec<Neighbor>;

    fn len(&self) -> usize;
}

/// Exact cosine search over every row
pub struct BruteForceCosineIndex {
    matrix: Arc<SparseMatrix>,
}

impl BruteForceCosineIndex {
    pub fn new(matrix: Arc<SparseMatrix>) -> Self {
        Self { matrix }
    }

    fn search(&self, query: &SparseVector, k: usize, pinned: Option<usize>) -> Vec<Neighbor> {
        let k = k.min(self.matrix.n_rows());
        if k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<Neighbor> = self
            .matrix
            .rows()
            .par_iter()
            .enumerate()
            .map(|(index, row)| Neighbor {
                index,
                distance: if Some(index) == pinned {
                    0.0
                } else {
                    cosine_distance(query, row)
                },
            })
            .collect();

        let order = |a: &Neighbor, b: &Neighbor| -> Ordering {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| (Some(b.index) == pinned).cmp(&(Some(a.index) == pinned)))
                .then_with(|| a.index.cmp(&b.index))
        };

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, order);
            scored.truncate(k);
        }
        scored.sort_by(order);

        debug!(
            rows = self.matrix.n_rows(),
            k = k,
            "Brute-force cosine search completed"
        );

        scored
    }
}

impl SimilarityIndex for BruteForceCosineIndex {
    fn nearest(&self, query: &SparseVector, k: usize) -> Vec<Neighbor> {
        self.search(query, k, None)
    }

    fn nearest_to_row(&self, row: usize, k: usize) -> Vec<Neighbor> {
        match self.matrix.row(row) {
            Some(query) => self.search(query, k, Some(row)),
            None => {
                warn!(
                    row = row,
                    rows = self.matrix.n_rows(),
                    "Query row outside similarity index"
                );
                Vec::new()
            }
        }
    }

    fn len(&self) -> usize {
        self.matrix.n_rows()
    }
}
