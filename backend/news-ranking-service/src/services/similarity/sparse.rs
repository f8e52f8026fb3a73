use crate::error::{AppError, Result};
use serde::Deserialize;

/// Sparse row vector: column indices ascending, explicit zeros dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
    norm: f64,
}

/// Wire shape of a sparse row inside the artifact files
#[derive(Debug, Clone, Deserialize)]
pub struct SparseRow {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    /// Build from unordered `(column, value)` pairs. Duplicate columns are summed.
    pub fn from_pairs(mut pairs: Vec<(u32, f32)>) -> Self {
        pairs.sort_by_key(|(col, _)| *col);

        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f32> = Vec::with_capacity(pairs.len());
        for (col, value) in pairs {
            match indices.last() {
                Some(&last) if last == col => {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                }
                _ => {
                    indices.push(col);
                    values.push(value);
                }
            }
        }

        let (indices, values): (Vec<u32>, Vec<f32>) = indices
            .into_iter()
            .zip(values)
            .filter(|(_, v)| *v != 0.0)
            .unzip();

        let norm = values
            .iter()
            .map(|v| f64::from(*v) * f64::from(*v))
            .sum::<f64>()
            .sqrt();

        Self {
            indices,
            values,
            norm,
        }
    }

    /// Build from a serialized row, rejecting mismatched lengths and non-finite values
    pub fn from_row(row: SparseRow) -> Result<Self> {
        if row.indices.len() != row.values.len() {
            return Err(AppError::Artifact(format!(
                "sparse row has {} indices but {} values",
                row.indices.len(),
                row.values.len()
            )));
        }
        if let Some(bad) = row.values.iter().find(|v| !v.is_finite()) {
            return Err(AppError::Artifact(format!(
                "sparse row contains non-finite value {}",
                bad
            )));
        }

        Ok(Self::from_pairs(
            row.indices.into_iter().zip(row.values).collect(),
        ))
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn max_index(&self) -> Option<u32> {
        self.indices.last().copied()
    }

    /// Dot product via a merge over the two sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f64;

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(self.values[i]) * f64::from(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// Cosine distance `1 - cos(a, b)`. A zero vector is at distance 1 from everything.
pub fn cosine_distance(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.norm == 0.0 || b.norm == 0.0 {
        return 1.0;
    }
    let similarity = (a.dot(b) / (a.norm * b.norm)).clamp(-1.0, 1.0);
    (1.0 - similarity).max(0.0)
}

/// Row-major sparse matrix
#[derive(Debug, Clone, Default)]
pub struct SparseMatrix {
    rows: Vec<SparseVector>,
    n_cols: usize,
}

impl SparseMatrix {
    pub fn from_rows(rows: Vec<SparseVector>, n_cols: usize) -> Result<Self> {
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(max) = row.max_index() {
                if max as usize >= n_cols {
                    return Err(AppError::Artifact(format!(
                        "row {} references column {} but the matrix has {} columns",
                        row_idx, max, n_cols
                    )));
                }
            }
        }

        Ok(Self { rows, n_cols })
    }

    /// Build from COO triplets `(row, col, value)`; duplicate coordinates are summed
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        entries: &[(usize, usize, f32)],
    ) -> Result<Self> {
        let mut pairs: Vec<Vec<(u32, f32)>> = vec![Vec::new(); n_rows];

        for &(row, col, value) in entries {
            if row >= n_rows || col >= n_cols {
                return Err(AppError::Artifact(format!(
                    "entry ({}, {}) is outside a {}x{} matrix",
                    row, col, n_rows, n_cols
                )));
            }
            if !value.is_finite() {
                return Err(AppError::Artifact(format!(
                    "entry ({}, {}) has non-finite value {}",
                    row, col, value
                )));
            }
            let col = u32::try_from(col)
                .map_err(|_| AppError::Artifact(format!("column {} does not fit u32", col)))?;
            pairs[row].push((col, value));
        }

        let rows = pairs.into_iter().map(SparseVector::from_pairs).collect();
        Ok(Self { rows, n_cols })
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVector::nnz).sum()
    }
}
