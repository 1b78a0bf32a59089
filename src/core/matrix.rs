// matrix.rs - Square dissimilarity matrix

use serde::{Deserialize, Serialize};

/// Summary statistics over the off-diagonal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixStats {
    pub pairs: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Symmetric, zero-diagonal dissimilarity matrix with one label per row/column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// All-zero matrix sized to `labels`
    pub fn zeros(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self {
            labels,
            values: vec![0.0; n * n],
        }
    }

    /// Build from the upper triangle, one row per index `i` holding columns `i + 1..n`
    pub(crate) fn from_upper_rows(labels: Vec<String>, upper_rows: Vec<Vec<f64>>) -> Self {
        let mut matrix = Self::zeros(labels);
        let n = matrix.len();
        for (i, row) in upper_rows.into_iter().enumerate() {
            debug_assert_eq!(row.len(), n - i - 1);
            for (offset, distance) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                matrix.values[i * n + j] = distance;
                matrix.values[j * n + i] = distance;
            }
        }
        matrix
    }

    /// Replace the labels, keeping the values. The label count must match.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, String> {
        if labels.len() != self.len() {
            return Err(format!(
                "Cannot relabel a {}x{} matrix with {} labels",
                self.len(),
                self.len(),
                labels.len()
            ));
        }
        self.labels = labels;
        Ok(self)
    }

    /// Check that there are exactly n*n values for n labels
    pub fn check_shape(&self) -> Result<(), String> {
        let n = self.len();
        if self.values.len() != n * n {
            return Err(format!(
                "Matrix has {} labels but {} values (expected {})",
                n,
                self.values.len(),
                n * n
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Cell (i, j). Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let n = self.len();
        assert!(i < n && j < n, "index ({}, {}) out of range for {}x{} matrix", i, j, n, n);
        self.values[i * n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.len();
        &self.values[i * n..(i + 1) * n]
    }

    /// Nested rows, for callers that want `Vec<Vec<f64>>`
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.len()).map(|i| self.row(i).to_vec()).collect()
    }

    /// Upper triangle (i < j) flattened row-major, length n(n-1)/2
    pub fn condensed(&self) -> Vec<f64> {
        let n = self.len();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            out.extend_from_slice(&self.row(i)[i + 1..]);
        }
        out
    }

    /// Check symmetry and the zero diagonal exactly
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            self.get(i, i) == 0.0 && (i + 1..n).all(|j| self.get(i, j) == self.get(j, i))
        })
    }

    pub fn stats(&self) -> Option<MatrixStats> {
        let condensed = self.condensed();
        if condensed.is_empty() {
            return None;
        }
        let (min, max, sum) = condensed.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &d| (min.min(d), max.max(d), sum + d),
        );
        Some(MatrixStats {
            pairs: condensed.len(),
            min,
            max,
            mean: sum / condensed.len() as f64,
        })
    }
}
