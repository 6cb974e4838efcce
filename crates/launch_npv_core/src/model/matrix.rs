//! Dense trial-by-period storage for batched model inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Row-major `[trials × periods]` matrix of `f64`.
///
/// Each row is one trial, each column one period, so a row slice is exactly
/// the per-period vector the scalar model operates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl PeriodMatrix {
    /// Create a matrix with every element set to `fill`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, fill: f64) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from row-major data.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        ModelError::check_len("matrix data", rows * cols, data.len())?;
        Ok(Self { data, rows, cols })
    }

    /// Stack equal-length rows into a matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            ModelError::check_len("matrix row", cols, row.len())?;
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Borrow one trial's period vector.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over trial rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Underlying row-major data
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// One column across all trials, e.g. every trial's period-3 value.
    #[must_use]
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.iter_rows().map(|row| row[col]).collect()
    }

    /// Prefix every row with a zero, turning `[n × k]` growth increments into
    /// `[n × (k + 1)]` rates where period 0 never grows.
    #[must_use]
    pub fn with_leading_zero_column(&self) -> Self {
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in self.iter_rows() {
            data.push(0.0);
            data.extend_from_slice(row);
        }
        Self {
            data,
            rows: self.rows,
            cols,
        }
    }
}
