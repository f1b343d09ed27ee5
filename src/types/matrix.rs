// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Row-major `f64` matrix used for both vector sets and codebooks.

use crate::error::{Result, VqError};
use core::ops::{Index, IndexMut};

/// One contiguous allocation of `rows * cols` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    cols: usize,
}

impl Matrix {
    /// Creates a matrix with all zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            cols,
        }
    }

    /// Wraps an existing buffer. `data.len()` must be a multiple of `cols`.
    pub fn from_vec(data: Vec<f64>, cols: usize) -> Result<Self> {
        if cols == 0 {
            if !data.is_empty() {
                return Err(VqError::DimensionMismatch { expected: 0, found: data.len() });
            }
        } else if data.len() % cols != 0 {
            return Err(VqError::DimensionMismatch {
                expected: cols,
                found: data.len() % cols,
            });
        }
        Ok(Self { data, cols })
    }

    /// Builds a matrix from equally sized rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(VqError::DimensionMismatch { expected: cols, found: row.len() });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, cols })
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.data.len() / self.cols
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterates rows in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // chunks_exact panics on zero; an empty slice yields no rows either way
        self.data.chunks_exact(self.cols.max(1))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sets every value to zero without reallocating.
    pub fn fill_zero(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0.0);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Self::Output {
        &mut self.data[r * self.cols + c]
    }
}

/// Squared Euclidean distance. No square root is taken anywhere; only ordering matters.
pub fn l2_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
