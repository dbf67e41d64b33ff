// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Sparse matrices stored as one column-to-value map per row. Gate and permutation matrices
//! carry at most two non-zero entries per row, so most of a `2^n × 2^n` operator is never
//! materialized.

use crate::{
    error::Result,
    matrix::{self, Matrix},
    vector::Vector,
    Error,
};
use num_complex::Complex64;
use num_traits::Zero;
use rustc_hash::FxHashMap;
use std::fmt;

/// The non-zero entries of a single row, keyed by column.
pub type SparseRow = FxHashMap<usize, Complex64>;

/// A row-wise sparse matrix. An absent key reads as zero and stored values are never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparse {
    rows: usize,
    cols: usize,
    matrix: Vec<SparseRow>,
}

impl Sparse {
    /// The stored entries of row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &SparseRow {
        &self.matrix[i]
    }

    /// The number of stored (non-zero) entries.
    #[must_use]
    pub fn non_zero(&self) -> usize {
        self.matrix.iter().map(SparseRow::len).sum()
    }
}

impl Matrix for Sparse {
    fn zeros(rows: usize, cols: usize) -> Self {
        Sparse {
            rows,
            cols,
            matrix: vec![SparseRow::default(); rows],
        }
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> Complex64 {
        assert!(col < self.cols, "column {col} out of range");
        self.matrix[row]
            .get(&col)
            .copied()
            .unwrap_or_else(Complex64::zero)
    }

    fn set(&mut self, row: usize, col: usize, value: Complex64) {
        assert!(col < self.cols, "column {col} out of range");
        if value.is_zero() {
            self.matrix[row].remove(&col);
        } else {
            self.matrix[row].insert(col, value);
        }
    }

    fn tensor(&self, other: &Self) -> Self {
        let mut output = Vec::with_capacity(self.rows * other.rows);
        for xx in &self.matrix {
            for yy in &other.matrix {
                let mut values =
                    SparseRow::with_capacity_and_hasher(xx.len() * yy.len(), Default::default());
                for (&i, ii) in xx {
                    for (&j, jj) in yy {
                        let value = ii * jj;
                        if !value.is_zero() {
                            values.insert(i * other.cols + j, value);
                        }
                    }
                }
                output.push(values);
            }
        }
        Sparse {
            rows: self.rows * other.rows,
            cols: self.cols * other.cols,
            matrix: output,
        }
    }

    fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::dimension_mismatch(self.cols, other.rows));
        }
        let matrix = self
            .matrix
            .iter()
            .map(|xx| {
                let mut values = SparseRow::default();
                for (&y, value) in xx {
                    for (&j, jj) in &other.matrix[y] {
                        *values.entry(j).or_insert_with(Complex64::zero) += value * jj;
                    }
                }
                // Cancellation can leave explicit zeros behind.
                values.retain(|_, v| !v.is_zero());
                values
            })
            .collect();
        Ok(Sparse {
            rows: self.rows,
            cols: other.cols,
            matrix,
        })
    }

    fn transpose(&mut self) {
        let mut output = vec![SparseRow::default(); self.cols];
        for (i, row) in self.matrix.drain(..).enumerate() {
            for (j, value) in row {
                output[j].insert(i, value);
            }
        }
        self.matrix = output;
        std::mem::swap(&mut self.rows, &mut self.cols);
    }

    fn conjugate(&mut self) {
        for row in &mut self.matrix {
            for value in row.values_mut() {
                *value = value.conj();
            }
        }
    }

    fn multiply_vector(&self, v: &[Complex64]) -> Result<Vector> {
        if self.cols != v.len() {
            return Err(Error::dimension_mismatch(self.cols, v.len()));
        }
        Ok(self
            .matrix
            .iter()
            .map(|row| row.iter().map(|(&y, value)| value * v[y]).sum())
            .collect())
    }

    fn permute_rows(&self, index: &[usize]) -> Result<Self> {
        matrix::check_permutation(self.rows, index)?;
        Ok(Sparse {
            rows: self.rows,
            cols: self.cols,
            matrix: index.iter().map(|&row| self.matrix[row].clone()).collect(),
        })
    }
}

impl fmt::Display for Sparse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        matrix::display(self, f)
    }
}
