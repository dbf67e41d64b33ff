// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Dense matrices stored as a flat row-major array.

use crate::{
    error::Result,
    matrix::{self, Matrix},
    vector::Vector,
    Error,
};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

/// A row-major dense matrix. The backing array always holds exactly `rows * cols` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    rows: usize,
    cols: usize,
    matrix: Vec<Complex64>,
}

impl Dense {
    /// Wraps a row-major array.
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `matrix.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, matrix: Vec<Complex64>) -> Result<Self> {
        if matrix.len() != rows * cols {
            return Err(Error::dimension_mismatch(rows * cols, matrix.len()));
        }
        Ok(Dense { rows, cols, matrix })
    }

    /// The backing row-major array.
    #[must_use]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.matrix
    }

    /// The entries of row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Complex64] {
        &self.matrix[i * self.cols..(i + 1) * self.cols]
    }
}

impl Matrix for Dense {
    fn zeros(rows: usize, cols: usize) -> Self {
        Dense {
            rows,
            cols,
            matrix: vec![Complex64::zero(); rows * cols],
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
        self.matrix[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, value: Complex64) {
        assert!(col < self.cols, "column {col} out of range");
        self.matrix[row * self.cols + col] = value;
    }

    fn tensor(&self, other: &Self) -> Self {
        let mut output = Vec::with_capacity(self.matrix.len() * other.matrix.len());
        for x in 0..self.rows {
            for y in 0..other.rows {
                for ii in self.row(x) {
                    for jj in other.row(y) {
                        output.push(ii * jj);
                    }
                }
            }
        }
        Dense {
            rows: self.rows * other.rows,
            cols: self.cols * other.cols,
            matrix: output,
        }
    }

    fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::dimension_mismatch(self.cols, other.rows));
        }
        let mut output = Self::zeros(self.rows, other.cols);
        for x in 0..self.rows {
            for (y, value) in self.row(x).iter().enumerate() {
                if value.is_zero() {
                    continue;
                }
                for (j, jj) in other.row(y).iter().enumerate() {
                    output.matrix[x * other.cols + j] += value * jj;
                }
            }
        }
        Ok(output)
    }

    fn transpose(&mut self) {
        let mut output = vec![Complex64::zero(); self.matrix.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                output[j * self.rows + i] = self.matrix[i * self.cols + j];
            }
        }
        self.matrix = output;
        std::mem::swap(&mut self.rows, &mut self.cols);
    }

    fn conjugate(&mut self) {
        for value in &mut self.matrix {
            *value = value.conj();
        }
    }

    fn multiply_vector(&self, v: &[Complex64]) -> Result<Vector> {
        if self.cols != v.len() {
            return Err(Error::dimension_mismatch(self.cols, v.len()));
        }
        Ok((0..self.rows)
            .map(|x| self.row(x).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    fn permute_rows(&self, index: &[usize]) -> Result<Self> {
        matrix::check_permutation(self.rows, index)?;
        let mut output = Vec::with_capacity(self.matrix.len());
        for &row in index {
            output.extend_from_slice(self.row(row));
        }
        Ok(Dense {
            rows: self.rows,
            cols: self.cols,
            matrix: output,
        })
    }
}

impl fmt::Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        matrix::display(self, f)
    }
}
