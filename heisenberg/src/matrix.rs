// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! The algebraic surface shared by every matrix representation. Dense, sparse and adaptive
//! matrices differ only in how rows are stored; machines are generic over this trait so the
//! same gate logic runs on all of them.

use crate::{error::Result, nearly_zero::NearlyZero, vector::Vector, Error};
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt;

/// A `rows × cols` complex matrix.
pub trait Matrix: Clone + fmt::Display + Send + Sync + Sized {
    /// Creates an all-zero matrix of the given shape.
    fn zeros(rows: usize, cols: usize) -> Self;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Reads the entry at `(row, col)`, absent entries being zero.
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    fn get(&self, row: usize, col: usize) -> Complex64;

    /// Writes the entry at `(row, col)`. Representations that track non-zero entries never
    /// store an explicit zero.
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    fn set(&mut self, row: usize, col: usize, value: Complex64);

    /// Kronecker product. Entry `(x * b.rows + y, i * b.cols + j)` of the result is
    /// `self[x, i] * other[y, j]`.
    #[must_use]
    fn tensor(&self, other: &Self) -> Self;

    /// Matrix product `self * other`.
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `self.cols() != other.rows()`.
    fn multiply(&self, other: &Self) -> Result<Self>;

    /// Transposes the matrix in place, swapping `rows` and `cols`.
    fn transpose(&mut self);

    /// Replaces every entry with its complex conjugate.
    fn conjugate(&mut self);

    /// Matrix-vector product, used to apply an operator to a state vector.
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `self.cols() != v.len()`.
    fn multiply_vector(&self, v: &[Complex64]) -> Result<Vector>;

    /// Builds a matrix whose row `i` is a copy of row `index[i]` of this matrix.
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `index` does not have one entry per row or
    /// names a row that does not exist.
    fn permute_rows(&self, index: &[usize]) -> Result<Self>;

    /// Builds a matrix from entries listed in row-major order.
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `entries.len() != rows * cols`.
    fn from_entries(rows: usize, cols: usize, entries: &[Complex64]) -> Result<Self> {
        if entries.len() != rows * cols {
            return Err(Error::dimension_mismatch(rows * cols, entries.len()));
        }
        let mut output = Self::zeros(rows, cols);
        for (k, value) in entries.iter().enumerate() {
            output.set(k / cols, k % cols, *value);
        }
        Ok(output)
    }

    /// The `n × n` identity.
    #[must_use]
    fn identity(n: usize) -> Self {
        let mut output = Self::zeros(n, n);
        for i in 0..n {
            output.set(i, i, Complex64::one());
        }
        output
    }

    /// Deep copy with independent storage.
    #[must_use]
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Conjugate transpose.
    #[must_use]
    fn adjoint(&self) -> Self {
        let mut output = self.clone();
        output.transpose();
        output.conjugate();
        output
    }

    /// Every entry in row-major order.
    fn entries(&self) -> Vec<Complex64> {
        let mut output = Vec::with_capacity(self.rows() * self.cols());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                output.push(self.get(i, j));
            }
        }
        output
    }

    /// Compares two matrices of any representation entry by entry within floating tolerance.
    fn approx_eq<N: Matrix>(&self, other: &N) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && (0..self.rows()).all(|i| {
                (0..self.cols()).all(|j| (self.get(i, j) - other.get(i, j)).is_nearly_zero())
            })
    }

    /// Checks that `self * adjoint(self)` is the identity.
    fn is_unitary(&self) -> bool {
        self.rows() == self.cols()
            && self
                .multiply(&self.adjoint())
                .is_ok_and(|product| product.approx_eq(&Self::identity(self.rows())))
    }
}

/// Shared `Display` body: one line per row, entries separated by spaces.
pub(crate) fn display<M: Matrix>(matrix: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for i in 0..matrix.rows() {
        for j in 0..matrix.cols() {
            let value = matrix.get(i, j);
            if value.is_zero() {
                write!(f, "0 ")?;
            } else {
                write!(f, "{value:.6} ")?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Validates a row permutation against a matrix with `rows` rows.
pub(crate) fn check_permutation(rows: usize, index: &[usize]) -> Result<()> {
    if index.len() != rows {
        return Err(Error::dimension_mismatch(rows, index.len()));
    }
    if let Some(&bad) = index.iter().find(|&&row| row >= rows) {
        return Err(Error::dimension_mismatch(rows, bad));
    }
    Ok(())
}
