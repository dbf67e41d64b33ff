// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Adaptive matrices choose a storage form per row. Every row starts sparse and is promoted to
//! a dense array once it holds more than [`Cutoff::size`] entries *and* more than
//! [`Cutoff::percent`] of the row is populated. Promotion only ever goes from sparse to dense.

use crate::{
    error::Result,
    matrix::{self, Matrix},
    sparse::SparseRow,
    vector::Vector,
    Error,
};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

/// Default fraction of populated columns above which a row is promoted.
pub const CUTOFF_PERCENT: f64 = 0.1;

/// Default number of stored entries above which a row may be promoted.
pub const CUTOFF_SIZE: usize = 256;

/// The sparse-to-dense promotion thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoff {
    pub percent: f64,
    pub size: usize,
}

impl Default for Cutoff {
    fn default() -> Self {
        Cutoff {
            percent: CUTOFF_PERCENT,
            size: CUTOFF_SIZE,
        }
    }
}

impl Cutoff {
    /// Whether a sparse row storing `len` entries out of `cols` columns must become dense.
    /// Both thresholds have to be strictly exceeded.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn promotes(&self, len: usize, cols: usize) -> bool {
        len > self.size && len as f64 / cols as f64 > self.percent
    }
}

/// Storage for a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Dense(Vec<Complex64>),
    Sparse(SparseRow),
}

impl Default for Row {
    fn default() -> Self {
        Row::Sparse(SparseRow::default())
    }
}

impl Row {
    /// Builds a row from accumulated non-zero entries, promoting it when it is dense enough.
    fn from_sparse(values: SparseRow, cols: usize, cutoff: Cutoff) -> Self {
        let mut row = Row::Sparse(values);
        if cutoff.promotes(row.non_zero(), cols) {
            row.promote(cols);
        }
        row
    }

    #[must_use]
    pub fn is_dense(&self) -> bool {
        matches!(self, Row::Dense(_))
    }

    /// The number of non-zero entries in the row.
    #[must_use]
    pub fn non_zero(&self) -> usize {
        match self {
            Row::Dense(values) => values.iter().filter(|v| !v.is_zero()).count(),
            Row::Sparse(values) => values.len(),
        }
    }

    fn get(&self, col: usize) -> Complex64 {
        match self {
            Row::Dense(values) => values[col],
            Row::Sparse(values) => values.get(&col).copied().unwrap_or_else(Complex64::zero),
        }
    }

    fn set(&mut self, col: usize, value: Complex64, cols: usize, cutoff: Cutoff) {
        let promote = match self {
            Row::Dense(values) => {
                values[col] = value;
                false
            }
            Row::Sparse(values) => {
                if value.is_zero() {
                    values.remove(&col);
                    false
                } else {
                    values.insert(col, value);
                    cutoff.promotes(values.len(), cols)
                }
            }
        };
        if promote {
            self.promote(cols);
        }
    }

    fn promote(&mut self, cols: usize) {
        let dense = match self {
            Row::Dense(_) => return,
            Row::Sparse(values) => {
                let mut dense = vec![Complex64::zero(); cols];
                for (&col, &value) in values.iter() {
                    dense[col] = value;
                }
                dense
            }
        };
        *self = Row::Dense(dense);
    }

    /// Iterates the non-zero `(column, value)` entries of the row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Complex64)> + '_ {
        let (dense, sparse) = match self {
            Row::Dense(values) => (Some(values), None),
            Row::Sparse(values) => (None, Some(values)),
        };
        dense
            .into_iter()
            .flat_map(|values| {
                values
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, value)| !value.is_zero())
            })
            .chain(
                sparse
                    .into_iter()
                    .flat_map(|values| values.iter().map(|(&col, &value)| (col, value))),
            )
    }

    fn conjugate(&mut self) {
        match self {
            Row::Dense(values) => values.iter_mut().for_each(|v| *v = v.conj()),
            Row::Sparse(values) => values.values_mut().for_each(|v| *v = v.conj()),
        }
    }
}

/// A matrix whose rows are independently dense or sparse. Products, tensors and row
/// permutations keep the cutoff of the left operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Adaptive {
    rows: usize,
    cols: usize,
    cutoff: Cutoff,
    matrix: Vec<Row>,
}

impl Adaptive {
    /// Creates an all-zero matrix with custom promotion thresholds.
    #[must_use]
    pub fn with_cutoff(rows: usize, cols: usize, cutoff: Cutoff) -> Self {
        Adaptive {
            rows,
            cols,
            cutoff,
            matrix: vec![Row::default(); rows],
        }
    }

    #[must_use]
    pub fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &Row {
        &self.matrix[i]
    }

    /// The number of rows currently stored densely.
    #[must_use]
    pub fn dense_rows(&self) -> usize {
        self.matrix.iter().filter(|row| row.is_dense()).count()
    }
}

impl Matrix for Adaptive {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self::with_cutoff(rows, cols, Cutoff::default())
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> Complex64 {
        assert!(col < self.cols, "column {col} out of range");
        self.matrix[row].get(col)
    }

    fn set(&mut self, row: usize, col: usize, value: Complex64) {
        assert!(col < self.cols, "column {col} out of range");
        self.matrix[row].set(col, value, self.cols, self.cutoff);
    }

    fn tensor(&self, other: &Self) -> Self {
        let cols = self.cols * other.cols;
        let mut output = Vec::with_capacity(self.rows * other.rows);
        for xx in &self.matrix {
            for yy in &other.matrix {
                let mut values = SparseRow::default();
                for (i, ii) in xx.iter() {
                    for (j, jj) in yy.iter() {
                        let value = ii * jj;
                        if !value.is_zero() {
                            values.insert(i * other.cols + j, value);
                        }
                    }
                }
                output.push(Row::from_sparse(values, cols, self.cutoff));
            }
        }
        Adaptive {
            rows: self.rows * other.rows,
            cols,
            cutoff: self.cutoff,
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
                for (y, value) in xx.iter() {
                    for (j, jj) in other.matrix[y].iter() {
                        *values.entry(j).or_insert_with(Complex64::zero) += value * jj;
                    }
                }
                values.retain(|_, v| !v.is_zero());
                Row::from_sparse(values, other.cols, self.cutoff)
            })
            .collect();
        Ok(Adaptive {
            rows: self.rows,
            cols: other.cols,
            cutoff: self.cutoff,
            matrix,
        })
    }

    fn transpose(&mut self) {
        let mut output = vec![Row::default(); self.cols];
        for (i, row) in self.matrix.iter().enumerate() {
            for (j, value) in row.iter() {
                output[j].set(i, value, self.rows, self.cutoff);
            }
        }
        self.matrix = output;
        std::mem::swap(&mut self.rows, &mut self.cols);
    }

    fn conjugate(&mut self) {
        self.matrix.iter_mut().for_each(Row::conjugate);
    }

    fn multiply_vector(&self, v: &[Complex64]) -> Result<Vector> {
        if self.cols != v.len() {
            return Err(Error::dimension_mismatch(self.cols, v.len()));
        }
        Ok(self
            .matrix
            .iter()
            .map(|row| row.iter().map(|(y, value)| value * v[y]).sum())
            .collect())
    }

    fn permute_rows(&self, index: &[usize]) -> Result<Self> {
        matrix::check_permutation(self.rows, index)?;
        Ok(Adaptive {
            rows: self.rows,
            cols: self.cols,
            cutoff: self.cutoff,
            matrix: index.iter().map(|&row| self.matrix[row].clone()).collect(),
        })
    }
}

impl fmt::Display for Adaptive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        matrix::display(self, f)
    }
}
