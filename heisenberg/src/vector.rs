// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! State vectors: `2^n` complex amplitudes indexed by the binary encoding of the
//! qubit values, qubit 0 being the most significant bit.

use num_complex::Complex64;
use num_traits::{One, Zero};

/// A dense state vector.
pub type Vector = Vec<Complex64>;

/// Returns the single qubit basis vector `|0⟩` or `|1⟩`.
#[must_use]
pub fn basis(bit: bool) -> Vector {
    if bit {
        vec![Complex64::zero(), Complex64::one()]
    } else {
        vec![Complex64::one(), Complex64::zero()]
    }
}

/// Kronecker product of two vectors, `a` supplying the high order bits.
#[must_use]
pub fn tensor(a: &[Complex64], b: &[Complex64]) -> Vector {
    let mut output = Vec::with_capacity(a.len() * b.len());
    for ii in a {
        for jj in b {
            output.push(ii * jj);
        }
    }
    output
}

/// Measurement probability `|amplitude|^2` of every basis state.
#[must_use]
pub fn probabilities(v: &[Complex64]) -> Vec<f64> {
    v.iter().map(Complex64::norm_sqr).collect()
}
