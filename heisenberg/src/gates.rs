// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Canonical 2×2 unitaries, built in whichever representation the caller simulates with.

use crate::matrix::Matrix;
use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use num_complex::Complex64;
use num_traits::{One, Zero};

fn gate<M: Matrix>(entries: [Complex64; 4]) -> M {
    let mut output = M::zeros(2, 2);
    for (k, value) in entries.into_iter().enumerate() {
        output.set(k / 2, k % 2, value);
    }
    output
}

/// Returns a unitary matrix representing the identity operation.
#[must_use]
pub fn identity<M: Matrix>() -> M {
    M::identity(2)
}

/// Returns a unitary matrix representing the single-qubit Hadamard transformation.
#[must_use]
pub fn h<M: Matrix>() -> M {
    let v = Complex64::new(FRAC_1_SQRT_2, 0.0);
    gate([v, v, v, -v])
}

/// Returns a unitary matrix representing the `X` operation.
#[must_use]
pub fn x<M: Matrix>() -> M {
    gate([
        Complex64::zero(),
        Complex64::one(),
        Complex64::one(),
        Complex64::zero(),
    ])
}

/// Returns a unitary matrix representing the `Y` operation.
#[must_use]
pub fn y<M: Matrix>() -> M {
    gate([
        Complex64::zero(),
        -Complex64::i(),
        Complex64::i(),
        Complex64::zero(),
    ])
}

/// Returns a unitary matrix representing the `Z` operation.
#[must_use]
pub fn z<M: Matrix>() -> M {
    gate([
        Complex64::one(),
        Complex64::zero(),
        Complex64::zero(),
        -Complex64::one(),
    ])
}

/// Returns a unitary matrix representing the `S` (phase) operation.
#[must_use]
pub fn s<M: Matrix>() -> M {
    gate([
        Complex64::one(),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::i(),
    ])
}

/// Returns a unitary matrix representing the `T` operation, `diag(1, e^{iπ/4})`.
#[must_use]
pub fn t<M: Matrix>() -> M {
    gate([
        Complex64::one(),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::from_polar(1.0, FRAC_PI_4),
    ])
}

/// Returns the general single-qubit rotation `U(θ, φ, λ)`.
#[must_use]
pub fn u<M: Matrix>(theta: f64, phi: f64, lambda: f64) -> M {
    let (sin, cos) = (theta / 2.0).sin_cos();
    gate([
        Complex64::new(cos, 0.0),
        -Complex64::from_polar(sin, lambda),
        Complex64::from_polar(sin, phi),
        Complex64::from_polar(cos, phi + lambda),
    ])
}

/// Returns a unitary matrix representing the `Rx` operation with the given angle.
#[must_use]
pub fn rx<M: Matrix>(theta: f64) -> M {
    let (sin, cos) = (theta / 2.0).sin_cos();
    gate([
        Complex64::new(cos, 0.0),
        Complex64::new(0.0, -sin),
        Complex64::new(0.0, -sin),
        Complex64::new(cos, 0.0),
    ])
}

/// Returns a unitary matrix representing the `Ry` operation with the given angle.
#[must_use]
pub fn ry<M: Matrix>(theta: f64) -> M {
    let (sin, cos) = (theta / 2.0).sin_cos();
    gate([
        Complex64::new(cos, 0.0),
        Complex64::new(-sin, 0.0),
        Complex64::new(sin, 0.0),
        Complex64::new(cos, 0.0),
    ])
}

/// Returns a unitary matrix representing the `Rz` operation with the given angle.
#[must_use]
pub fn rz<M: Matrix>(theta: f64) -> M {
    gate([
        Complex64::from_polar(1.0, -theta / 2.0),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::from_polar(1.0, theta / 2.0),
    ])
}
