// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::many_single_char_names)]

//! # Heisenberg
//! A small state-vector quantum simulator with interchangeable dense, sparse and adaptive
//! matrix representations, plus a genetic optimizer that searches for gate sequences whose
//! measurement probabilities match a target.
//!
//! ```
//! use heisenberg::{SparseMachine, Result};
//!
//! fn bell() -> Result<Vec<f64>> {
//!     let mut machine = SparseMachine::new();
//!     let q0 = machine.zero();
//!     let q1 = machine.zero();
//!     machine.h(&[q0])?;
//!     machine.controlled_not(&[q0], q1)?;
//!     Ok(machine.probabilities())
//! }
//! # assert!((bell().unwrap()[3] - 0.5).abs() < 1e-12);
//! ```

pub mod adaptive;
pub mod dense;
pub mod error;
pub mod gates;
pub mod genome;
pub mod machine;
pub mod matrix;
mod nearly_zero;
pub mod optimizer;
pub mod population;
pub mod sparse;
pub mod vector;

// Cross-checks every representation against direct ndarray computation.
#[cfg(test)]
mod matrix_testing;

/// Index of a qubit within a machine, in the order qubits were added.
pub type Qubit = usize;

pub use adaptive::{Adaptive, Cutoff};
pub use dense::Dense;
pub use error::{Error, Result};
pub use genome::{Gate, GateKind, GateWeights, Genome, ProbabilitySpec};
pub use machine::{AdaptiveMachine, DenseMachine, Machine, SparseMachine};
pub use matrix::Matrix;
pub use nearly_zero::{NearlyZero, EPSILON};
pub use optimizer::{optimize, Optimizer, OptimizerConfig, Outcome, Representation};
pub use population::Population;
pub use sparse::Sparse;
pub use vector::Vector;
