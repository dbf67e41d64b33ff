// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Error types shared by the matrix, machine and optimizer layers.

use crate::Qubit;
use thiserror::Error;

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or simulating a circuit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operand's shape does not line up with the operation, e.g. `A.cols != B.rows`.
    #[error("invalid dimensions: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension required by the left operand.
        expected: usize,
        /// The dimension supplied by the right operand.
        actual: usize,
    },

    /// A gate names a qubit the machine has not initialized.
    #[error("qubit {qubit} is out of range for a machine of {qubits} qubits")]
    InvalidQubit {
        /// The offending qubit index.
        qubit: Qubit,
        /// The number of qubits on the machine.
        qubits: usize,
    },

    /// The same qubit appears twice in a controlled operation.
    #[error("duplicate qubit id '{0}' found in application")]
    DuplicateQubit(Qubit),

    /// A probability specification does not fit the circuit width.
    #[error("invalid probability specification: {0}")]
    InvalidSpecification(String),

    /// Optimizer tunables that cannot produce a search.
    #[error("invalid optimizer configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an invalid qubit error.
    #[must_use]
    pub fn invalid_qubit(qubit: Qubit, qubits: usize) -> Self {
        Self::InvalidQubit { qubit, qubits }
    }
}
