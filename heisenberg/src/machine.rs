// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! A quantum machine holds an ordered register of qubits as one state vector and applies
//! gates by expanding them to full-width operators. Qubit 0 is the most significant bit of a
//! basis-state index.

use crate::{
    adaptive::Adaptive, dense::Dense, error::Result, gates, matrix::Matrix,
    nearly_zero::NearlyZero, sparse::Sparse, vector, Error, Qubit,
};
use num_complex::Complex64;
use rustc_hash::FxHashSet;
use std::{
    fmt::{self, Write},
    marker::PhantomData,
};

/// A machine simulating with dense operators.
pub type DenseMachine = Machine<Dense>;
/// A machine simulating with sparse operators.
pub type SparseMachine = Machine<Sparse>;
/// A machine simulating with adaptive operators.
pub type AdaptiveMachine = Machine<Adaptive>;

/// A register of qubits with its state vector. The vector always has `2^qubits` entries once
/// at least one qubit has been added.
#[derive(Debug, Clone)]
pub struct Machine<M> {
    state: vector::Vector,
    qubits: usize,
    representation: PhantomData<M>,
}

impl<M: Matrix> Default for Machine<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Matrix> Machine<M> {
    /// Creates an empty machine with no qubits.
    #[must_use]
    pub fn new() -> Self {
        Machine {
            state: Vec::new(),
            qubits: 0,
            representation: PhantomData,
        }
    }

    /// Adds a qubit initialized to `|0⟩` as the new least significant bit.
    pub fn zero(&mut self) -> Qubit {
        self.push(false)
    }

    /// Adds a qubit initialized to `|1⟩` as the new least significant bit.
    pub fn one(&mut self) -> Qubit {
        self.push(true)
    }

    fn push(&mut self, bit: bool) -> Qubit {
        let qubit = self.qubits;
        let basis = vector::basis(bit);
        self.state = if qubit == 0 {
            basis
        } else {
            vector::tensor(&self.state, &basis)
        };
        self.qubits += 1;
        qubit
    }

    /// The number of qubits added so far.
    #[must_use]
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// The current state vector.
    #[must_use]
    pub fn state(&self) -> &[Complex64] {
        &self.state
    }

    /// Measurement probability of every basis state.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        vector::probabilities(&self.state)
    }

    fn check_qubit(&self, qubit: Qubit) -> Result<()> {
        if qubit < self.qubits {
            Ok(())
        } else {
            Err(Error::invalid_qubit(qubit, self.qubits))
        }
    }

    fn check_for_duplicates(ids: &[Qubit]) -> Result<()> {
        let mut unique = FxHashSet::default();
        for &id in ids {
            if !unique.insert(id) {
                return Err(Error::DuplicateQubit(id));
            }
        }
        Ok(())
    }

    /// Expands a single-qubit `gate` into the full-width operator that applies it to every
    /// qubit in `qubits` and the identity everywhere else. Repeated qubits are applied once.
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `gate` is not 2×2 and [`Error::InvalidQubit`]
    /// when a qubit has not been added to the machine.
    pub fn operator(&self, gate: &M, qubits: &[Qubit]) -> Result<M> {
        if gate.rows() != 2 {
            return Err(Error::dimension_mismatch(2, gate.rows()));
        }
        if gate.cols() != 2 {
            return Err(Error::dimension_mismatch(2, gate.cols()));
        }
        for &qubit in qubits {
            self.check_qubit(qubit)?;
        }
        let targets: FxHashSet<Qubit> = qubits.iter().copied().collect();
        let identity = gates::identity::<M>();
        let pick = |qubit: Qubit| {
            if targets.contains(&qubit) {
                gate
            } else {
                &identity
            }
        };
        let mut operator = pick(0).copy();
        for qubit in 1..self.qubits {
            operator = operator.tensor(pick(qubit));
        }
        Ok(operator)
    }

    /// Applies `gate` to each of `qubits`.
    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit and [`Error::DimensionMismatch`]
    /// when `gate` is not a 2×2 matrix. The state is unchanged on error.
    pub fn apply(&mut self, gate: &M, qubits: &[Qubit]) -> Result<&mut Self> {
        let operator = self.operator(gate, qubits)?;
        self.state = operator.multiply_vector(&self.state)?;
        Ok(self)
    }

    /// Flips `target` in every basis state where all `controls` are one, returning the
    /// permutation operator that was applied. With no controls this is a plain `X`.
    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit and [`Error::DuplicateQubit`] when
    /// a qubit is listed twice or the target is also a control.
    pub fn controlled_not(&mut self, controls: &[Qubit], target: Qubit) -> Result<M> {
        self.check_qubit(target)?;
        for &control in controls {
            self.check_qubit(control)?;
        }
        let mut ids = controls.to_vec();
        ids.push(target);
        Self::check_for_duplicates(&ids)?;

        let identity = gates::identity::<M>();
        let mut operator = identity.copy();
        for _ in 1..self.qubits {
            operator = identity.tensor(&operator);
        }
        let index = controlled_not_permutation(self.qubits, controls, target);
        let operator = operator.permute_rows(&index)?;
        self.state = operator.multiply_vector(&self.state)?;
        Ok(operator)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn i(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::identity(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn h(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::h(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn x(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::x(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn y(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::y(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn z(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::z(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn s(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::s(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn t(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::t(), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::u(theta, phi, lambda), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn rx(&mut self, theta: f64, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::rx(theta), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn ry(&mut self, theta: f64, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::ry(theta), qubits)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit.
    pub fn rz(&mut self, theta: f64, qubits: &[Qubit]) -> Result<&mut Self> {
        self.apply(&gates::rz(theta), qubits)
    }

    /// Reverses the order of `qubits` by swapping the first with the last, the second with
    /// the second to last and so on. Each swap is three controlled-nots.
    /// # Errors
    ///
    /// Returns [`Error::InvalidQubit`] for an unknown qubit and [`Error::DuplicateQubit`] when a
    /// qubit would be swapped with itself.
    pub fn swap(&mut self, qubits: &[Qubit]) -> Result<&mut Self> {
        for &qubit in qubits {
            self.check_qubit(qubit)?;
        }
        let length = qubits.len();
        let pairs: Vec<(Qubit, Qubit)> = (0..length / 2)
            .map(|i| (qubits[i], qubits[length - 1 - i]))
            .collect();
        if let Some(&(c, _)) = pairs.iter().find(|(c, t)| c == t) {
            return Err(Error::DuplicateQubit(c));
        }
        for (c, t) in pairs {
            self.controlled_not(&[c], t)?;
            self.controlled_not(&[t], c)?;
            self.controlled_not(&[c], t)?;
        }
        Ok(self)
    }

    /// Renders the non-zero amplitudes as `STATE: [ |index⟩: amplitude, ... ]`.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut output = String::new();
        output
            .write_str("STATE: [ ")
            .expect("Failed to write output");
        for (index, value) in self.state.iter().enumerate() {
            if !value.is_nearly_zero() {
                write!(output, "|{index}\u{27e9}: {value}, ").expect("Failed to write output");
            }
        }
        output.write_str("]").expect("Failed to write output");
        output
    }
}

impl<M> fmt::Display for Machine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.state {
            write!(f, "{value:.6} ")?;
        }
        Ok(())
    }
}

/// Row permutation of the `2^qubits` identity implementing a controlled-not: a basis index
/// whose control bits are all set maps to the same index with the target bit flipped.
#[must_use]
pub fn controlled_not_permutation(qubits: usize, controls: &[Qubit], target: Qubit) -> Vec<usize> {
    let bit = |qubit: Qubit| 1_usize << (qubits - 1 - qubit);
    let mask = controls.iter().fold(0, |acc, &control| acc | bit(control));
    let flip = bit(target);
    (0..1_usize << qubits)
        .map(|i| if i & mask == mask { i ^ flip } else { i })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::Cutoff;
    use core::f64::consts::PI;
    use num_traits::{One, Zero};

    fn assert_probabilities<M: Matrix>(machine: &Machine<M>, expected: &[f64]) {
        let actual = machine.probabilities();
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    fn check_controlled_not<M: Matrix>() {
        let mut machine = Machine::<M>::new();
        let q0 = machine.one();
        let q1 = machine.one();
        let q2 = machine.zero();
        let a = machine.controlled_not(&[q0], q2).unwrap();
        assert!(machine.state()[7].is_one());
        let b = machine.controlled_not(&[q0, q1], q2).unwrap();
        for (i, amplitude) in machine.state().iter().enumerate() {
            if i == 6 {
                assert!(amplitude.is_one());
            } else {
                assert!(amplitude.is_zero());
            }
        }

        // a flips q2 under q0 alone, b only when q1 is also set.
        assert!(!a.approx_eq(&b));
        assert!(a.get(4, 5).is_one());
        assert!(b.get(4, 4).is_one());
        assert!(a.get(6, 7).is_one() && b.get(6, 7).is_one());

        let c = b.multiply(&a).unwrap();
        let mut d = c.copy();
        d.transpose();
        assert!(c.approx_eq(&d));
        assert!(c.is_unitary());
    }

    #[test]
    fn test_controlled_not_dense() {
        check_controlled_not::<Dense>();
    }

    #[test]
    fn test_controlled_not_sparse() {
        check_controlled_not::<Sparse>();
    }

    #[test]
    fn test_controlled_not_adaptive() {
        check_controlled_not::<Adaptive>();
    }

    fn check_swap<M: Matrix>() {
        let mut machine = Machine::<M>::new();
        let q0 = machine.zero();
        let q1 = machine.one();
        machine.swap(&[q0, q1]).unwrap();
        assert_probabilities(&machine, &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_swap_all_representations() {
        check_swap::<Dense>();
        check_swap::<Sparse>();
        check_swap::<Adaptive>();
    }

    #[test]
    fn test_swap_reverses_register() {
        let mut machine = SparseMachine::new();
        let q0 = machine.one();
        let q1 = machine.zero();
        let q2 = machine.zero();
        machine.swap(&[q0, q1, q2]).unwrap();
        // |100⟩ becomes |001⟩, the middle qubit stays put.
        assert!(machine.state()[1].is_one());
    }

    fn check_full_rotations<M: Matrix>() {
        let mut machine = Machine::<M>::new();
        let q0 = machine.zero();
        machine.rx(4.0 * PI, &[q0]).unwrap();
        assert_probabilities(&machine, &[1.0, 0.0]);
        machine.ry(4.0 * PI, &[q0]).unwrap();
        assert_probabilities(&machine, &[1.0, 0.0]);
        machine.rz(4.0 * PI, &[q0]).unwrap();
        assert_probabilities(&machine, &[1.0, 0.0]);
        assert!((machine.state()[0] - Complex64::one()).is_nearly_zero());
    }

    #[test]
    fn test_full_rotations_all_representations() {
        check_full_rotations::<Dense>();
        check_full_rotations::<Sparse>();
        check_full_rotations::<Adaptive>();
    }

    #[test]
    fn test_h_targets_least_significant_qubit() {
        let mut machine = DenseMachine::new();
        let _ = machine.zero();
        let q1 = machine.zero();
        machine.h(&[q1]).unwrap();
        assert_probabilities(&machine, &[0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_bell_pair() {
        let mut machine = AdaptiveMachine::new();
        let q0 = machine.zero();
        let q1 = machine.zero();
        machine.h(&[q0]).unwrap();
        machine.controlled_not(&[q0], q1).unwrap();
        assert_probabilities(&machine, &[0.5, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_gates_chain() {
        let mut machine = SparseMachine::new();
        let q0 = machine.zero();
        machine
            .x(&[q0])
            .and_then(|m| m.z(&[q0]))
            .and_then(|m| m.x(&[q0]))
            .unwrap();
        assert!((machine.state()[0] + Complex64::one()).is_nearly_zero());
    }

    #[test]
    fn test_controlled_not_twice_is_identity() {
        let mut machine = SparseMachine::new();
        let q0 = machine.zero();
        let q1 = machine.zero();
        let q2 = machine.one();
        machine.h(&[q0, q1]).unwrap();
        machine.t(&[q1]).unwrap();
        let before = machine.state().to_vec();
        machine.controlled_not(&[q0, q1], q2).unwrap();
        machine.controlled_not(&[q0, q1], q2).unwrap();
        for (a, b) in machine.state().iter().zip(&before) {
            assert!((a - b).is_nearly_zero());
        }
    }

    #[test]
    fn test_controlled_not_without_controls_is_x() {
        let mut machine = DenseMachine::new();
        let _ = machine.zero();
        let q1 = machine.zero();
        machine.controlled_not(&[], q1).unwrap();
        assert!(machine.state()[1].is_one());
    }

    #[test]
    fn test_operator_shape_and_repeated_qubits() {
        let mut machine = SparseMachine::new();
        let q0 = machine.zero();
        let _ = machine.zero();
        let _ = machine.zero();
        let operator = machine.operator(&gates::x(), &[q0, q0]).unwrap();
        assert_eq!((operator.rows(), operator.cols()), (8, 8));
        assert_eq!(operator.non_zero(), 8);
        machine.x(&[q0, q0]).unwrap();
        assert!(machine.state()[4].is_one());
    }

    #[test]
    fn test_invalid_qubit_leaves_state_untouched() {
        let mut machine = SparseMachine::new();
        let q0 = machine.zero();
        machine.h(&[q0]).unwrap();
        let before = machine.state().to_vec();
        assert_eq!(machine.x(&[3]).err(), Some(Error::invalid_qubit(3, 1)));
        assert_eq!(
            machine.controlled_not(&[q0], 1).err(),
            Some(Error::invalid_qubit(1, 1))
        );
        assert_eq!(machine.state(), before.as_slice());
    }

    #[test]
    fn test_controlled_not_rejects_duplicates() {
        let mut machine = DenseMachine::new();
        let q0 = machine.zero();
        let q1 = machine.zero();
        assert_eq!(
            machine.controlled_not(&[q0, q0], q1).err(),
            Some(Error::DuplicateQubit(q0))
        );
        assert_eq!(
            machine.controlled_not(&[q1], q1).err(),
            Some(Error::DuplicateQubit(q1))
        );
    }

    #[test]
    fn test_non_square_gate_is_rejected() {
        let mut machine = DenseMachine::new();
        let q0 = machine.zero();
        let gate = Dense::zeros(2, 3);
        assert!(matches!(
            machine.apply(&gate, &[q0]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(machine.state()[0].is_one());
        assert!(machine.state()[1].is_zero());
    }

    #[test]
    fn test_wide_gate_keeps_register_size() {
        let mut machine = DenseMachine::new();
        let q0 = machine.zero();
        let _ = machine.zero();
        let gate = Dense::from_entries(1, 2, &[Complex64::one(), Complex64::one()]).unwrap();
        assert_eq!(
            machine.apply(&gate, &[q0]).err(),
            Some(Error::dimension_mismatch(2, 1))
        );
        assert_eq!(
            machine.operator(&Dense::zeros(2, 1), &[q0]).err(),
            Some(Error::dimension_mismatch(2, 1))
        );
        assert_eq!(machine.state().len(), 4);
        assert!(machine.state()[0].is_one());
        let q2 = machine.zero();
        machine.controlled_not(&[q0], q2).unwrap();
        assert_eq!(machine.state().len(), 8);
    }

    #[test]
    fn test_operator_keeps_gate_cutoff() {
        let cutoff = Cutoff {
            percent: 0.1,
            size: 1,
        };
        let h = gates::h::<Adaptive>();
        let mut gate = Adaptive::with_cutoff(2, 2, cutoff);
        for (k, value) in h.entries().into_iter().enumerate() {
            gate.set(k / 2, k % 2, value);
        }
        let mut adaptive = AdaptiveMachine::new();
        let mut dense = DenseMachine::new();
        for _ in 0..3 {
            let _ = adaptive.zero();
            let _ = dense.zero();
        }
        let operator = adaptive.operator(&gate, &[0, 2]).unwrap();
        assert_eq!(operator.dense_rows(), 8);
        adaptive.apply(&gate, &[0, 2]).unwrap();
        adaptive.controlled_not(&[0], 1).unwrap();
        dense.h(&[0, 2]).unwrap();
        dense.controlled_not(&[0], 1).unwrap();
        for (a, d) in adaptive.state().iter().zip(dense.state()) {
            assert!((a - d).is_nearly_zero());
        }
    }

    #[test]
    fn test_dump() {
        let mut machine = SparseMachine::new();
        let q0 = machine.zero();
        let _ = machine.one();
        machine.x(&[q0]).unwrap();
        assert_eq!(machine.dump(), "STATE: [ |3\u{27e9}: 1+0i, ]");
    }

    #[test]
    fn test_permutation_uses_most_significant_bit_first() {
        assert_eq!(
            controlled_not_permutation(3, &[0], 2),
            vec![0, 1, 2, 3, 5, 4, 7, 6]
        );
        assert_eq!(controlled_not_permutation(2, &[], 0), vec![2, 3, 0, 1]);
    }
}
