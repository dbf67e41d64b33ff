// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

use core::f64::consts::{FRAC_1_SQRT_2, PI};
use ndarray::{array, linalg::kron, Array1, Array2};
use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::{
    adaptive::Adaptive, dense::Dense, gates, machine::Machine, matrix::Matrix,
    nearly_zero::NearlyZero, sparse::Sparse,
};

/// Returns a unitary matrix representing the `X` operation.
#[must_use]
pub fn x() -> Array2<Complex64> {
    array![
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()]
    ]
}

/// Returns a unitary matrix representing the `Y` operation.
#[must_use]
pub fn y() -> Array2<Complex64> {
    array![
        [Complex64::zero(), -Complex64::i()],
        [Complex64::i(), Complex64::zero()]
    ]
}

/// Returns a unitary matrix representing the `Z` operation.
#[must_use]
pub fn z() -> Array2<Complex64> {
    array![
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), -Complex64::one()]
    ]
}

/// Returns a unitary matrix representing the single-qubit Hadamard transformation.
#[must_use]
pub fn h() -> Array2<Complex64> {
    array![
        [Complex64::one(), Complex64::one()],
        [Complex64::one(), -Complex64::one()]
    ] * FRAC_1_SQRT_2
}

/// Returns a unitary matrix representing the `S` operation.
#[must_use]
pub fn s() -> Array2<Complex64> {
    array![
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::i()]
    ]
}

/// Returns a unitary matrix representing the `Rx` operation with the given angle.
#[must_use]
pub fn rx(theta: f64) -> Array2<Complex64> {
    let cos_theta = f64::cos(theta / 2.0);
    let sin_theta = f64::sin(theta / 2.0);
    array![
        [
            Complex64::new(cos_theta, 0.0),
            Complex64::new(0.0, -sin_theta)
        ],
        [
            Complex64::new(0.0, -sin_theta),
            Complex64::new(cos_theta, 0.0)
        ]
    ]
}

/// Two-qubit controlled-not with the control on the high bit.
#[must_use]
pub fn cnot() -> Array2<Complex64> {
    let (o, l) = (Complex64::zero(), Complex64::one());
    array![[l, o, o, o], [o, l, o, o], [o, o, o, l], [o, o, l, o]]
}

/// Transforms the given matrix into it's adjoint using the transpose of the complex conjugate.
#[must_use]
pub fn adjoint(u: &Array2<Complex64>) -> Array2<Complex64> {
    u.t().map(Complex64::conj)
}

/// Copies any representation into an ndarray for reference computation.
fn to_array<M: Matrix>(m: &M) -> Array2<Complex64> {
    Array2::from_shape_vec((m.rows(), m.cols()), m.entries())
        .expect("entries are listed in row-major order")
}

fn from_array<M: Matrix>(a: &Array2<Complex64>) -> M {
    let entries: Vec<Complex64> = a.iter().copied().collect();
    M::from_entries(a.nrows(), a.ncols(), &entries).expect("shape matches entry count")
}

fn are_equal_to_precision(actual: Array2<Complex64>, expected: Array2<Complex64>) -> bool {
    actual.shape() == expected.shape() && (actual - expected).map(|x| x.norm()).sum() <= 1e-10
}

/// A deterministic, non-symmetric complex matrix with a sprinkling of zeros.
#[allow(clippy::cast_precision_loss)]
fn sample(rows: usize, cols: usize, salt: usize) -> Array2<Complex64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let k = i * cols + j + salt;
        if k % 3 == 0 {
            Complex64::zero()
        } else {
            Complex64::new((k % 7) as f64 - 3.0, (k % 5) as f64 * 0.5)
        }
    })
}

mod tests {
    use super::*;

    fn check_tensor<M: Matrix>() {
        let a = sample(2, 3, 1);
        let b = sample(3, 2, 4);
        let t: M = from_array::<M>(&a).tensor(&from_array(&b));
        assert!(are_equal_to_precision(to_array(&t), kron(&a, &b)));
    }

    #[test]
    fn tensor_matches_kron() {
        check_tensor::<Dense>();
        check_tensor::<Sparse>();
        check_tensor::<Adaptive>();
    }

    fn check_multiply<M: Matrix>() {
        let a = sample(3, 4, 2);
        let b = sample(4, 2, 5);
        let c: M = from_array::<M>(&a).multiply(&from_array(&b)).unwrap();
        assert!(are_equal_to_precision(to_array(&c), a.dot(&b)));
        let v: Array1<Complex64> = sample(4, 1, 3).column(0).to_owned();
        let w = from_array::<M>(&a).multiply_vector(v.as_slice().unwrap()).unwrap();
        let expected = a.dot(&v);
        assert!(w
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (a - b).is_nearly_zero()));
    }

    #[test]
    fn multiply_matches_dot() {
        check_multiply::<Dense>();
        check_multiply::<Sparse>();
        check_multiply::<Adaptive>();
    }

    fn check_adjoint<M: Matrix>() {
        let a = sample(3, 2, 6);
        let m: M = from_array(&a);
        assert!(are_equal_to_precision(to_array(&m.adjoint()), adjoint(&a)));
    }

    #[test]
    fn adjoint_matches_reference() {
        check_adjoint::<Dense>();
        check_adjoint::<Sparse>();
        check_adjoint::<Adaptive>();
    }

    fn check_gates<M: Matrix>() {
        assert!(are_equal_to_precision(to_array(&gates::x::<M>()), x()));
        assert!(are_equal_to_precision(to_array(&gates::y::<M>()), y()));
        assert!(are_equal_to_precision(to_array(&gates::z::<M>()), z()));
        assert!(are_equal_to_precision(to_array(&gates::h::<M>()), h()));
        assert!(are_equal_to_precision(to_array(&gates::s::<M>()), s()));
        assert!(are_equal_to_precision(
            to_array(&gates::rx::<M>(1.25)),
            rx(1.25)
        ));
        for gate in [
            gates::identity::<M>(),
            gates::h(),
            gates::x(),
            gates::y(),
            gates::z(),
            gates::s(),
            gates::t(),
            gates::u(0.3, 1.1, 2.9),
            gates::rx(0.7),
            gates::ry(2.2),
            gates::rz(5.1),
        ] {
            assert!(gate.is_unitary(), "{gate}");
        }
    }

    #[test]
    fn gates_match_reference() {
        check_gates::<Dense>();
        check_gates::<Sparse>();
        check_gates::<Adaptive>();
    }

    #[test]
    fn h_is_self_adjoint() {
        let h = gates::h::<Sparse>();
        assert!(h.approx_eq(&h.adjoint()));
    }

    #[test]
    fn t_squares_to_s() {
        let t = gates::t::<Dense>();
        assert!(t.multiply(&t).unwrap().approx_eq(&gates::s::<Dense>()));
    }

    #[test]
    fn s_squares_to_z() {
        let s = gates::s::<Adaptive>();
        assert!(s.multiply(&s).unwrap().approx_eq(&gates::z::<Sparse>()));
    }

    #[test]
    fn rotations_at_pi() {
        let scale = |m: &Array2<Complex64>| m.map(|v| v * Complex64::i());
        assert!(are_equal_to_precision(
            scale(&to_array(&gates::rx::<Dense>(PI))),
            x()
        ));
        assert!(are_equal_to_precision(
            scale(&to_array(&gates::ry::<Dense>(PI))),
            y()
        ));
        assert!(are_equal_to_precision(
            scale(&to_array(&gates::rz::<Dense>(PI))),
            z()
        ));
    }

    #[test]
    fn u_generalizes_ry() {
        let theta = 0.9;
        assert!(gates::u::<Sparse>(theta, 0.0, 0.0).approx_eq(&gates::ry::<Sparse>(theta)));
    }

    fn check_operator_expansion<M: Matrix>() {
        let mut machine = Machine::<M>::new();
        let _ = machine.zero();
        let _ = machine.zero();
        let _ = machine.zero();
        let i = Array2::<Complex64>::eye(2);
        let operator = machine.operator(&gates::h(), &[0, 2]).unwrap();
        let expected = kron(&kron(&h(), &i), &h());
        assert!(are_equal_to_precision(to_array(&operator), expected));
    }

    #[test]
    fn operator_expansion_matches_kron() {
        check_operator_expansion::<Dense>();
        check_operator_expansion::<Sparse>();
        check_operator_expansion::<Adaptive>();
    }

    fn check_controlled_not<M: Matrix>() {
        let mut machine = Machine::<M>::new();
        let _ = machine.zero();
        let _ = machine.zero();
        let _ = machine.zero();
        let i = Array2::<Complex64>::eye(2);
        let operator = machine.controlled_not(&[0], 1).unwrap();
        assert!(are_equal_to_precision(
            to_array(&operator),
            kron(&cnot(), &i)
        ));
        let operator = machine.controlled_not(&[1], 2).unwrap();
        assert!(are_equal_to_precision(
            to_array(&operator),
            kron(&i, &cnot())
        ));
    }

    #[test]
    fn controlled_not_matches_kron() {
        check_controlled_not::<Dense>();
        check_controlled_not::<Sparse>();
        check_controlled_not::<Adaptive>();
    }

    #[test]
    fn display_renders_rows() {
        let x = gates::x::<Sparse>();
        assert_eq!(x.to_string(), "0 1.000000+0.000000i \n1.000000+0.000000i 0 \n");
    }
}
