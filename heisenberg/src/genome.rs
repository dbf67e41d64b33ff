// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Circuit genomes: an ordered list of gates scored against target measurement
//! probabilities. Lower fitness is better and zero is a perfect match.

use crate::{
    error::Result, machine::Machine, matrix::Matrix, sparse::Sparse, Error, Qubit,
};
use core::f64::consts::PI;
use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
use std::{fmt, sync::Arc};

/// Every kind of gate the search can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    ControlledNot,
    I,
    H,
    X,
    Y,
    Z,
    S,
    T,
    U,
    Rx,
    Ry,
    Rz,
}

impl GateKind {
    pub const ALL: [GateKind; 12] = [
        GateKind::ControlledNot,
        GateKind::I,
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::U,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
    ];

    fn position(self) -> usize {
        self as usize
    }
}

/// Default relative weights, in [`GateKind::ALL`] order.
pub const DEFAULT_GATE_WEIGHTS: [u32; 12] = [5, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

/// Relative likelihood of each gate kind when a random gate is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GateWeights {
    weights: [u32; 12],
    distribution: WeightedIndex<u32>,
}

impl Default for GateWeights {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_WEIGHTS).expect("default gate weights are positive")
    }
}

impl GateWeights {
    /// Builds weights listed in [`GateKind::ALL`] order.
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when every weight is zero.
    pub fn new(weights: [u32; 12]) -> Result<Self> {
        let distribution = WeightedIndex::new(weights)
            .map_err(|e| Error::InvalidConfig(format!("gate weights: {e}")))?;
        Ok(GateWeights {
            weights,
            distribution,
        })
    }

    #[must_use]
    pub fn weight(&self, kind: GateKind) -> u32 {
        self.weights[kind.position()]
    }

    /// Draws a gate kind.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> GateKind {
        GateKind::ALL[self.distribution.sample(rng)]
    }
}

/// One gate of a circuit with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    ControlledNot { controls: Vec<Qubit>, target: Qubit },
    I(Vec<Qubit>),
    H(Vec<Qubit>),
    X(Vec<Qubit>),
    Y(Vec<Qubit>),
    Z(Vec<Qubit>),
    S(Vec<Qubit>),
    T(Vec<Qubit>),
    U {
        theta: f64,
        phi: f64,
        lambda: f64,
        qubits: Vec<Qubit>,
    },
    Rx { theta: f64, qubits: Vec<Qubit> },
    Ry { theta: f64, qubits: Vec<Qubit> },
    Rz { theta: f64, qubits: Vec<Qubit> },
}

impl Gate {
    #[must_use]
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::ControlledNot { .. } => GateKind::ControlledNot,
            Gate::I(_) => GateKind::I,
            Gate::H(_) => GateKind::H,
            Gate::X(_) => GateKind::X,
            Gate::Y(_) => GateKind::Y,
            Gate::Z(_) => GateKind::Z,
            Gate::S(_) => GateKind::S,
            Gate::T(_) => GateKind::T,
            Gate::U { .. } => GateKind::U,
            Gate::Rx { .. } => GateKind::Rx,
            Gate::Ry { .. } => GateKind::Ry,
            Gate::Rz { .. } => GateKind::Rz,
        }
    }

    /// Replays the gate on `machine`.
    /// # Errors
    ///
    /// Propagates the machine's error for qubits it does not have or duplicated controls.
    pub fn apply<M: Matrix>(&self, machine: &mut Machine<M>) -> Result<()> {
        match self {
            Gate::ControlledNot { controls, target } => {
                machine.controlled_not(controls, *target)?;
            }
            Gate::I(qubits) => {
                machine.i(qubits)?;
            }
            Gate::H(qubits) => {
                machine.h(qubits)?;
            }
            Gate::X(qubits) => {
                machine.x(qubits)?;
            }
            Gate::Y(qubits) => {
                machine.y(qubits)?;
            }
            Gate::Z(qubits) => {
                machine.z(qubits)?;
            }
            Gate::S(qubits) => {
                machine.s(qubits)?;
            }
            Gate::T(qubits) => {
                machine.t(qubits)?;
            }
            Gate::U {
                theta,
                phi,
                lambda,
                qubits,
            } => {
                machine.u(*theta, *phi, *lambda, qubits)?;
            }
            Gate::Rx { theta, qubits } => {
                machine.rx(*theta, qubits)?;
            }
            Gate::Ry { theta, qubits } => {
                machine.ry(*theta, qubits)?;
            }
            Gate::Rz { theta, qubits } => {
                machine.rz(*theta, qubits)?;
            }
        }
        Ok(())
    }

    /// Draws a random gate for a register of `width` qubits. Single-qubit gates act on zero
    /// to two distinct qubits; a controlled-not has up to two controls distinct from its
    /// target. Angles are uniform in `[0, 4π)`.
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn random<R: Rng>(rng: &mut R, width: usize, weights: &GateWeights) -> Gate {
        let qubits = |rng: &mut R, exclude: &[Qubit], most: usize| {
            let count = rng.gen_range(0..=most.min(2));
            let mut picked: Vec<Qubit> = Vec::with_capacity(count);
            while picked.len() < count {
                let qubit = rng.gen_range(0..width);
                if !picked.contains(&qubit) && !exclude.contains(&qubit) {
                    picked.push(qubit);
                }
            }
            picked
        };
        let angle = |rng: &mut R| rng.gen_range(0.0..4.0 * PI);

        match weights.sample(rng) {
            GateKind::ControlledNot => {
                let target = rng.gen_range(0..width);
                let controls = qubits(rng, &[target], width - 1);
                Gate::ControlledNot { controls, target }
            }
            GateKind::I => Gate::I(qubits(rng, &[], width)),
            GateKind::H => Gate::H(qubits(rng, &[], width)),
            GateKind::X => Gate::X(qubits(rng, &[], width)),
            GateKind::Y => Gate::Y(qubits(rng, &[], width)),
            GateKind::Z => Gate::Z(qubits(rng, &[], width)),
            GateKind::S => Gate::S(qubits(rng, &[], width)),
            GateKind::T => Gate::T(qubits(rng, &[], width)),
            GateKind::U => Gate::U {
                theta: angle(rng),
                phi: angle(rng),
                lambda: angle(rng),
                qubits: qubits(rng, &[], width),
            },
            GateKind::Rx => Gate::Rx {
                theta: angle(rng),
                qubits: qubits(rng, &[], width),
            },
            GateKind::Ry => Gate::Ry {
                theta: angle(rng),
                qubits: qubits(rng, &[], width),
            },
            GateKind::Rz => Gate::Rz {
                theta: angle(rng),
                qubits: qubits(rng, &[], width),
            },
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::ControlledNot { controls, target } => write!(f, "cnot {controls:?} -> {target}"),
            Gate::I(qubits) => write!(f, "i {qubits:?}"),
            Gate::H(qubits) => write!(f, "h {qubits:?}"),
            Gate::X(qubits) => write!(f, "x {qubits:?}"),
            Gate::Y(qubits) => write!(f, "y {qubits:?}"),
            Gate::Z(qubits) => write!(f, "z {qubits:?}"),
            Gate::S(qubits) => write!(f, "s {qubits:?}"),
            Gate::T(qubits) => write!(f, "t {qubits:?}"),
            Gate::U {
                theta,
                phi,
                lambda,
                qubits,
            } => write!(f, "u({theta:.4}, {phi:.4}, {lambda:.4}) {qubits:?}"),
            Gate::Rx { theta, qubits } => write!(f, "rx({theta:.4}) {qubits:?}"),
            Gate::Ry { theta, qubits } => write!(f, "ry({theta:.4}) {qubits:?}"),
            Gate::Rz { theta, qubits } => write!(f, "rz({theta:.4}) {qubits:?}"),
        }
    }
}

/// An input basis state paired with the measurement probabilities the circuit should produce
/// from it. Input bits initialize qubits `0..input.len()`; remaining qubits start at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilitySpec {
    input: Vec<bool>,
    target: Vec<f64>,
}

impl ProbabilitySpec {
    #[must_use]
    pub fn new(input: Vec<bool>, target: Vec<f64>) -> Self {
        ProbabilitySpec { input, target }
    }

    /// Reads input bits from numbers, zero meaning `|0⟩` and anything else `|1⟩`.
    #[must_use]
    pub fn from_levels(input: &[f64], target: &[f64]) -> Self {
        ProbabilitySpec {
            input: input.iter().map(|&level| level != 0.0).collect(),
            target: target.to_vec(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &[bool] {
        &self.input
    }

    #[must_use]
    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Checks that the spec fits a register of `width` qubits.
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpecification`] when there are more input bits than qubits or
    /// more target entries than basis states.
    pub fn validate(&self, width: usize) -> Result<()> {
        if self.input.len() > width {
            return Err(Error::InvalidSpecification(format!(
                "{} input bits do not fit {width} qubits",
                self.input.len()
            )));
        }
        let states = u32::try_from(width)
            .ok()
            .and_then(|w| 1_usize.checked_shl(w));
        if states.is_some_and(|states| self.target.len() > states) {
            return Err(Error::InvalidSpecification(format!(
                "{} target probabilities exceed the {width} qubit state space",
                self.target.len()
            )));
        }
        Ok(())
    }
}

/// A candidate circuit of fixed width. Fitness is `f64::INFINITY` until the genome is
/// executed.
#[derive(Debug, Clone)]
pub struct Genome {
    gates: Vec<Gate>,
    fitness: f64,
    width: usize,
    probabilities: Arc<[ProbabilitySpec]>,
}

impl Genome {
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpecification`] when a spec does not fit `width` qubits.
    pub fn new(
        gates: Vec<Gate>,
        width: usize,
        probabilities: Arc<[ProbabilitySpec]>,
    ) -> Result<Self> {
        for probability in probabilities.iter() {
            probability.validate(width)?;
        }
        Ok(Genome {
            gates,
            fitness: f64::INFINITY,
            width,
            probabilities,
        })
    }

    /// A genome of `depth` random gates. Unlike [`Genome::new`] the specs are not
    /// validated against `width`. A zero-width genome has no qubits to act on and so no
    /// gates.
    #[must_use]
    pub fn random<R: Rng>(
        rng: &mut R,
        width: usize,
        depth: usize,
        weights: &GateWeights,
        probabilities: Arc<[ProbabilitySpec]>,
    ) -> Self {
        let depth = if width == 0 { 0 } else { depth };
        Genome {
            gates: (0..depth)
                .map(|_| Gate::random(rng, width, weights))
                .collect(),
            fitness: f64::INFINITY,
            width,
            probabilities,
        }
    }

    #[must_use]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn probabilities(&self) -> &[ProbabilitySpec] {
        &self.probabilities
    }

    /// Scores the circuit on a sparse machine. See [`Genome::execute_with`].
    /// # Errors
    ///
    /// Propagates any error raised while simulating a gate.
    pub fn execute(&mut self) -> Result<f64> {
        self.execute_with::<Sparse>()
    }

    /// Runs the circuit once per spec on a fresh machine and stores the summed squared error
    /// between the measured probabilities and each target. Entries beyond a target's length
    /// are not scored.
    /// # Errors
    ///
    /// Propagates any error raised while simulating a gate.
    pub fn execute_with<M: Matrix>(&mut self) -> Result<f64> {
        let mut fitness = 0.0;
        for probability in self.probabilities.iter() {
            let mut machine = Machine::<M>::new();
            for &bit in probability.input() {
                let _ = if bit { machine.one() } else { machine.zero() };
            }
            for _ in probability.input().len()..self.width {
                let _ = machine.zero();
            }
            for gate in &self.gates {
                gate.apply(&mut machine)?;
            }
            for (actual, expected) in machine.probabilities().iter().zip(probability.target()) {
                let diff = actual - expected;
                fitness += diff * diff;
            }
        }
        self.fitness = fitness;
        Ok(fitness)
    }

    /// Exchanges one randomly chosen gate between copies of `a` and `b`.
    pub fn crossover<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
        let mut x = a.unscored();
        let mut y = b.unscored();
        if !x.gates.is_empty() && !y.gates.is_empty() {
            let g1 = rng.gen_range(0..x.gates.len());
            let g2 = rng.gen_range(0..y.gates.len());
            std::mem::swap(&mut x.gates[g1], &mut y.gates[g2]);
        }
        (x, y)
    }

    /// A copy with one randomly chosen gate replaced by a fresh random gate.
    #[must_use]
    pub fn mutate<R: Rng>(&self, rng: &mut R, weights: &GateWeights) -> Genome {
        let mut mutant = self.unscored();
        if !mutant.gates.is_empty() && mutant.width > 0 {
            let position = rng.gen_range(0..mutant.gates.len());
            mutant.gates[position] = Gate::random(rng, mutant.width, weights);
        }
        mutant
    }

    fn unscored(&self) -> Genome {
        Genome {
            fitness: f64::INFINITY,
            ..self.clone()
        }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{gate}")?;
        }
        Ok(())
    }
}
