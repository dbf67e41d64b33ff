// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

//! Genetic search for circuits that reproduce target measurement probabilities.
//!
//! Each generation scores the population, keeps the fittest `population_size` genomes,
//! breeds `elite` crossover pairs from the top `elite` genomes and then adds one mutant of
//! every genome. The best fitness of each generation is therefore non-increasing.

use crate::{
    adaptive::Adaptive,
    dense::Dense,
    error::Result,
    genome::{GateWeights, Genome, ProbabilitySpec},
    matrix::Matrix,
    population::Population,
    sparse::Sparse,
    Error,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, info};

/// The matrix representation machines simulate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    Dense,
    #[default]
    Sparse,
    Adaptive,
}

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(Representation::Dense),
            "sparse" => Ok(Representation::Sparse),
            "adaptive" => Ok(Representation::Adaptive),
            _ => Err(Error::InvalidConfig(format!("unknown representation '{s}'"))),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Representation::Dense => "dense",
            Representation::Sparse => "sparse",
            Representation::Adaptive => "adaptive",
        })
    }
}

/// Search tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Number of qubits in every circuit.
    pub width: usize,
    /// Number of gates in every circuit.
    pub depth: usize,
    pub population_size: usize,
    /// Number of top genomes bred by crossover, and number of crossover pairs per generation.
    pub elite: usize,
    pub generations: usize,
    pub seed: u64,
    pub weights: GateWeights,
    pub representation: Representation,
}

impl OptimizerConfig {
    /// A config for `width` qubits and `depth` gates with every other tunable at its default.
    #[must_use]
    pub fn new(width: usize, depth: usize) -> Self {
        OptimizerConfig {
            width,
            depth,
            population_size: 100,
            elite: 10,
            generations: 100,
            seed: 1,
            weights: GateWeights::default(),
            representation: Representation::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero width, depth or population, or an elite
    /// count outside `1..=population_size`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::InvalidConfig("width must be at least 1".to_string()));
        }
        if self.depth == 0 {
            return Err(Error::InvalidConfig("depth must be at least 1".to_string()));
        }
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population size must be at least 1".to_string(),
            ));
        }
        if self.elite == 0 || self.elite > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "elite count {} must be between 1 and the population size {}",
                self.elite, self.population_size
            )));
        }
        Ok(())
    }
}

/// The result of a search.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The fittest genome found.
    pub best: Genome,
    /// The best fitness at the start of each generation.
    pub history: Vec<f64>,
}

pub struct Optimizer<R = StdRng> {
    config: OptimizerConfig,
    probabilities: Arc<[ProbabilitySpec]>,
    rng: R,
}

impl Optimizer<StdRng> {
    /// An optimizer whose random source is seeded from `config.seed`.
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] or [`Error::InvalidSpecification`] when the inputs
    /// cannot be searched.
    pub fn new(config: OptimizerConfig, probabilities: Vec<ProbabilitySpec>) -> Result<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, probabilities, rng)
    }
}

impl<R: Rng> Optimizer<R> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] or [`Error::InvalidSpecification`] when the inputs
    /// cannot be searched.
    pub fn with_rng(
        config: OptimizerConfig,
        probabilities: Vec<ProbabilitySpec>,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        for probability in &probabilities {
            probability.validate(config.width)?;
        }
        Ok(Optimizer {
            config,
            probabilities: probabilities.into(),
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Runs the search on the configured representation.
    /// # Errors
    ///
    /// Propagates any simulation error.
    pub fn run(&mut self) -> Result<Outcome> {
        match self.config.representation {
            Representation::Dense => self.run_as::<Dense>(),
            Representation::Sparse => self.run_as::<Sparse>(),
            Representation::Adaptive => self.run_as::<Adaptive>(),
        }
    }

    /// Runs the search simulating with representation `M`.
    /// # Errors
    ///
    /// Propagates any simulation error.
    pub fn run_as<M: Matrix>(&mut self) -> Result<Outcome> {
        let OptimizerConfig {
            width,
            depth,
            population_size,
            elite,
            generations,
            ref weights,
            ..
        } = self.config;

        let mut population = Population::new(
            (0..population_size)
                .map(|_| {
                    Genome::random(
                        &mut self.rng,
                        width,
                        depth,
                        weights,
                        Arc::clone(&self.probabilities),
                    )
                })
                .collect(),
        );
        let mut history = Vec::with_capacity(generations);

        for generation in 0..generations {
            population.evaluate::<M>()?;
            population.sort_by_fitness();
            population.truncate(population_size);
            let fitness = population.best().map_or(f64::INFINITY, Genome::fitness);
            info!(generation, fitness, "generation scored");
            history.push(fitness);

            let parents = elite.min(population.len());
            for _ in 0..parents {
                let a = &population.genomes()[self.rng.gen_range(0..parents)];
                let b = &population.genomes()[self.rng.gen_range(0..parents)];
                let (x, y) = Genome::crossover(a, b, &mut self.rng);
                population.add_offspring(x);
                population.add_offspring(y);
            }
            for i in 0..population.len() {
                let mutant = population.genomes()[i].mutate(&mut self.rng, weights);
                population.add_offspring(mutant);
            }
            debug!(generation, size = population.len(), "offspring added");
        }

        population.evaluate::<M>()?;
        population.sort_by_fitness();
        population.truncate(population_size);
        let best = population
            .best()
            .cloned()
            .ok_or_else(|| Error::InvalidConfig("population is empty".to_string()))?;
        info!(fitness = best.fitness(), "search finished");
        Ok(Outcome { best, history })
    }
}

/// Searches for a `width`-qubit, `depth`-gate circuit matching `probabilities` with default
/// tunables on sparse machines.
/// # Errors
///
/// Returns an error when the inputs cannot be searched or a simulation fails.
pub fn optimize(
    width: usize,
    depth: usize,
    probabilities: Vec<ProbabilitySpec>,
) -> Result<Outcome> {
    Optimizer::new(OptimizerConfig::new(width, depth), probabilities)?.run()
}
