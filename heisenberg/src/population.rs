// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

use crate::{error::Result, genome::Genome, matrix::Matrix};
use rayon::prelude::*;

/// The working set of genomes for one optimizer run.
#[derive(Debug, Clone, Default)]
pub struct Population {
    genomes: Vec<Genome>,
}

impl Population {
    #[must_use]
    pub fn new(genomes: Vec<Genome>) -> Self {
        Population { genomes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Scores every genome, in parallel, on machines of representation `M`.
    /// # Errors
    ///
    /// Returns the first simulation error encountered.
    pub fn evaluate<M: Matrix>(&mut self) -> Result<()> {
        self.genomes
            .par_iter_mut()
            .try_for_each(|genome| genome.execute_with::<M>().map(|_| ()))
    }

    /// Orders genomes by ascending fitness. The sort is stable so equal scores keep their
    /// relative order.
    pub fn sort_by_fitness(&mut self) {
        self.genomes
            .sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
    }

    pub fn truncate(&mut self, len: usize) {
        self.genomes.truncate(len);
    }

    pub fn add_offspring(&mut self, genome: Genome) {
        self.genomes.push(genome);
    }

    /// The genome with the lowest fitness.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.genomes
            .iter()
            .min_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }
}
