// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

mod cli;
pub use cli::main;

use heisenberg::{Optimizer, OptimizerConfig, ProbabilitySpec};
use std::io::Write;
use tracing::info;

/// Probability specs searched when none are given: move qubit 0 into qubit 1.
#[must_use]
pub fn default_probabilities() -> Vec<ProbabilitySpec> {
    vec![
        ProbabilitySpec::from_levels(&[0.0, 1.0], &[1.0, 0.0]),
        ProbabilitySpec::from_levels(&[1.0, 0.0], &[0.0, 1.0]),
    ]
}

/// Parses `BITS=P0,P1,...`, e.g. `01=1,0`. `BITS` is a string of `0` and `1` initializing
/// qubits from qubit 0 on and may be empty; the probabilities are the target for basis
/// states `0, 1, ...`.
/// # Errors
///
/// Will return `Err` if the text is not of that form.
pub fn parse_probability(value: &str) -> Result<ProbabilitySpec, String> {
    let (bits, target) = value
        .split_once('=')
        .ok_or_else(|| format!("Expected BITS=P0,P1,... but found '{value}'."))?;
    let input = bits
        .trim()
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(format!("Invalid input bit '{c}' in '{value}'.")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let target = target
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<f64>()
                .map_err(|e| format!("Invalid probability '{p}' in '{value}': {e}."))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProbabilitySpec::new(input, target))
}

/// Runs the search and writes the best fitness followed by the winning circuit, one gate
/// per line.
/// # Errors
///
/// Will return `Err` if
/// - `config` cannot drive a search (zero width, depth or population, bad elite count).
/// - a probability spec does not fit the circuit width.
/// - the output cannot be written.
pub fn run_optimizer(
    config: OptimizerConfig,
    probabilities: Vec<ProbabilitySpec>,
    output_writer: &mut impl Write,
) -> Result<(), String> {
    info!(
        width = config.width,
        depth = config.depth,
        representation = %config.representation,
        "starting search"
    );
    let mut optimizer = Optimizer::new(config, probabilities).map_err(|e| e.to_string())?;
    let outcome = optimizer.run().map_err(|e| e.to_string())?;
    writeln!(output_writer, "fitness: {}", outcome.best.fitness())
        .and_then(|()| write!(output_writer, "{}", outcome.best))
        .map_err(|e| e.to_string())
}
