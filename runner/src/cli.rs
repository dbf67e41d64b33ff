// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

use clap::error::ErrorKind;
use clap::{arg, crate_version, value_parser, ArgAction, ArgMatches, Command};
use heisenberg::{OptimizerConfig, ProbabilitySpec, Representation};
use std::ffi::OsString;
use tracing_subscriber::filter::LevelFilter;

fn command() -> Command {
    Command::new("heisenberg").args(&[
        arg!(-w --width <NUM> "Number of qubits in each candidate circuit")
            .value_parser(value_parser!(usize))
            .default_value("8"),
        arg!(-d --depth <NUM> "Number of gates in each candidate circuit")
            .value_parser(value_parser!(usize))
            .default_value("8"),
        arg!(-g --generations <NUM> "Number of generations to evolve")
            .value_parser(value_parser!(usize))
            .default_value("100"),
        arg!(-p --population <NUM> "Number of circuits kept after each generation")
            .value_parser(value_parser!(usize))
            .default_value("100"),
        arg!(-e --elite <NUM> "Number of top circuits bred by crossover each generation")
            .value_parser(value_parser!(usize))
            .default_value("10"),
        arg!(-s --seed <NUM> "The value to use when seeding the random number generator used for the search")
            .value_parser(value_parser!(u64))
            .default_value("1"),
        arg!(-r --representation <NAME> "Matrix representation used for simulation")
            .value_parser(["dense", "sparse", "adaptive"])
            .default_value("sparse"),
        arg!(--probability <SPEC> "Target as BITS=P0,P1,... (repeatable), e.g. 01=1,0")
            .value_parser(crate::parse_probability)
            .action(ArgAction::Append),
        arg!(--"log-level" <LEVEL> "Maximum level of log events written to stderr")
            .value_parser(value_parser!(LevelFilter))
            .default_value("info"),
    ])
    .version(crate_version!())
}

fn config(matches: &ArgMatches) -> Result<OptimizerConfig, String> {
    let count = |name: &str| {
        *matches
            .get_one::<usize>(name)
            .expect("Tunables should have a default value")
    };
    let representation = matches
        .get_one::<String>("representation")
        .expect("Representation should have a default value")
        .parse::<Representation>()
        .map_err(|e| e.to_string())?;
    Ok(OptimizerConfig {
        population_size: count("population"),
        elite: count("elite"),
        generations: count("generations"),
        seed: *matches
            .get_one::<u64>("seed")
            .expect("Seed should have a default value"),
        representation,
        ..OptimizerConfig::new(count("width"), count("depth"))
    })
}

/// # Errors
/// Returns an error if the arguments are invalid or the search cannot run.
/// # Panics
/// Panics if the arguments cannot be read.
pub fn main<I, T>(args: Option<I>) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cmd = command();
    let matches = match args {
        Some(args) => cmd.try_get_matches_from(args),
        None => cmd.try_get_matches(),
    };
    match matches {
        Err(e) => {
            let msg = e.to_string();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    eprint!("{msg}");
                    Ok(())
                }
                _ => Err(msg),
            }
        }
        Ok(matches) => {
            let level = *matches
                .get_one::<LevelFilter>("log-level")
                .expect("Log level should have a default value");
            // A subscriber may already be installed when called more than once in-process.
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();

            let probabilities: Vec<ProbabilitySpec> = matches
                .get_many::<ProbabilitySpec>("probability")
                .map_or_else(crate::default_probabilities, |specs| {
                    specs.cloned().collect()
                });
            crate::run_optimizer(config(&matches)?, probabilities, &mut std::io::stdout())
        }
    }
}
