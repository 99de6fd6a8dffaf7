//! Donate-e2e CLI Library
//!
//! Command-line runner for the donation widget scenario.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{CaseFormat, Cli, ColorArg, Commands, GenerateArgs, RunArgs};
pub use config::{
    apply_run_args, load_suite_config, load_suite_config_from, CliConfig, ColorChoice, Verbosity,
};
pub use error::{CliError, CliResult};
pub use output::StepReporter;
pub use runner::{Backend, ScenarioRunner};
