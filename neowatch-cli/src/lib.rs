//! Command-line interface for exploring near-Earth objects and their close
//! approaches.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod datasets;
mod error;
mod inspect;
mod logging;
mod query;

pub use error::CliError;
pub use logging::init_logging;

use inspect::{InspectArgs, run_inspect};
use query::{QueryArgs, run_query};

pub(crate) const ARG_NEOFILE: &str = "neofile";
pub(crate) const ARG_CADFILE: &str = "cadfile";
pub(crate) const ARG_PDES: &str = "pdes";
pub(crate) const ARG_NAME: &str = "name";
pub(crate) const ARG_OUTFILE: &str = "outfile";

/// Run the `neowatch` CLI with the current process arguments and environment.
///
/// Human-readable results go to standard output.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, loading or
/// output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Inspect(args) => run_inspect(args, &mut stdout),
        Command::Query(args) => run_query(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "neowatch",
    about = "Explore near-Earth objects and their close approaches to Earth",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe a single NEO, optionally with its close approaches.
    Inspect(InspectArgs),
    /// Filter close approaches and print or save the matches.
    Query(QueryArgs),
}

#[cfg(test)]
mod tests;
