//! `inspect` command: look up a single NEO by designation or name.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::datasets::DatasetPaths;
use crate::{ARG_CADFILE, ARG_NAME, ARG_NEOFILE, ARG_PDES, CliError};

/// Printed when a lookup finds nothing.
pub(crate) const NO_MATCH: &str = "No matching NEOs exist in the database.";

/// CLI arguments for the `inspect` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look up a near-Earth object by its primary designation or \
                 by its IAU name and describe it. With --verbose, every known \
                 close approach of the object is listed as well.",
    about = "Inspect a single NEO"
)]
#[ortho_config(prefix = "NEOWATCH")]
pub(crate) struct InspectArgs {
    /// Primary designation of the NEO, such as "433".
    #[arg(long = ARG_PDES, value_name = "designation", conflicts_with = ARG_NAME)]
    #[serde(default)]
    pub(crate) pdes: Option<String>,
    /// IAU name of the NEO, such as "Eros".
    #[arg(long = ARG_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Also list the close approaches of the NEO.
    #[arg(long, short = 'v')]
    #[serde(default)]
    pub(crate) verbose: bool,
    /// Path to the NEO CSV file.
    #[arg(long = ARG_NEOFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) neofile: Option<Utf8PathBuf>,
    /// Path to the close-approach JSON file.
    #[arg(long = ARG_CADFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) cadfile: Option<Utf8PathBuf>,
}

impl InspectArgs {
    pub(crate) fn into_config(self) -> Result<InspectConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InspectConfig::try_from(merged)
    }
}

/// How the NEO is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// By primary designation.
    Designation(String),
    /// By IAU name.
    Name(String),
}

/// Resolved `inspect` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InspectConfig {
    pub(crate) lookup: Lookup,
    pub(crate) verbose: bool,
    pub(crate) datasets: DatasetPaths,
}

impl TryFrom<InspectArgs> for InspectConfig {
    type Error = CliError;

    fn try_from(args: InspectArgs) -> Result<Self, Self::Error> {
        let lookup = match (args.pdes, args.name) {
            (Some(pdes), None) => Lookup::Designation(pdes),
            (None, Some(name)) => Lookup::Name(name),
            (None, None) => {
                return Err(CliError::MissingLookup {
                    pdes: ARG_PDES,
                    name: ARG_NAME,
                });
            }
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingLookup {
                    pdes: ARG_PDES,
                    name: ARG_NAME,
                });
            }
        };
        Ok(Self {
            lookup,
            verbose: args.verbose,
            datasets: DatasetPaths::resolve(args.neofile, args.cadfile),
        })
    }
}

pub(crate) fn run_inspect(args: InspectArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_inspect(&config, writer)
}

pub(crate) fn execute_inspect(
    config: &InspectConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let db = config.datasets.load_database()?;
    let found = match &config.lookup {
        Lookup::Designation(designation) => db.neo_by_designation(designation),
        Lookup::Name(name) => db.neo_by_name(name.as_str()),
    };
    let Some(neo) = found else {
        return writeln!(writer, "{NO_MATCH}").map_err(CliError::WriteOutput);
    };
    writeln!(writer, "{}", neo.get()).map_err(CliError::WriteOutput)?;
    if config.verbose {
        for approach in neo.approaches() {
            writeln!(writer, "- {approach}").map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<InspectConfig, CliError> {
    let merged = InspectArgs::merge_from_layers(layers).map_err(CliError::from)?;
    InspectConfig::try_from(merged)
}
