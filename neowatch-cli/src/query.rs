//! `query` command: filter close approaches and print or export them.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use neowatch_core::{FilterCriteria, limit};
use neowatch_data::write_results;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::datasets::DatasetPaths;
use crate::{ARG_CADFILE, ARG_NEOFILE, ARG_OUTFILE, CliError};

/// Number of results printed when no limit is given.
pub(crate) const DEFAULT_PRINT_LIMIT: usize = 10;

/// CLI arguments for the `query` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select close approaches matching every given criterion. \
                 Results are printed to stdout (ten at most unless --limit \
                 is given) or saved to --outfile as CSV or JSON depending on \
                 its extension.",
    about = "Query close approaches"
)]
#[ortho_config(prefix = "NEOWATCH")]
pub(crate) struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD).
    #[arg(long, short = 'd', value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
    /// Only approaches on or after this date (YYYY-MM-DD).
    #[arg(long, short = 's', value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Only approaches on or before this date (YYYY-MM-DD).
    #[arg(long, short = 'e', value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) end_date: Option<NaiveDate>,
    /// Minimum approach distance in astronomical units.
    #[arg(long, value_name = "au")]
    #[serde(default)]
    pub(crate) min_distance: Option<f64>,
    /// Maximum approach distance in astronomical units.
    #[arg(long, value_name = "au")]
    #[serde(default)]
    pub(crate) max_distance: Option<f64>,
    /// Minimum relative velocity in km/s.
    #[arg(long, value_name = "km/s")]
    #[serde(default)]
    pub(crate) min_velocity: Option<f64>,
    /// Maximum relative velocity in km/s.
    #[arg(long, value_name = "km/s")]
    #[serde(default)]
    pub(crate) max_velocity: Option<f64>,
    /// Minimum NEO diameter in kilometres.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) min_diameter: Option<f64>,
    /// Maximum NEO diameter in kilometres.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) max_diameter: Option<f64>,
    /// Only approaches by potentially hazardous NEOs.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "bool",
        conflicts_with = "not_hazardous"
    )]
    #[serde(default)]
    pub(crate) hazardous: Option<bool>,
    /// Only approaches by NEOs that are not potentially hazardous.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "bool")]
    #[serde(default)]
    pub(crate) not_hazardous: Option<bool>,
    /// Maximum number of results; zero means no limit.
    #[arg(long, short = 'l', value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Save results to this .csv or .json file instead of printing them.
    #[arg(long = ARG_OUTFILE, short = 'o', value_name = "path")]
    #[serde(default)]
    pub(crate) outfile: Option<Utf8PathBuf>,
    /// Path to the NEO CSV file.
    #[arg(long = ARG_NEOFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) neofile: Option<Utf8PathBuf>,
    /// Path to the close-approach JSON file.
    #[arg(long = ARG_CADFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) cadfile: Option<Utf8PathBuf>,
}

impl QueryArgs {
    pub(crate) fn into_config(self) -> Result<QueryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QueryConfig::try_from(merged)
    }
}

/// Where query results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Destination {
    /// Print human-readable lines.
    Stdout,
    /// Export to a CSV or JSON file.
    File(Utf8PathBuf),
}

/// Resolved `query` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueryConfig {
    pub(crate) criteria: FilterCriteria,
    pub(crate) limit: Option<usize>,
    pub(crate) destination: Destination,
    pub(crate) datasets: DatasetPaths,
}

impl QueryConfig {
    /// The cap applied to the results; printing defaults to ten.
    pub(crate) fn effective_limit(&self) -> Option<usize> {
        match self.destination {
            Destination::Stdout => self.limit.or(Some(DEFAULT_PRINT_LIMIT)),
            Destination::File(_) => self.limit,
        }
    }
}

/// Fold the two hazard flags into the single optional criterion.
///
/// An explicit value is honoured, so `--hazardous false` asks for the same
/// approaches as `--not-hazardous`. Flags that disagree are rejected.
fn hazard_filter(
    hazardous: Option<bool>,
    not_hazardous: Option<bool>,
) -> Result<Option<bool>, CliError> {
    match (hazardous, not_hazardous.map(|flag| !flag)) {
        (Some(wanted), Some(implied)) if wanted != implied => {
            Err(CliError::ConflictingHazardFilters)
        }
        (Some(wanted), _) | (None, Some(wanted)) => Ok(Some(wanted)),
        (None, None) => Ok(None),
    }
}

impl TryFrom<QueryArgs> for QueryConfig {
    type Error = CliError;

    fn try_from(args: QueryArgs) -> Result<Self, Self::Error> {
        let criteria = FilterCriteria {
            date: args.date,
            start_date: args.start_date,
            end_date: args.end_date,
            min_distance: args.min_distance,
            max_distance: args.max_distance,
            min_velocity: args.min_velocity,
            max_velocity: args.max_velocity,
            min_diameter: args.min_diameter,
            max_diameter: args.max_diameter,
            hazardous: hazard_filter(args.hazardous, args.not_hazardous)?,
        };
        let destination = args.outfile.map_or(Destination::Stdout, Destination::File);
        Ok(Self {
            criteria,
            limit: args.limit,
            destination,
            datasets: DatasetPaths::resolve(args.neofile, args.cadfile),
        })
    }
}

pub(crate) fn run_query(args: QueryArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_query(&config, writer)
}

pub(crate) fn execute_query(config: &QueryConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let db = config.datasets.load_database()?;
    let filters = config.criteria.into_filters();
    let results = limit(db.query(&filters), config.effective_limit());
    match &config.destination {
        Destination::Stdout => {
            for approach in results {
                writeln!(writer, "{approach}").map_err(CliError::WriteOutput)?;
            }
        }
        Destination::File(path) => {
            let written = write_results(results, path)?;
            info!("Saved {written} matching close approaches");
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QueryConfig, CliError> {
    let merged = QueryArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QueryConfig::try_from(merged)
}
