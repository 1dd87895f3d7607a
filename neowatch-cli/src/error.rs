//! Error types emitted by the `neowatch` CLI.
//!
//! Keep this error type reasonably small; every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use neowatch_data::{LoadError, WriteError};
use thiserror::Error;

/// Errors emitted by the `neowatch` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// `inspect` was given neither a designation nor a name.
    #[error("inspect needs --{pdes} or --{name}")]
    MissingLookup {
        /// Flag selecting a designation.
        pdes: &'static str,
        /// Flag selecting a name.
        name: &'static str,
    },
    /// `inspect` was given both a designation and a name.
    #[error("inspect accepts only one of --{pdes} and --{name}")]
    ConflictingLookup {
        /// Flag selecting a designation.
        pdes: &'static str,
        /// Flag selecting a name.
        name: &'static str,
    },
    /// Both hazard filters were requested at once.
    #[error("--hazardous and --not-hazardous cannot be combined")]
    ConflictingHazardFilters,
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading a dataset failed.
    #[error("failed to load {field} data: {source}")]
    Load {
        /// Flag naming the dataset.
        field: &'static str,
        /// Loader failure.
        #[source]
        source: LoadError,
    },
    /// Writing results to the output file failed.
    #[error(transparent)]
    WriteResults(#[from] WriteError),
    /// Printing to standard output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Installing the logger failed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}
