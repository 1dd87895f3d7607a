//! Dataset paths shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use neowatch_core::NeoDatabase;
use neowatch_data::{load_approaches, load_neos};

use crate::{ARG_CADFILE, ARG_NEOFILE, CliError};

/// Default location of the NEO CSV file.
pub(crate) const DEFAULT_NEOFILE: &str = "data/neos.csv";
/// Default location of the close-approach JSON file.
pub(crate) const DEFAULT_CADFILE: &str = "data/cad.json";

/// Resolved locations of the two input datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DatasetPaths {
    /// Path to the NEO CSV file.
    pub(crate) neofile: Utf8PathBuf,
    /// Path to the close-approach JSON file.
    pub(crate) cadfile: Utf8PathBuf,
}

impl DatasetPaths {
    /// Fill in the default locations for any path left unset.
    pub(crate) fn resolve(neofile: Option<Utf8PathBuf>, cadfile: Option<Utf8PathBuf>) -> Self {
        Self {
            neofile: neofile.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_NEOFILE)),
            cadfile: cadfile.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CADFILE)),
        }
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.neofile, ARG_NEOFILE)?;
        Self::require_existing(&self.cadfile, ARG_CADFILE)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match neowatch_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Validate, load and link both datasets.
    pub(crate) fn load_database(&self) -> Result<NeoDatabase, CliError> {
        self.validate_sources()?;
        let neos = load_neos(&self.neofile).map_err(|source| CliError::Load {
            field: ARG_NEOFILE,
            source,
        })?;
        let approaches = load_approaches(&self.cadfile).map_err(|source| CliError::Load {
            field: ARG_CADFILE,
            source,
        })?;
        let db = NeoDatabase::new(neos, approaches);
        debug!(
            "Database ready with {} NEOs and {} close approaches",
            db.neo_count(),
            db.approach_count()
        );
        Ok(db)
    }
}
