//! Readers for the NEO CSV and close-approach JSON datasets.

use std::io::{self, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use neowatch_core::{ApproachFields, CloseApproach, FieldError, NearEarthObject, NeoFields};
use neowatch_fs::open_utf8_file;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while reading a dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The dataset file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// A NEO record could not be decoded from CSV.
    #[error("failed to decode NEO record {record}: {source}")]
    Csv {
        /// One-based record number, excluding the header.
        record: usize,
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// The close-approach document is not valid JSON of the expected shape.
    #[error("failed to decode close-approach JSON: {source}")]
    Json {
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The close-approach document does not name a required column.
    #[error("close-approach data has no `{column}` column")]
    MissingColumn {
        /// Name of the absent column.
        column: &'static str,
    },
    /// A close-approach row ends before a required column.
    #[error("close-approach row {row} has {len} values, expected column {column}")]
    ShortRow {
        /// One-based row number.
        row: usize,
        /// Number of values present in the row.
        len: usize,
        /// Zero-based position of the missing column.
        column: usize,
    },
    /// A NEO record holds a value that cannot be interpreted.
    #[error("invalid NEO record {record}: {source}")]
    InvalidNeo {
        /// One-based record number, excluding the header.
        record: usize,
        /// The offending field.
        #[source]
        source: FieldError,
    },
    /// A close-approach row holds a value that cannot be interpreted.
    #[error("invalid close-approach row {row}: {source}")]
    InvalidApproach {
        /// One-based row number.
        row: usize,
        /// The offending field.
        #[source]
        source: FieldError,
    },
}

/// The columns of the NEO CSV that matter; the rest are ignored.
#[derive(Debug, Deserialize)]
struct NeoRecord {
    pdes: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    diameter: String,
    #[serde(default)]
    pha: String,
}

impl From<NeoRecord> for NeoFields {
    fn from(record: NeoRecord) -> Self {
        Self {
            designation: record.pdes,
            name: record.name,
            diameter: record.diameter,
            hazardous: record.pha,
        }
    }
}

/// A close-approach document: column names plus rows of string cells.
#[derive(Debug, Deserialize)]
struct CadDocument {
    fields: Vec<String>,
    data: Vec<Vec<Option<String>>>,
}

/// Positions of the close-approach columns inside each row.
#[derive(Debug, Clone, Copy)]
struct CadColumns {
    designation: usize,
    time: usize,
    distance: usize,
    velocity: usize,
}

impl CadColumns {
    fn resolve(fields: &[String]) -> Result<Self, LoadError> {
        let position = |column: &'static str| {
            fields
                .iter()
                .position(|field| field == column)
                .ok_or(LoadError::MissingColumn { column })
        };
        Ok(Self {
            designation: position("des")?,
            time: position("cd")?,
            distance: position("dist")?,
            velocity: position("v_rel")?,
        })
    }

    fn extract(
        self,
        row: usize,
        mut values: Vec<Option<String>>,
    ) -> Result<ApproachFields, LoadError> {
        let len = values.len();
        let mut take = |column: usize| {
            values
                .get_mut(column)
                .map(|cell| cell.take().unwrap_or_default())
                .ok_or(LoadError::ShortRow { row, len, column })
        };
        Ok(ApproachFields {
            designation: take(self.designation)?,
            time: take(self.time)?,
            distance: take(self.distance)?,
            velocity: take(self.velocity)?,
        })
    }
}

/// Load near-Earth objects from the CSV file at `path`.
///
/// The file needs a header row naming at least the `pdes` column; `name`,
/// `diameter` and `pha` are read when present and other columns are ignored.
///
/// # Errors
/// Returns [`LoadError::Open`] when the file cannot be opened and the
/// errors of [`read_neos`] for its contents.
pub fn load_neos(path: &Utf8Path) -> Result<Vec<NearEarthObject>, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let neos = read_neos(BufReader::new(file))?;
    info!("Loaded {} NEOs from {path}", neos.len());
    Ok(neos)
}

/// Read near-Earth objects from CSV text.
///
/// # Examples
/// ```
/// use neowatch_data::read_neos;
///
/// let csv = "pdes,name,diameter,pha\n433,Eros,16.84,Y\n2020 AB,,,N\n";
/// let neos = read_neos(csv.as_bytes()).expect("valid CSV");
/// assert_eq!(neos.len(), 2);
/// assert_eq!(neos[0].name.as_deref(), Some("Eros"));
/// assert!(neos[1].diameter.is_nan());
/// ```
///
/// # Errors
/// Returns [`LoadError::Csv`] for malformed records and
/// [`LoadError::InvalidNeo`] when a diameter is not a number.
pub fn read_neos<R: Read>(reader: R) -> Result<Vec<NearEarthObject>, LoadError> {
    csv::Reader::from_reader(reader)
        .deserialize::<NeoRecord>()
        .zip(1..)
        .map(|(decoded, record)| {
            let fields = decoded.map_err(|source| LoadError::Csv { record, source })?;
            NearEarthObject::from_fields(fields.into())
                .map_err(|source| LoadError::InvalidNeo { record, source })
        })
        .collect()
}

/// Load close approaches from the JSON file at `path`.
///
/// # Errors
/// Returns [`LoadError::Open`] when the file cannot be opened and the
/// errors of [`read_approaches`] for its contents.
pub fn load_approaches(path: &Utf8Path) -> Result<Vec<CloseApproach>, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let approaches = read_approaches(BufReader::new(file))?;
    info!("Loaded {} close approaches from {path}", approaches.len());
    Ok(approaches)
}

/// Read close approaches from a JSON document of the form
/// `{"fields": [...], "data": [[...], ...]}`.
///
/// Columns are located by the names `des`, `cd`, `dist` and `v_rel`, so
/// their order and any extra columns do not matter. `null` cells read as
/// blank values.
///
/// # Examples
/// ```
/// use neowatch_data::read_approaches;
///
/// let json = r#"{
///     "fields": ["des", "orbit_id", "cd", "dist", "v_rel"],
///     "data": [["433", "659", "1900-Jan-01 00:11", "0.0921795123769547", "16.7523040362574"]]
/// }"#;
/// let approaches = read_approaches(json.as_bytes()).expect("valid JSON");
/// assert_eq!(approaches[0].time_str(), "1900-01-01 00:11");
/// ```
///
/// # Errors
/// Returns [`LoadError::Json`] for malformed documents,
/// [`LoadError::MissingColumn`] and [`LoadError::ShortRow`] when a column
/// cannot be found, and [`LoadError::InvalidApproach`] for bad values.
pub fn read_approaches<R: Read>(reader: R) -> Result<Vec<CloseApproach>, LoadError> {
    let document: CadDocument =
        serde_json::from_reader(reader).map_err(|source| LoadError::Json { source })?;
    let columns = CadColumns::resolve(&document.fields)?;
    document
        .data
        .into_iter()
        .zip(1..)
        .map(|(values, row)| {
            let fields = columns.extract(row, values)?;
            CloseApproach::from_fields(fields)
                .map_err(|source| LoadError::InvalidApproach { row, source })
        })
        .collect()
}
