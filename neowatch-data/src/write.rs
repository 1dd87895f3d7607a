//! Writers that export close approaches, with their objects, as CSV or JSON.

use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use neowatch_core::ApproachRef;
use neowatch_fs::{create_utf8_file, ensure_parent_dir};
use serde::Serialize;
use thiserror::Error;

/// Header row of the CSV export.
const CSV_HEADER: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Output encodings selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values, one row per approach.
    Csv,
    /// A pretty-printed JSON array, one object per approach.
    Json,
}

impl OutputFormat {
    /// Pick the format matching the extension of `path`, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use camino::Utf8Path;
    /// use neowatch_data::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path(Utf8Path::new("out/results.CSV")), Some(OutputFormat::Csv));
    /// assert_eq!(OutputFormat::from_path(Utf8Path::new("results.json")), Some(OutputFormat::Json));
    /// assert_eq!(OutputFormat::from_path(Utf8Path::new("results.txt")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let extension = path.extension()?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Errors produced while exporting results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
    /// The output path has neither a `.csv` nor a `.json` extension.
    #[error("cannot infer an output format for {path}; use a .csv or .json extension")]
    UnsupportedFormat {
        /// Requested output path.
        path: Utf8PathBuf,
    },
    /// The directory holding the output file could not be created.
    #[error("failed to create the directory for {path}: {source}")]
    CreateDir {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// Encoding a CSV row failed.
    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
    /// Encoding the JSON document failed.
    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
    /// Flushing buffered output failed.
    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),
}

/// Render a measurement, spelling unknown values as `nan`.
///
/// Whole numbers keep a trailing `.0`, so a velocity of twelve is `12.0`.
fn measurement(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else {
        format!("{value:?}")
    }
}

const fn python_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn known(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    datetime_utc: String,
    distance_au: String,
    velocity_km_s: String,
    designation: &'a str,
    name: &'a str,
    diameter_km: String,
    potentially_hazardous: &'static str,
}

impl<'a> CsvRow<'a> {
    fn new(approach: ApproachRef<'a>) -> Self {
        let record = approach.get();
        let (name, diameter_km, potentially_hazardous) = approach.neo().map_or_else(
            || ("", String::new(), ""),
            |linked| {
                let object = linked.get();
                (
                    object.name.as_deref().unwrap_or_default(),
                    measurement(object.diameter),
                    python_bool(object.hazardous),
                )
            },
        );
        Self {
            datetime_utc: record.time_str(),
            distance_au: measurement(record.distance),
            velocity_km_s: measurement(record.velocity),
            designation: &record.designation,
            name,
            diameter_km,
            potentially_hazardous,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonNeo<'a> {
    designation: &'a str,
    name: &'a str,
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

#[derive(Debug, Serialize)]
struct JsonApproach<'a> {
    datetime_utc: String,
    distance_au: Option<f64>,
    velocity_km_s: Option<f64>,
    neo: Option<JsonNeo<'a>>,
}

impl<'a> JsonApproach<'a> {
    fn new(approach: ApproachRef<'a>) -> Self {
        let record = approach.get();
        let neo = approach.neo().map(|linked| {
            let object = linked.get();
            JsonNeo {
                designation: &object.designation,
                name: object.name.as_deref().unwrap_or_default(),
                diameter_km: known(object.diameter),
                potentially_hazardous: object.hazardous,
            }
        });
        Self {
            datetime_utc: record.time_str(),
            distance_au: known(record.distance),
            velocity_km_s: known(record.velocity),
            neo,
        }
    }
}

/// Write `results` as CSV and return the number of rows written.
///
/// Unknown measurements are written as `nan`, hazard flags as `True` or
/// `False`, and approaches without a linked object leave the object columns
/// empty.
///
/// # Errors
/// Returns [`WriteError::Csv`] when a row cannot be written and
/// [`WriteError::Flush`] when the writer cannot be flushed.
pub fn write_csv<'db, I, W>(results: I, writer: W) -> Result<usize, WriteError>
where
    I: IntoIterator<Item = ApproachRef<'db>>,
    W: Write,
{
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    out.write_record(CSV_HEADER)?;
    let mut written = 0_usize;
    for approach in results {
        out.serialize(CsvRow::new(approach))?;
        written += 1;
    }
    out.flush().map_err(WriteError::Flush)?;
    Ok(written)
}

/// Write `results` as a pretty-printed JSON array and return its length.
///
/// Each element carries the approach fields and a nested `neo` object, which
/// is `null` when the approach has no linked object. Unknown measurements
/// are written as `null`.
///
/// # Errors
/// Returns [`WriteError::Json`] when encoding fails and
/// [`WriteError::Flush`] when the trailing newline cannot be written.
pub fn write_json<'db, I, W>(results: I, mut writer: W) -> Result<usize, WriteError>
where
    I: IntoIterator<Item = ApproachRef<'db>>,
    W: Write,
{
    let rows: Vec<JsonApproach<'db>> = results.into_iter().map(JsonApproach::new).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n").map_err(WriteError::Flush)?;
    writer.flush().map_err(WriteError::Flush)?;
    Ok(rows.len())
}

/// Write `results` to `path` in the format named by its extension.
///
/// Missing parent directories are created and an existing file is replaced.
///
/// # Errors
/// Returns [`WriteError::UnsupportedFormat`] before touching the filesystem
/// when the extension is not `.csv` or `.json`, and the errors of
/// [`write_csv`] or [`write_json`] otherwise.
pub fn write_results<'db, I>(results: I, path: &Utf8Path) -> Result<usize, WriteError>
where
    I: IntoIterator<Item = ApproachRef<'db>>,
{
    let format = OutputFormat::from_path(path).ok_or_else(|| WriteError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    ensure_parent_dir(path).map_err(|source| WriteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    let file = create_utf8_file(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    let written = match format {
        OutputFormat::Csv => write_csv(results, writer)?,
        OutputFormat::Json => write_json(results, writer)?,
    };
    info!("Wrote {written} close approaches to {path}");
    Ok(written)
}
