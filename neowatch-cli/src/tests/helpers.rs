//! Test helpers for writing small datasets into temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

pub(super) const NEOS_CSV: &str = "\
pdes,name,diameter,pha
433,Eros,16.84,N
99942,Apophis,0.37,Y
2020 AB,,,Y
";

/// Close approaches as `(designation, time, distance, velocity)`.
pub(super) const APPROACHES: [(&str, &str, &str, &str); 4] = [
    ("433", "1900-Jan-01 00:11", "0.0921795123769547", "16.7523040362574"),
    ("99942", "2029-Apr-13 21:46", "0.000254099098170977", "7.42221385873062"),
    ("2020 AB", "2020-Jan-11 00:00", "0.0412", ""),
    ("2019 OK", "2019-Jul-25 01:22", "0.000480", "24.5"),
];

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// Encode close approaches in the CAD layout, with an extra column in between.
pub(super) fn cad_json(rows: &[(&str, &str, &str, &str)]) -> String {
    let data: Vec<_> = rows
        .iter()
        .map(|&(des, cd, dist, v_rel)| json!([des, "1", cd, dist, v_rel]))
        .collect();
    let document = json!({
        "signature": {"version": "1.1"},
        "count": rows.len().to_string(),
        "fields": ["des", "orbit_id", "cd", "dist", "v_rel"],
        "data": data,
    });
    serde_json::to_string_pretty(&document).expect("encode CAD JSON")
}

/// A temporary directory holding a NEO CSV and a CAD JSON file.
#[derive(Debug)]
pub(super) struct DatasetFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DatasetFiles {
    pub(super) fn new() -> Self {
        Self::with_approaches(&APPROACHES)
    }

    pub(super) fn with_approaches(rows: &[(&str, &str, &str, &str)]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("neos.csv"), NEOS_CSV.as_bytes());
        write_utf8(&root.join("cad.json"), cad_json(rows).as_bytes());
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn neofile(&self) -> Utf8PathBuf {
        self.root.join("neos.csv")
    }

    pub(super) fn cadfile(&self) -> Utf8PathBuf {
        self.root.join("cad.json")
    }
}
