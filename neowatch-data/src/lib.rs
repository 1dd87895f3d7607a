//! File adapters around the `neowatch` core model.
//!
//! Responsibilities:
//! - Read the NEO CSV and close-approach JSON datasets into entities.
//! - Write query results as CSV or JSON.
//!
//! Boundaries:
//! - Do not encode linking or filtering rules (live in `neowatch-core`).
//! - All filesystem access goes through `neowatch-fs`.
#![forbid(unsafe_code)]

mod load;
mod write;

pub use load::{LoadError, load_approaches, load_neos, read_approaches, read_neos};
pub use write::{OutputFormat, WriteError, write_csv, write_json, write_results};
