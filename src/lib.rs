//! Facade crate for the `neowatch` near-Earth object explorer.
//!
//! This crate re-exports the linked database, its filters and lazy queries,
//! and, behind the default `data` feature, the dataset loaders and result
//! writers.

#![forbid(unsafe_code)]

pub use neowatch_core::{
    ApproachFields, ApproachFilter, ApproachId, ApproachPredicate, ApproachRef, CloseApproach,
    FieldError, FilterCriteria, NearEarthObject, NeoDatabase, NeoFields, NeoId, NeoRef, Query,
    limit,
};

#[cfg(feature = "data")]
pub use neowatch_data::{
    LoadError, OutputFormat, WriteError, load_approaches, load_neos, read_approaches, read_neos,
    write_csv, write_json, write_results,
};

#[cfg(feature = "test-support")]
pub use neowatch_core::test_support;
