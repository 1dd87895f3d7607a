//! Core model for near-Earth objects and their close approaches.
//!
//! Records are turned into [`NearEarthObject`] and [`CloseApproach`]
//! entities, linked once by [`NeoDatabase::new`], and then queried through
//! lazy, filter-driven traversals. The database is read-only after
//! construction.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod database;
pub mod filter;
pub mod model;
mod query;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use database::{ApproachRef, NeoDatabase, NeoRef};
pub use filter::{ApproachFilter, ApproachPredicate, FilterCriteria, limit};
pub use model::{
    ApproachFields, ApproachId, CloseApproach, DISPLAY_TIME_FORMAT, FieldError, NearEarthObject,
    NeoFields, NeoId, SOURCE_TIME_FORMAT,
};
pub use query::Query;
