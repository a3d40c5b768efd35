//! Domain models produced and consumed by the invoice pipeline.
//!
//! These are plain data types, persistence models live in the `entity` crate.

pub mod ledger;
pub mod report;
pub mod summary;
