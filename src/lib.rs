//! Sizing and fuel economics for EBOSS hybrid battery/generator units.
//!
//! The pipeline runs one way: reference data, then charge rate, battery
//! cycle model, fuel-curve interpolation, and cost rollups, ending in a
//! comparison against a standard diesel generator. [`sizing::SpecCache`]
//! memoizes the sizing step per request.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod economics;
pub mod error;
pub mod io;
pub mod logging;
pub mod reference;
pub mod report;
pub mod sizing;

pub use error::SizingError;
