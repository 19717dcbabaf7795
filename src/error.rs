//! Error taxonomy for lookups that must not fail silently.
//!
//! Missing configuration and zero denominators are not errors: the engine
//! degrades to zero values so a caller can show "not yet configured".

use thiserror::Error;

/// Failures surfaced to the caller instead of a neutral result.
#[derive(Debug, Error)]
pub enum SizingError {
    #[error("unknown EBOSS model \"{0}\"")]
    UnknownModel(String),

    #[error("unknown standard generator \"{0}\"")]
    UnknownStandardGenerator(String),

    #[error("invalid generator size \"{0}\" (expected e.g. \"65kVA\")")]
    InvalidGeneratorSize(String),

    #[error("reference data: {0}")]
    ReferenceData(String),
}
