/// Spec cache keyed by the sizing request.
pub mod cache;
/// Charge rate from the model/generator pairing.
pub mod charge_rate;
/// Battery cycle timing.
pub mod cycle;
pub mod engine;
/// Fuel-curve interpolation.
pub mod interpolate;
pub mod types;

pub use cache::SpecCache;
pub use engine::{SizingPipeline, compute_sizing};
pub use types::{DerivedSpec, EbossType, LoadProfile, SizingRequest};
