//! Cost rollups and the hybrid-versus-standard comparison.

pub mod compare;
pub mod rollup;

pub use compare::{ComparisonResult, compare_to_standard};
pub use rollup::{
    CostBreakdown, CostInputs, CostSummary, FuelProfile, Period, compute_costs,
    compute_standard_costs, rollup, standard_profile,
};
