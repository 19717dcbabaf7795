//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use eboss_sizer::economics::CostInputs;
use eboss_sizer::reference::ReferenceData;
use eboss_sizer::sizing::{DerivedSpec, SizingRequest, compute_sizing};

/// Compiled-in catalog.
pub fn builtin_data() -> ReferenceData {
    ReferenceData::builtin()
}

/// EB70 Full Hybrid under `continuous_kw`.
pub fn eb70_full_hybrid(continuous_kw: f64) -> SizingRequest {
    SizingRequest::full_hybrid("EB70 kVA", continuous_kw)
}

/// EB125 Power Module paired with a 65 kVA generator.
pub fn eb125_power_module(continuous_kw: f64) -> SizingRequest {
    SizingRequest::power_module("EB125 kVA", 65, continuous_kw)
}

/// Runs the real pipeline against the built-in catalog.
pub fn size(request: &SizingRequest) -> DerivedSpec {
    compute_sizing(&builtin_data(), request).unwrap_or_else(|e| panic!("sizing failed: {e}"))
}

/// $3.50/gal, $150 delivery, $1200/wk, $3600/mo, service every 500 h at $250.
pub fn default_terms() -> CostInputs {
    CostInputs::default()
}

/// Asserts `a` and `b` agree to within `tol`.
pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() < tol, "expected {b}, got {a} (tolerance {tol})");
}
