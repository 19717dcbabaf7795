//! Piecewise-linear fuel-curve lookup.

use super::types::round_to;
use crate::reference::{GeneratorBreakpoint, ReferenceData};

/// Lowest published load point.
pub const MIN_LOAD_FRACTION: f64 = 0.25;
/// Highest published load point.
pub const MAX_LOAD_FRACTION: f64 = 1.00;

/// Largest value read as a fraction; anything above is a percentage.
pub const MAX_FRACTION_INPUT: f64 = 2.0;

/// Accepts either a fraction (up to 2.0, i.e. 200%) or a percentage and
/// returns a fraction.
pub fn normalize_load_fraction(load: f64) -> f64 {
    if load > MAX_FRACTION_INPUT {
        load / 100.0
    } else {
        load
    }
}

/// Interpolated fuel burn (gal/h) for one fuel-curve row, rounded to 4 dp.
///
/// The load is clamped to the published `[0.25, 1.00]` range first, so
/// light loads burn at the 25% rate and overloads at the 100% rate.
pub fn interpolate_row(row: &GeneratorBreakpoint, load_fraction: f64) -> f64 {
    let x = normalize_load_fraction(load_fraction).clamp(MIN_LOAD_FRACTION, MAX_LOAD_FRACTION);
    let points = row.points();

    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        if x >= x1 && x <= x2 {
            let y = y1 + (x - x1) * (y2 - y1) / (x2 - x1);
            return round_to(y, 4);
        }
    }

    // Unreachable after the clamp; NaN input lands here.
    round_to(points[0].1, 4)
}

/// Fuel burn (gal/h) for `generator_kva` at `load_fraction`.
///
/// Sizes without a published row use the nearest row, ties going to the
/// smaller generator. An empty table burns nothing.
pub fn interpolate_gph(data: &ReferenceData, generator_kva: u32, load_fraction: f64) -> f64 {
    data.nearest_breakpoint(generator_kva)
        .map_or(0.0, |row| interpolate_row(row, load_fraction))
}
