//! Generator fuel curves and the standard diesel generator catalog.

use serde::{Deserialize, Serialize};

/// Fuel burn of one generator size at the four published load points.
///
/// Rows are immutable reference data. The curve is expected to be
/// non-decreasing with load, but rows that are not are kept as published
/// and reported by [`crate::reference::ReferenceData::data_quality_issues`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorBreakpoint {
    /// Generator size (kVA).
    pub size_kva: u32,
    /// Fuel burn at 25% load (gal/h).
    pub gph_25: f64,
    /// Fuel burn at 50% load (gal/h).
    pub gph_50: f64,
    /// Fuel burn at 75% load (gal/h).
    pub gph_75: f64,
    /// Fuel burn at 100% load (gal/h).
    pub gph_100: f64,
}

impl GeneratorBreakpoint {
    /// `(load_fraction, gph)` pairs in ascending load order.
    pub fn points(&self) -> [(f64, f64); 4] {
        [
            (0.25, self.gph_25),
            (0.50, self.gph_50),
            (0.75, self.gph_75),
            (1.00, self.gph_100),
        ]
    }

    /// True when fuel burn never decreases as load rises.
    pub fn is_monotonic(&self) -> bool {
        self.points().windows(2).all(|w| w[1].1 >= w[0].1)
    }
}

/// Catalog entry for a conventional diesel generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardGeneratorSpec {
    /// Display label, e.g. `"45 kVA"`.
    pub label: String,
    /// Prime rating (kW).
    pub rated_kw: f64,
    /// Fuel burn at 50% load (gal/h).
    pub gph_50: f64,
    /// Fuel burn at 75% load (gal/h).
    pub gph_75: f64,
    /// Fuel burn at 100% load (gal/h).
    pub gph_100: f64,
    /// Fuel tank capacity (gal).
    pub tank_gal: f64,
    /// CO2 emitted per gallon burned (lb).
    pub co2_lb_per_gal: f64,
    /// Sound level at 23 ft (dBA).
    pub noise_db: f64,
    /// Enclosure dimensions, L x W x H.
    pub dimensions: String,
    /// Dry weight (lb).
    pub weight_lbs: f64,
}

impl StandardGeneratorSpec {
    /// Fuel burn for a continuous load, picked from the published buckets.
    ///
    /// No interpolation: a load ratio up to 50% burns at the 50% rate, up to
    /// 75% at the 75% rate, anything above at the 100% rate.
    pub fn fuel_gph_for_load(&self, continuous_kw: f64) -> f64 {
        let ratio = if self.rated_kw > 0.0 {
            continuous_kw / self.rated_kw
        } else {
            0.0
        };
        if ratio <= 0.50 {
            self.gph_50
        } else if ratio <= 0.75 {
            self.gph_75
        } else {
            self.gph_100
        }
    }

    /// Hours of continuous operation on one full tank at the given load.
    pub fn tank_runtime_hours(&self, continuous_kw: f64) -> f64 {
        let gph = self.fuel_gph_for_load(continuous_kw);
        if gph > 0.0 { self.tank_gal / gph } else { 0.0 }
    }
}

/// Diesel CO2 factor (lb per gallon).
pub const DIESEL_CO2_LB_PER_GAL: f64 = 22.4;

fn curve(
    size_kva: u32,
    gph_25: f64,
    gph_50: f64,
    gph_75: f64,
    gph_100: f64,
) -> GeneratorBreakpoint {
    GeneratorBreakpoint {
        size_kva,
        gph_25,
        gph_50,
        gph_75,
        gph_100,
    }
}

/// Published fuel curves, smallest generator first.
pub fn builtin_breakpoints() -> Vec<GeneratorBreakpoint> {
    vec![
        curve(25, 0.67, 0.94, 1.26, 1.62),
        curve(45, 1.04, 1.63, 2.22, 2.83),
        curve(65, 1.40, 2.30, 3.20, 4.10),
        curve(125, 2.60, 4.10, 5.70, 7.40),
        // As published: the 100% point sits below the 75% point.
        curve(220, 4.30, 7.20, 10.50, 10.20),
        curve(400, 7.10, 12.70, 18.20, 23.60),
    ]
}

#[expect(clippy::too_many_arguments)]
fn standard(
    label: &str,
    rated_kw: f64,
    gph_50: f64,
    gph_75: f64,
    gph_100: f64,
    tank_gal: f64,
    noise_db: f64,
    dimensions: &str,
    weight_lbs: f64,
) -> StandardGeneratorSpec {
    StandardGeneratorSpec {
        label: label.to_string(),
        rated_kw,
        gph_50,
        gph_75,
        gph_100,
        tank_gal,
        co2_lb_per_gal: DIESEL_CO2_LB_PER_GAL,
        noise_db,
        dimensions: dimensions.to_string(),
        weight_lbs,
    }
}

/// Conventional towable diesel generators, smallest first.
pub fn builtin_standard_generators() -> Vec<StandardGeneratorSpec> {
    vec![
        standard("25 kVA", 20.0, 0.94, 1.26, 1.62, 54.0, 65.0, "72 x 30 x 46 in", 2100.0),
        standard("45 kVA", 36.0, 1.63, 2.22, 2.83, 85.0, 67.0, "94 x 38 x 59 in", 3500.0),
        standard("65 kVA", 52.0, 2.30, 3.20, 4.10, 118.0, 68.0, "108 x 42 x 66 in", 4600.0),
        standard("125 kVA", 100.0, 4.10, 5.70, 7.40, 208.0, 70.0, "144 x 50 x 80 in", 7600.0),
        standard("220 kVA", 176.0, 7.20, 10.50, 13.10, 340.0, 72.0, "174 x 56 x 88 in", 11200.0),
        standard("400 kVA", 320.0, 12.70, 18.20, 23.60, 600.0, 75.0, "236 x 90 x 96 in", 19800.0),
    ]
}
