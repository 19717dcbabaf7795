//! One complete scenario evaluation: sizing, both cost summaries, and the
//! comparison between them.

use std::fmt;

use serde::Serialize;

use crate::config::ScenarioConfig;
use crate::economics::{
    ComparisonResult, CostBreakdown, CostSummary, FuelProfile, compare_to_standard,
    standard_profile,
};
use crate::error::SizingError;
use crate::reference::{ReferenceData, StandardGeneratorSpec};
use crate::sizing::{DerivedSpec, EbossType, LoadProfile, SizingPipeline, SpecCache};

/// Result of evaluating a [`ScenarioConfig`].
#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    pub model_id: String,
    pub eboss_type: EbossType,
    pub load: LoadProfile,
    /// Sizing result for the EBOSS unit.
    pub spec: DerivedSpec,
    /// Catalog charge rate for the unit's configuration (kW).
    pub nominal_charge_rate_kw: f64,
    /// Smallest catalog model whose rating covers the peak load.
    pub recommended_model: Option<String>,
    /// Label of the standard generator compared against.
    pub standard_generator: String,
    /// Bucketed burn rate of the standard generator (gal/h).
    pub standard_fuel_gph: f64,
    /// Hours the standard generator runs on one tank.
    pub standard_tank_runtime_hours: f64,
    pub eboss_costs: CostSummary,
    pub standard_costs: CostSummary,
    pub comparison: ComparisonResult,
    /// Non-fatal remarks about the inputs.
    pub advisories: Vec<String>,
}

impl SizingReport {
    /// Evaluates `scenario`, reusing `cache` for the sizing step.
    ///
    /// # Errors
    ///
    /// Returns `SizingError::UnknownModel` or
    /// `SizingError::UnknownStandardGenerator` if a lookup fails.
    pub fn build(
        data: &ReferenceData,
        cache: &mut SpecCache,
        scenario: &ScenarioConfig,
    ) -> Result<Self, SizingError> {
        let request = scenario.sizing_request();
        let spec = cache.get_or_compute(data, &request)?;
        Self::assemble(data, scenario, spec)
    }

    /// Evaluates `scenario` with any pipeline, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Same as [`SizingReport::build`].
    pub fn build_uncached<P: SizingPipeline + ?Sized>(
        data: &ReferenceData,
        pipeline: &P,
        scenario: &ScenarioConfig,
    ) -> Result<Self, SizingError> {
        let spec = pipeline.compute(&scenario.sizing_request())?;
        Self::assemble(data, scenario, spec)
    }

    fn assemble(
        data: &ReferenceData,
        scenario: &ScenarioConfig,
        spec: DerivedSpec,
    ) -> Result<Self, SizingError> {
        let load = scenario.load_profile();
        let standard = select_standard(data, scenario, &load)?;

        let standard_profile = standard_profile(standard, load.continuous_kw);
        let eboss_costs = CostSummary::new(&FuelProfile::from(&spec), &scenario.eboss_costs);
        let standard_costs = CostSummary::new(&standard_profile, &scenario.standard_costs);
        let comparison = compare_to_standard(&eboss_costs, &standard_costs);

        let model = data.model(&scenario.sizing.model)?;
        let recommended_model = data.recommend_model(load.peak_kw).map(|m| m.model_id.clone());

        let mut advisories = scenario.advisories();
        if load.peak_kw > model.rated_kw() {
            advisories.push(format!(
                "peak load {:.1} kW exceeds the {} rating of {:.1} kW",
                load.peak_kw,
                model.model_id,
                model.rated_kw()
            ));
        }
        for note in &advisories {
            tracing::warn!("{note}");
        }

        Ok(Self {
            model_id: scenario.sizing.model.clone(),
            eboss_type: scenario.sizing.eboss_type,
            load,
            spec,
            nominal_charge_rate_kw: model.nominal_charge_rate_kw(scenario.sizing.eboss_type),
            recommended_model,
            standard_generator: standard.label.clone(),
            standard_fuel_gph: standard_profile.fuel_gph,
            standard_tank_runtime_hours: standard.tank_runtime_hours(load.continuous_kw),
            eboss_costs,
            standard_costs,
            comparison,
            advisories,
        })
    }

    /// `(unit, breakdown)` rows: EBOSS weekly, monthly, then standard.
    pub fn cost_rows(&self) -> [(&'static str, &CostBreakdown); 4] {
        [
            ("eboss", &self.eboss_costs.weekly),
            ("eboss", &self.eboss_costs.monthly),
            ("standard", &self.standard_costs.weekly),
            ("standard", &self.standard_costs.monthly),
        ]
    }
}

/// The configured standard generator, or the smallest one covering the peak.
fn select_standard<'a>(
    data: &'a ReferenceData,
    scenario: &ScenarioConfig,
    load: &LoadProfile,
) -> Result<&'a StandardGeneratorSpec, SizingError> {
    match scenario.standard.generator.as_deref() {
        Some(label) => data.standard_generator(label),
        None => data
            .recommend_standard_generator(load.peak_kw)
            .ok_or_else(|| SizingError::UnknownStandardGenerator("(catalog empty)".into())),
    }
}

fn write_costs(f: &mut fmt::Formatter<'_>, label: &str, costs: &CostSummary) -> fmt::Result {
    writeln!(f, "{label}")?;
    writeln!(
        f,
        "  {:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "period", "gallons", "rental", "fuel", "delivery", "pm", "total"
    )?;
    for b in [&costs.weekly, &costs.monthly] {
        writeln!(
            f,
            "  {:<8} {:>10.1} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            b.period.to_string(),
            b.gallons,
            b.rental,
            b.fuel_cost,
            b.delivery,
            b.pm_cost,
            b.total
        )?;
    }
    Ok(())
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ({}) ---", self.model_id, self.eboss_type)?;
        writeln!(
            f,
            "Load:                  {:.1} kW continuous, {:.1} kW peak",
            self.load.continuous_kw, self.load.peak_kw
        )?;
        for note in &self.advisories {
            writeln!(f, "Warning: {note}")?;
        }
        if let Some(ref id) = self.recommended_model {
            writeln!(f, "Recommended model:     {id}")?;
        }
        writeln!(
            f,
            "Nominal charge rate:   {:.1} kW",
            self.nominal_charge_rate_kw
        )?;
        writeln!(f, "{}", self.spec)?;
        writeln!(f)?;
        writeln!(f, "--- Standard generator: {} ---", self.standard_generator)?;
        writeln!(f, "Fuel burn:             {:.2} gal/h, 24 h/day", self.standard_fuel_gph)?;
        writeln!(
            f,
            "Tank runtime:          {:.1} h",
            self.standard_tank_runtime_hours
        )?;
        writeln!(f)?;
        writeln!(f, "--- Costs ---")?;
        write_costs(f, "EBOSS", &self.eboss_costs)?;
        write_costs(f, "Standard", &self.standard_costs)?;
        writeln!(f)?;
        write!(f, "{}", self.comparison)
    }
}
