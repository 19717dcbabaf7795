//! The sizing pipeline: reference data, then charge rate, cycle model,
//! fuel curve, and fuel totals.

use super::charge_rate::{charge_rate_kw, generator_kva_used, max_charge_rate_kw};
use super::cycle::{CycleModel, engine_load_percent};
use super::interpolate::interpolate_gph;
use super::types::{DerivedSpec, SizingRequest};
use crate::error::SizingError;
use crate::reference::ReferenceData;
use crate::reference::generators::DIESEL_CO2_LB_PER_GAL;
use crate::reference::models::POWER_FACTOR;

/// Days per week used for weekly fuel totals.
pub const DAYS_PER_WEEK: f64 = 7.0;
/// Days per month used for monthly fuel totals.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Days per year used for yearly fuel totals.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Anything that can turn a [`SizingRequest`] into a [`DerivedSpec`].
///
/// The cache is generic over this so it can wrap the real engine or an
/// instrumented one.
pub trait SizingPipeline {
    /// Runs the full pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns `SizingError::UnknownModel` if the model is not in the catalog.
    fn compute(&self, request: &SizingRequest) -> Result<DerivedSpec, SizingError>;
}

impl SizingPipeline for ReferenceData {
    fn compute(&self, request: &SizingRequest) -> Result<DerivedSpec, SizingError> {
        compute_sizing(self, request)
    }
}

/// Runs the whole sizing pipeline for one request.
///
/// Works on [`SizingRequest::canonical`], so the result depends only on the
/// request's cache key. Missing generator configuration degrades to a zero charge rate and zero
/// fuel use rather than an error.
///
/// # Errors
///
/// Returns `SizingError::UnknownModel` if `request.model_id` is not in `data`.
pub fn compute_sizing(
    data: &ReferenceData,
    request: &SizingRequest,
) -> Result<DerivedSpec, SizingError> {
    let request = &request.canonical();
    let model = data.model(&request.model_id)?;
    let eboss_type = request.eboss_type;

    let gen_kva_used = generator_kva_used(model, eboss_type, request.generator_kva);
    let charge_rate_kw = charge_rate_kw(
        model,
        eboss_type,
        request.generator_kva,
        request.custom_charge_rate_kw,
    );
    let max_charge_rate_kw = max_charge_rate_kw(model, eboss_type, request.generator_kva);

    let generator_kw = gen_kva_used.map_or(0.0, |kva| f64::from(kva) * POWER_FACTOR);
    let engine_load_percent = engine_load_percent(charge_rate_kw, generator_kw);

    let cycle = CycleModel::new(model.battery_kwh, request.continuous_kw, charge_rate_kw);
    let runtime_hours_per_day = cycle.engine_runtime_hours_per_day();

    // Passed as a fraction so a light load is never read as a percentage.
    let fuel_gph = gen_kva_used.map_or(0.0, |kva| {
        interpolate_gph(data, kva, engine_load_percent / 100.0)
    });

    let gallons_per_day = fuel_gph * runtime_hours_per_day;

    tracing::debug!(
        model = %request.model_id,
        eboss_type = %eboss_type,
        continuous_kw = request.continuous_kw,
        charge_rate_kw,
        engine_load_percent,
        fuel_gph,
        "sizing computed"
    );

    Ok(DerivedSpec {
        charge_rate_kw,
        max_charge_rate_kw,
        engine_load_percent,
        gen_kva_used,
        battery_life_hours: cycle.battery_life_hours,
        charge_time_hours: cycle.charge_time_hours,
        cycles_per_day: cycle.cycles_per_day,
        runtime_hours_per_day,
        fuel_gph,
        gallons_per_day,
        gallons_per_week: gallons_per_day * DAYS_PER_WEEK,
        gallons_per_month: gallons_per_day * DAYS_PER_MONTH,
        gallons_per_year: gallons_per_day * DAYS_PER_YEAR,
        co2_per_day: gallons_per_day * DIESEL_CO2_LB_PER_GAL,
    })
}
