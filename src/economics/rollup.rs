//! Fuel, rental, delivery, and maintenance cost rollups per billing period.
//!
//! Delivery convention: `delivery_fee` is a per-week figure. Weekly totals
//! use it as is and monthly totals scale it by [`MONTHLY_DELIVERY_FACTOR`].
//! The EBOSS unit and the standard generator follow the same convention.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::StandardGeneratorSpec;
use crate::reference::generators::DIESEL_CO2_LB_PER_GAL;
use crate::sizing::cycle::HOURS_PER_DAY;
use crate::sizing::engine::{DAYS_PER_MONTH, DAYS_PER_WEEK};
use crate::sizing::types::DerivedSpec;

/// Average weeks per month, applied to the weekly delivery fee.
pub const MONTHLY_DELIVERY_FACTOR: f64 = 4.3;
/// Pounds per short ton.
pub const LB_PER_TON: f64 = 2000.0;

/// Billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Weekly,
    Monthly,
}

impl Period {
    /// Both periods, shortest first.
    pub const ALL: [Period; 2] = [Period::Weekly, Period::Monthly];

    /// Days covered by the period.
    pub fn days(self) -> f64 {
        match self {
            Self::Weekly => DAYS_PER_WEEK,
            Self::Monthly => DAYS_PER_MONTH,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// Business terms for one unit, supplied per cost query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostInputs {
    /// Diesel price ($/gal).
    pub fuel_price_per_gal: f64,
    /// Delivery/pickup fee per week ($).
    pub delivery_fee: f64,
    /// Rental rate for a week ($).
    pub rental_rate_weekly: f64,
    /// Rental rate for a month ($).
    pub rental_rate_monthly: f64,
    /// Engine hours between services (0 disables PM costs).
    pub pm_interval_hours: f64,
    /// Cost of one service ($).
    pub pm_cost_per_service: f64,
}

impl Default for CostInputs {
    fn default() -> Self {
        Self {
            fuel_price_per_gal: 3.50,
            delivery_fee: 150.0,
            rental_rate_weekly: 1200.0,
            rental_rate_monthly: 3600.0,
            pm_interval_hours: 500.0,
            pm_cost_per_service: 250.0,
        }
    }
}

impl CostInputs {
    /// Rental charge for the period.
    pub fn rental_rate(&self, period: Period) -> f64 {
        match period {
            Period::Weekly => self.rental_rate_weekly,
            Period::Monthly => self.rental_rate_monthly,
        }
    }

    /// Delivery charge for the period.
    pub fn delivery(&self, period: Period) -> f64 {
        match period {
            Period::Weekly => self.delivery_fee,
            Period::Monthly => self.delivery_fee * MONTHLY_DELIVERY_FACTOR,
        }
    }

    /// Names of fields holding negative values.
    pub fn negative_fields(&self) -> Vec<&'static str> {
        [
            ("fuel_price_per_gal", self.fuel_price_per_gal),
            ("delivery_fee", self.delivery_fee),
            ("rental_rate_weekly", self.rental_rate_weekly),
            ("rental_rate_monthly", self.rental_rate_monthly),
            ("pm_interval_hours", self.pm_interval_hours),
            ("pm_cost_per_service", self.pm_cost_per_service),
        ]
        .into_iter()
        .filter(|&(_, v)| v < 0.0)
        .map(|(name, _)| name)
        .collect()
    }
}

/// How a unit burns fuel over a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelProfile {
    /// Burn rate while the engine runs (gal/h).
    pub fuel_gph: f64,
    /// Engine hours per day.
    pub runtime_hours_per_day: f64,
    /// CO2 per gallon (lb).
    pub co2_lb_per_gal: f64,
}

impl From<&DerivedSpec> for FuelProfile {
    fn from(spec: &DerivedSpec) -> Self {
        Self {
            fuel_gph: spec.fuel_gph,
            runtime_hours_per_day: spec.runtime_hours_per_day,
            co2_lb_per_gal: DIESEL_CO2_LB_PER_GAL,
        }
    }
}

/// A standard generator runs around the clock at its bucketed burn rate.
pub fn standard_profile(generator: &StandardGeneratorSpec, continuous_kw: f64) -> FuelProfile {
    FuelProfile {
        fuel_gph: generator.fuel_gph_for_load(continuous_kw),
        runtime_hours_per_day: HOURS_PER_DAY,
        co2_lb_per_gal: generator.co2_lb_per_gal,
    }
}

/// Costs and consumption for one unit over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub period: Period,
    /// Engine hours in the period.
    pub runtime_hours: f64,
    /// Fuel burned (gal).
    pub gallons: f64,
    /// Maintenance services due (fractional).
    pub pm_services: f64,
    /// CO2 emitted (short tons).
    pub co2_tons: f64,
    pub rental: f64,
    pub fuel_cost: f64,
    pub delivery: f64,
    pub pm_cost: f64,
    /// `rental + fuel_cost + delivery + pm_cost`.
    pub total: f64,
}

/// Rolls a fuel profile up into period costs.
pub fn rollup(profile: &FuelProfile, inputs: &CostInputs, period: Period) -> CostBreakdown {
    let runtime_hours = profile.runtime_hours_per_day * period.days();
    let gallons = runtime_hours * profile.fuel_gph;
    let fuel_cost = gallons * inputs.fuel_price_per_gal;
    let pm_services = if inputs.pm_interval_hours > 0.0 {
        runtime_hours / inputs.pm_interval_hours
    } else {
        0.0
    };
    let pm_cost = pm_services * inputs.pm_cost_per_service;
    let co2_tons = gallons * profile.co2_lb_per_gal / LB_PER_TON;
    let rental = inputs.rental_rate(period);
    let delivery = inputs.delivery(period);

    CostBreakdown {
        period,
        runtime_hours,
        gallons,
        pm_services,
        co2_tons,
        rental,
        fuel_cost,
        delivery,
        pm_cost,
        total: rental + fuel_cost + delivery + pm_cost,
    }
}

/// Period costs of an EBOSS unit from its sizing result.
pub fn compute_costs(spec: &DerivedSpec, inputs: &CostInputs, period: Period) -> CostBreakdown {
    rollup(&FuelProfile::from(spec), inputs, period)
}

/// Period costs of a standard generator carrying `continuous_kw`.
pub fn compute_standard_costs(
    generator: &StandardGeneratorSpec,
    continuous_kw: f64,
    inputs: &CostInputs,
    period: Period,
) -> CostBreakdown {
    rollup(&standard_profile(generator, continuous_kw), inputs, period)
}

/// Weekly and monthly breakdowns for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub weekly: CostBreakdown,
    pub monthly: CostBreakdown,
}

impl CostSummary {
    /// Rolls `profile` up for both periods.
    pub fn new(profile: &FuelProfile, inputs: &CostInputs) -> Self {
        Self {
            weekly: rollup(profile, inputs, Period::Weekly),
            monthly: rollup(profile, inputs, Period::Monthly),
        }
    }

    /// Breakdown for `period`.
    pub fn period(&self, period: Period) -> &CostBreakdown {
        match period {
            Period::Weekly => &self.weekly,
            Period::Monthly => &self.monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::generators::builtin_standard_generators;

    fn scenario_inputs() -> CostInputs {
        CostInputs {
            fuel_price_per_gal: 3.50,
            delivery_fee: 50.0,
            rental_rate_weekly: 500.0,
            rental_rate_monthly: 1800.0,
            pm_interval_hours: 500.0,
            pm_cost_per_service: 200.0,
        }
    }

    fn profile(fuel_gph: f64, runtime_hours_per_day: f64) -> FuelProfile {
        FuelProfile {
            fuel_gph,
            runtime_hours_per_day,
            co2_lb_per_gal: DIESEL_CO2_LB_PER_GAL,
        }
    }

    #[test]
    fn weekly_scenario() {
        let b = rollup(&profile(2.0, 6.0), &scenario_inputs(), Period::Weekly);
        assert!((b.runtime_hours - 42.0).abs() < 1e-9);
        assert!((b.gallons - 84.0).abs() < 1e-9);
        assert!((b.fuel_cost - 294.0).abs() < 1e-9);
        assert!((b.pm_services - 0.084).abs() < 1e-9);
        assert!((b.pm_cost - 16.8).abs() < 1e-9);
        assert!((b.total - 860.8).abs() < 1e-9);
        assert!((b.co2_tons - 84.0 * 22.4 / 2000.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_scales_delivery() {
        let b = rollup(&profile(2.0, 6.0), &scenario_inputs(), Period::Monthly);
        assert!((b.runtime_hours - 180.0).abs() < 1e-9);
        assert!((b.delivery - 215.0).abs() < 1e-9);
        assert_eq!(b.rental, 1800.0);
        let expected = 1800.0 + 360.0 * 3.5 + 215.0 + 180.0 / 500.0 * 200.0;
        assert!((b.total - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_pm_interval_means_no_pm_cost() {
        let mut inputs = scenario_inputs();
        inputs.pm_interval_hours = 0.0;
        let b = rollup(&profile(2.0, 6.0), &inputs, Period::Weekly);
        assert_eq!(b.pm_services, 0.0);
        assert_eq!(b.pm_cost, 0.0);
    }

    #[test]
    fn idle_unit_pays_only_fixed_charges() {
        let b = rollup(&profile(0.0, 0.0), &scenario_inputs(), Period::Weekly);
        assert_eq!(b.total, 550.0);
    }

    #[test]
    fn standard_generator_runs_all_day() {
        let gens = builtin_standard_generators();
        let g = &gens[1]; // 45 kVA, 36 kW
        let b = compute_standard_costs(g, 10.0, &scenario_inputs(), Period::Weekly);
        assert!((b.runtime_hours - 168.0).abs() < 1e-9);
        assert!((b.gallons - 168.0 * 1.63).abs() < 1e-9);
    }

    #[test]
    fn negative_terms_are_named() {
        let mut inputs = scenario_inputs();
        inputs.fuel_price_per_gal = -1.0;
        inputs.pm_cost_per_service = -5.0;
        assert_eq!(
            inputs.negative_fields(),
            vec!["fuel_price_per_gal", "pm_cost_per_service"]
        );
        assert!(CostInputs::default().negative_fields().is_empty());
    }

    #[test]
    fn summary_holds_both_periods() {
        let s = CostSummary::new(&profile(1.0, 4.0), &scenario_inputs());
        assert_eq!(s.period(Period::Weekly).period, Period::Weekly);
        assert_eq!(s.period(Period::Monthly).period, Period::Monthly);
    }
}
