//! Request and result types shared by the sizing pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// EBOSS configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EbossType {
    /// Integrated, fixed generator pairing.
    FullHybrid,
    /// Paired with a separately selected generator.
    PowerModule,
}

impl fmt::Display for EbossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullHybrid => write!(f, "Full Hybrid"),
            Self::PowerModule => write!(f, "Power Module"),
        }
    }
}

/// Customer load. `continuous_kw <= peak_kw` is advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadProfile {
    /// Average sustained load (kW).
    pub continuous_kw: f64,
    /// Highest expected load (kW).
    pub peak_kw: f64,
}

impl LoadProfile {
    /// True when the continuous figure exceeds the peak.
    pub fn is_inverted(&self) -> bool {
        self.continuous_kw > self.peak_kw
    }
}

/// Inputs for one sizing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// EBOSS catalog id, e.g. `"EB70 kVA"`.
    pub model_id: String,
    /// Configuration of the unit.
    pub eboss_type: EbossType,
    /// Separately selected generator (kVA). Required for Power Module.
    #[serde(default)]
    pub generator_kva: Option<u32>,
    /// Continuous customer load (kW).
    pub continuous_kw: f64,
    /// Caller-supplied charge rate that bypasses the calculation (kW).
    #[serde(default)]
    pub custom_charge_rate_kw: Option<f64>,
}

impl SizingRequest {
    /// A Full Hybrid request with no overrides.
    pub fn full_hybrid(model_id: &str, continuous_kw: f64) -> Self {
        Self {
            model_id: model_id.to_string(),
            eboss_type: EbossType::FullHybrid,
            generator_kva: None,
            continuous_kw,
            custom_charge_rate_kw: None,
        }
    }

    /// A Power Module request paired with `generator_kva`.
    pub fn power_module(model_id: &str, generator_kva: u32, continuous_kw: f64) -> Self {
        Self {
            model_id: model_id.to_string(),
            eboss_type: EbossType::PowerModule,
            generator_kva: Some(generator_kva),
            continuous_kw,
            custom_charge_rate_kw: None,
        }
    }

    /// The request with its kW figures rounded to [`KEY_DECIMALS`].
    ///
    /// Both the cache key and the pipeline work from this form, so two
    /// requests sharing a key always share a result.
    pub fn canonical(&self) -> Self {
        Self {
            continuous_kw: round_to(self.continuous_kw, KEY_DECIMALS),
            custom_charge_rate_kw: self
                .custom_charge_rate_kw
                .map(|rate| round_to(rate, KEY_DECIMALS)),
            ..self.clone()
        }
    }

    /// Canonical cache key built from every field.
    ///
    /// Format: `model|type|continuous_kw(3dp)|generator_kva|custom_rate(3dp)`,
    /// with `-` standing in for absent optional values.
    pub fn cache_key(&self) -> String {
        let canonical = self.canonical();
        let generator = self
            .generator_kva
            .map_or_else(|| "-".to_string(), |kva| kva.to_string());
        let custom = canonical
            .custom_charge_rate_kw
            .map_or_else(|| "-".to_string(), |rate| format!("{rate:.3}"));
        format!(
            "{}|{}|{:.3}|{}|{}",
            self.model_id, self.eboss_type, canonical.continuous_kw, generator, custom
        )
    }
}

/// Decimal places kept for kW inputs in keys and computation.
pub const KEY_DECIMALS: i32 = 3;

/// Everything the engine derives from one [`SizingRequest`].
///
/// Produced whole by a single pipeline run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSpec {
    /// Effective charging power delivered to the battery (kW).
    pub charge_rate_kw: f64,
    /// Charger ceiling given the pairing (kW).
    pub max_charge_rate_kw: f64,
    /// Share of the generator's rating consumed while charging (0-100).
    pub engine_load_percent: f64,
    /// Generator actually paired with the unit (kVA), if any.
    pub gen_kva_used: Option<u32>,
    /// Hours the battery alone carries the load.
    pub battery_life_hours: f64,
    /// Hours to recharge the battery from empty.
    pub charge_time_hours: f64,
    /// Full discharge/recharge loops per day.
    pub cycles_per_day: f64,
    /// Generator hours per day.
    pub runtime_hours_per_day: f64,
    /// Fuel burn while the generator runs (gal/h).
    pub fuel_gph: f64,
    pub gallons_per_day: f64,
    pub gallons_per_week: f64,
    pub gallons_per_month: f64,
    pub gallons_per_year: f64,
    /// CO2 emitted per day (lb).
    pub co2_per_day: f64,
}

impl DerivedSpec {
    /// False when required inputs were missing and the pipeline degraded
    /// to a zero charge rate.
    pub fn is_configured(&self) -> bool {
        self.charge_rate_kw > 0.0
    }
}

impl fmt::Display for DerivedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing ---")?;
        if !self.is_configured() {
            writeln!(f, "Not yet configured: select a generator size.")?;
        }
        writeln!(f, "Charge rate:           {:.1} kW", self.charge_rate_kw)?;
        writeln!(f, "Max charge rate:       {:.1} kW", self.max_charge_rate_kw)?;
        match self.gen_kva_used {
            Some(kva) => writeln!(f, "Generator:             {kva} kVA")?,
            None => writeln!(f, "Generator:             -")?,
        }
        writeln!(f, "Engine load:           {:.1}%", self.engine_load_percent)?;
        writeln!(f, "Battery life:          {:.2} h", self.battery_life_hours)?;
        writeln!(f, "Charge time:           {:.2} h", self.charge_time_hours)?;
        writeln!(f, "Cycles per day:        {:.2}", self.cycles_per_day)?;
        writeln!(f, "Engine runtime:        {:.2} h/day", self.runtime_hours_per_day)?;
        writeln!(f, "Fuel burn:             {:.4} gal/h", self.fuel_gph)?;
        writeln!(
            f,
            "Fuel use:              {:.1} gal/day, {:.1} gal/week, {:.1} gal/month",
            self.gallons_per_day, self.gallons_per_week, self.gallons_per_month
        )?;
        write!(f, "CO2:                   {:.1} lb/day", self.co2_per_day)
    }
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
