//! EBOSS model catalog.

use serde::{Deserialize, Serialize};

use crate::sizing::types::EbossType;

/// kVA to kW at a 0.8 power factor.
pub const POWER_FACTOR: f64 = 0.8;

/// Commercial specification of one EBOSS model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EbossModelSpec {
    /// Catalog identifier, e.g. `"EB70 kVA"`.
    pub model_id: String,
    /// Continuous output rating of the unit (kVA).
    pub rated_kva: u32,
    /// Usable battery capacity (kWh).
    pub battery_kwh: f64,
    /// Published charge rate in the Power Module configuration (kW).
    pub pm_charge_rate_kw: f64,
    /// Published charge rate in the Full Hybrid configuration (kW).
    pub fh_charge_rate_kw: f64,
    /// Ceiling of the unit's own charger (kW).
    pub max_charge_rate_kw: f64,
    /// Size of the integrated generator used by the Full Hybrid pairing (kVA).
    pub hybrid_generator_kva: u32,
}

impl EbossModelSpec {
    /// Rated output of the integrated generator (kW).
    pub fn paired_generator_kw(&self) -> f64 {
        f64::from(self.hybrid_generator_kva) * POWER_FACTOR
    }

    /// Continuous output of the unit itself (kW).
    pub fn rated_kw(&self) -> f64 {
        f64::from(self.rated_kva) * POWER_FACTOR
    }

    /// Published charge rate for the given configuration.
    pub fn nominal_charge_rate_kw(&self, eboss_type: EbossType) -> f64 {
        match eboss_type {
            EbossType::FullHybrid => self.fh_charge_rate_kw,
            EbossType::PowerModule => self.pm_charge_rate_kw,
        }
    }
}

fn model(
    model_id: &str,
    rated_kva: u32,
    battery_kwh: f64,
    pm_charge_rate_kw: f64,
    fh_charge_rate_kw: f64,
    max_charge_rate_kw: f64,
    hybrid_generator_kva: u32,
) -> EbossModelSpec {
    EbossModelSpec {
        model_id: model_id.to_string(),
        rated_kva,
        battery_kwh,
        pm_charge_rate_kw,
        fh_charge_rate_kw,
        max_charge_rate_kw,
        hybrid_generator_kva,
    }
}

/// The five commercial models, smallest first.
pub fn builtin_models() -> Vec<EbossModelSpec> {
    vec![
        model("EB25 kVA", 25, 15.0, 17.6, 19.6, 20.0, 25),
        model("EB70 kVA", 70, 25.0, 31.8, 35.3, 36.0, 45),
        model("EB125 kVA", 125, 50.0, 45.9, 51.0, 50.0, 65),
        model("EB220 kVA", 220, 75.0, 88.2, 98.0, 100.0, 125),
        model("EB400 kVA", 400, 125.0, 155.2, 172.5, 160.0, 220),
    ]
}
