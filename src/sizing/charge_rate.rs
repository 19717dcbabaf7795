//! Charge-rate calculation for an EBOSS model / generator pairing.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::types::{EbossType, round_to};
use crate::error::SizingError;
use crate::reference::EbossModelSpec;
use crate::reference::models::POWER_FACTOR;

/// Charger efficiency applied to generator output.
pub const CHARGER_EFFICIENCY: f64 = 0.98;
/// Additional derate for the Power Module topology.
pub const POWER_MODULE_DERATE: f64 = 0.90;

/// A generator size parsed at the input boundary.
///
/// Accepts `"65kVA"`, `"65 kVA"`, `"65kva"` and bare `"65"`. When
/// deserialized, a plain integer is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "RawGeneratorSize")]
pub struct GeneratorSize(pub u32);

/// A generator size as written by a caller: a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawGeneratorSize {
    Kva(u32),
    Text(String),
}

impl TryFrom<RawGeneratorSize> for GeneratorSize {
    type Error = SizingError;

    fn try_from(raw: RawGeneratorSize) -> Result<Self, Self::Error> {
        match raw {
            RawGeneratorSize::Kva(kva) => Ok(GeneratorSize(kva)),
            RawGeneratorSize::Text(s) => s.parse(),
        }
    }
}

impl FromStr for GeneratorSize {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let digits = lower.strip_suffix("kva").unwrap_or(&lower).trim();
        digits
            .parse::<u32>()
            .map(GeneratorSize)
            .map_err(|_| SizingError::InvalidGeneratorSize(trimmed.to_string()))
    }
}

impl fmt::Display for GeneratorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kVA", self.0)
    }
}

/// Generator actually paired with the unit: the integrated one for Full
/// Hybrid, the caller's choice for Power Module.
pub fn generator_kva_used(
    model: &EbossModelSpec,
    eboss_type: EbossType,
    generator_kva: Option<u32>,
) -> Option<u32> {
    match eboss_type {
        EbossType::FullHybrid => Some(model.hybrid_generator_kva),
        EbossType::PowerModule => generator_kva.filter(|&kva| kva > 0),
    }
}

/// Generator output (kW) for the pairing, or `None` when unconfigured.
fn generator_kw(
    model: &EbossModelSpec,
    eboss_type: EbossType,
    generator_kva: Option<u32>,
) -> Option<f64> {
    generator_kva_used(model, eboss_type, generator_kva).map(|kva| f64::from(kva) * POWER_FACTOR)
}

/// Effective charge rate (kW), rounded to 1 dp.
///
/// A non-zero `custom_rate` is returned verbatim. A Power Module with no
/// generator size yields `0.0`, meaning "not yet configured".
pub fn charge_rate_kw(
    model: &EbossModelSpec,
    eboss_type: EbossType,
    generator_kva: Option<u32>,
    custom_rate: Option<f64>,
) -> f64 {
    if let Some(rate) = custom_rate.filter(|&r| r != 0.0) {
        return rate;
    }

    let Some(kw) = generator_kw(model, eboss_type, generator_kva) else {
        return 0.0;
    };

    let rate = match eboss_type {
        EbossType::FullHybrid => kw * CHARGER_EFFICIENCY,
        EbossType::PowerModule => kw * POWER_MODULE_DERATE * CHARGER_EFFICIENCY,
    };
    round_to(rate, 1)
}

/// Charge rate ceiling: the generator's deliverable power, capped by the
/// unit's own charger rating.
pub fn max_charge_rate_kw(
    model: &EbossModelSpec,
    eboss_type: EbossType,
    generator_kva: Option<u32>,
) -> f64 {
    match generator_kw(model, eboss_type, generator_kva) {
        Some(kw) => model.max_charge_rate_kw.min(kw * CHARGER_EFFICIENCY),
        None => 0.0,
    }
}
