//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::economics::CostInputs;
use crate::sizing::charge_rate::GeneratorSize;
use crate::sizing::types::{EbossType, LoadProfile, SizingRequest};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Unit selection and customer load.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Business terms for the EBOSS unit.
    #[serde(default = "eboss_cost_defaults")]
    pub eboss_costs: CostInputs,
    /// Standard generator used for comparison.
    #[serde(default)]
    pub standard: StandardConfig,
    /// Business terms for the standard generator.
    #[serde(default)]
    pub standard_costs: CostInputs,
}

/// Unit selection and customer load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// EBOSS catalog id.
    pub model: String,
    /// `"full_hybrid"` or `"power_module"`.
    pub eboss_type: EbossType,
    /// Continuous load (kW).
    pub continuous_kw: f64,
    /// Peak load (kW).
    pub peak_kw: f64,
    /// Separately selected generator, e.g. `"65kVA"` or `65`. Power Module only.
    pub generator_kva: Option<GeneratorSize>,
    /// Charge rate override (kW).
    pub custom_charge_rate_kw: Option<f64>,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            model: "EB70 kVA".to_string(),
            eboss_type: EbossType::FullHybrid,
            continuous_kw: 15.0,
            peak_kw: 40.0,
            generator_kva: None,
            custom_charge_rate_kw: None,
        }
    }
}

/// Standard generator selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StandardConfig {
    /// Catalog label. When absent, the smallest generator covering the peak
    /// load is used.
    pub generator: Option<String>,
}

/// EBOSS rental terms used when a scenario omits `[eboss_costs]`.
fn eboss_cost_defaults() -> CostInputs {
    CostInputs {
        rental_rate_weekly: 1800.0,
        rental_rate_monthly: 5400.0,
        ..CostInputs::default()
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"sizing.continuous_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl ScenarioConfig {
    /// EB70 Full Hybrid carrying 15 kW continuous, 40 kW peak.
    pub fn baseline() -> Self {
        Self {
            sizing: SizingConfig::default(),
            eboss_costs: eboss_cost_defaults(),
            standard: StandardConfig::default(),
            standard_costs: CostInputs::default(),
        }
    }

    /// EB125 Power Module paired with a 65 kVA generator.
    pub fn power_module() -> Self {
        Self {
            sizing: SizingConfig {
                model: "EB125 kVA".to_string(),
                eboss_type: EbossType::PowerModule,
                continuous_kw: 30.0,
                peak_kw: 80.0,
                generator_kva: Some(GeneratorSize(65)),
                custom_charge_rate_kw: None,
            },
            eboss_costs: CostInputs {
                rental_rate_weekly: 2600.0,
                rental_rate_monthly: 7800.0,
                ..CostInputs::default()
            },
            standard: StandardConfig::default(),
            standard_costs: CostInputs {
                rental_rate_weekly: 1500.0,
                rental_rate_monthly: 4500.0,
                ..CostInputs::default()
            },
        }
    }

    /// EB25 Full Hybrid on a light construction-trailer load.
    pub fn light_load() -> Self {
        Self {
            sizing: SizingConfig {
                model: "EB25 kVA".to_string(),
                continuous_kw: 5.0,
                peak_kw: 15.0,
                ..SizingConfig::default()
            },
            eboss_costs: CostInputs {
                rental_rate_weekly: 900.0,
                rental_rate_monthly: 2700.0,
                ..CostInputs::default()
            },
            standard: StandardConfig::default(),
            standard_costs: CostInputs {
                rental_rate_weekly: 450.0,
                rental_rate_monthly: 1350.0,
                ..CostInputs::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "power_module", "light_load"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "power_module" => Ok(Self::power_module()),
            "light_load" => Ok(Self::light_load()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// The sizing request this scenario describes.
    pub fn sizing_request(&self) -> SizingRequest {
        let s = &self.sizing;
        SizingRequest {
            model_id: s.model.clone(),
            eboss_type: s.eboss_type,
            generator_kva: s.generator_kva.map(|g| g.0),
            continuous_kw: s.continuous_kw,
            custom_charge_rate_kw: s.custom_charge_rate_kw,
        }
    }

    /// Customer load profile.
    pub fn load_profile(&self) -> LoadProfile {
        LoadProfile {
            continuous_kw: self.sizing.continuous_kw,
            peak_kw: self.sizing.peak_kw,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Only basic non-negativity is enforced on business terms. Returns an
    /// empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.sizing;

        if s.model.trim().is_empty() {
            errors.push(ConfigError {
                field: "sizing.model".into(),
                message: "must not be empty".into(),
            });
        }
        if !(s.continuous_kw >= 0.0 && s.continuous_kw.is_finite()) {
            errors.push(ConfigError {
                field: "sizing.continuous_kw".into(),
                message: "must be a finite value >= 0".into(),
            });
        }
        if !(s.peak_kw >= 0.0 && s.peak_kw.is_finite()) {
            errors.push(ConfigError {
                field: "sizing.peak_kw".into(),
                message: "must be a finite value >= 0".into(),
            });
        }
        if s.custom_charge_rate_kw.is_some_and(|r| r < 0.0) {
            errors.push(ConfigError {
                field: "sizing.custom_charge_rate_kw".into(),
                message: "must be >= 0".into(),
            });
        }
        if self
            .standard
            .generator
            .as_deref()
            .is_some_and(|g| g.trim().is_empty())
        {
            errors.push(ConfigError {
                field: "standard.generator".into(),
                message: "must not be empty when set".into(),
            });
        }

        for (section, costs) in [
            ("eboss_costs", &self.eboss_costs),
            ("standard_costs", &self.standard_costs),
        ] {
            for name in costs.negative_fields() {
                errors.push(ConfigError {
                    field: format!("{section}.{name}"),
                    message: "must be >= 0".into(),
                });
            }
        }

        errors
    }

    /// Non-fatal remarks: the engine still computes, but the caller should
    /// be told.
    pub fn advisories(&self) -> Vec<String> {
        let s = &self.sizing;
        let mut notes = Vec::new();
        if self.load_profile().is_inverted() {
            notes.push(format!(
                "continuous load {:.1} kW exceeds peak load {:.1} kW",
                s.continuous_kw, s.peak_kw
            ));
        }
        match (s.eboss_type, s.generator_kva) {
            (EbossType::PowerModule, None) => notes.push(
                "power module has no generator_kva; charge rate is 0 until one is selected"
                    .to_string(),
            ),
            (EbossType::FullHybrid, Some(g)) => notes.push(format!(
                "full hybrid uses its integrated generator; generator_kva = {g} is ignored"
            )),
            _ => {}
        }
        notes
    }
}
