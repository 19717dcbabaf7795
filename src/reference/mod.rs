//! Static reference data: EBOSS models, generator fuel curves, and the
//! standard generator catalog.
//!
//! Loaded once at process start and shared read-only. The compiled-in
//! catalog is available through [`ReferenceData::builtin`]; a replacement
//! catalog can be read from TOML with [`ReferenceData::from_toml_file`].

pub mod generators;
pub mod models;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;

pub use generators::{GeneratorBreakpoint, StandardGeneratorSpec};
pub use models::EbossModelSpec;

/// The three reference tables consumed by the sizing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceData {
    /// EBOSS model catalog.
    pub models: Vec<EbossModelSpec>,
    /// Fuel curves, kept sorted by ascending `size_kva`.
    pub breakpoints: Vec<GeneratorBreakpoint>,
    /// Conventional generators used for comparison.
    pub standard_generators: Vec<StandardGeneratorSpec>,
}

/// A suspicious row found in a catalog. Reported, never corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQualityIssue {
    /// Table and key of the offending row, e.g. `"breakpoints[220]"`.
    pub row: String,
    /// What looks wrong.
    pub message: String,
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data quality: {}: {}", self.row, self.message)
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self {
            models: models::builtin_models(),
            breakpoints: generators::builtin_breakpoints(),
            standard_generators: generators::builtin_standard_generators(),
        }
    }

    /// Reads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `SizingError::ReferenceData` if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, SizingError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SizingError::ReferenceData(format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a catalog from a TOML string.
    ///
    /// Breakpoint rows are re-sorted by size so nearest-size lookups break
    /// ties the same way regardless of file order.
    ///
    /// # Errors
    ///
    /// Returns `SizingError::ReferenceData` if the TOML is invalid or a table is empty.
    pub fn from_toml_str(s: &str) -> Result<Self, SizingError> {
        let mut data: Self =
            toml::from_str(s).map_err(|e| SizingError::ReferenceData(e.to_string()))?;
        if data.models.is_empty() {
            return Err(SizingError::ReferenceData("no models defined".into()));
        }
        if data.breakpoints.is_empty() {
            return Err(SizingError::ReferenceData("no breakpoints defined".into()));
        }
        data.breakpoints.sort_by_key(|row| row.size_kva);
        Ok(data)
    }

    /// Looks up an EBOSS model by its catalog id.
    ///
    /// # Errors
    ///
    /// Returns `SizingError::UnknownModel` if no model has that id.
    pub fn model(&self, model_id: &str) -> Result<&EbossModelSpec, SizingError> {
        self.models
            .iter()
            .find(|m| m.model_id == model_id)
            .ok_or_else(|| SizingError::UnknownModel(model_id.to_string()))
    }

    /// Looks up a standard generator by label.
    ///
    /// # Errors
    ///
    /// Returns `SizingError::UnknownStandardGenerator` if no entry has that label.
    pub fn standard_generator(&self, label: &str) -> Result<&StandardGeneratorSpec, SizingError> {
        self.standard_generators
            .iter()
            .find(|g| g.label == label)
            .ok_or_else(|| SizingError::UnknownStandardGenerator(label.to_string()))
    }

    /// Fuel-curve row for the nearest available generator size.
    ///
    /// Ties resolve to the smaller generator. Returns `None` only for an
    /// empty table.
    pub fn nearest_breakpoint(&self, generator_kva: u32) -> Option<&GeneratorBreakpoint> {
        self.breakpoints
            .iter()
            .min_by_key(|row| (row.size_kva.abs_diff(generator_kva), row.size_kva))
    }

    /// Smallest model whose continuous rating covers `peak_kw`.
    pub fn recommend_model(&self, peak_kw: f64) -> Option<&EbossModelSpec> {
        self.models
            .iter()
            .filter(|m| m.rated_kw() >= peak_kw)
            .min_by_key(|m| m.rated_kva)
    }

    /// Smallest standard generator rated for `peak_kw`, else the largest one.
    pub fn recommend_standard_generator(&self, peak_kw: f64) -> Option<&StandardGeneratorSpec> {
        let by_rating = |a: &&StandardGeneratorSpec, b: &&StandardGeneratorSpec| {
            a.rated_kw.total_cmp(&b.rated_kw)
        };
        self.standard_generators
            .iter()
            .filter(|g| g.rated_kw >= peak_kw)
            .min_by(by_rating)
            .or_else(|| self.standard_generators.iter().max_by(by_rating))
    }

    /// Rows that look like data-entry errors: fuel curves that fall as load
    /// rises, negative burn rates, and duplicate keys.
    pub fn data_quality_issues(&self) -> Vec<DataQualityIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for row in &self.breakpoints {
            let key = format!("breakpoints[{}]", row.size_kva);
            if !seen.insert(row.size_kva) {
                issues.push(DataQualityIssue {
                    row: key.clone(),
                    message: "duplicate generator size".into(),
                });
            }
            if row.points().iter().any(|&(_, gph)| gph < 0.0) {
                issues.push(DataQualityIssue {
                    row: key.clone(),
                    message: "negative fuel burn".into(),
                });
            }
            if !row.is_monotonic() {
                issues.push(DataQualityIssue {
                    row: key,
                    message: format!(
                        "fuel burn decreases with load (25%={}, 50%={}, 75%={}, 100%={})",
                        row.gph_25, row.gph_50, row.gph_75, row.gph_100
                    ),
                });
            }
        }

        let mut seen = HashSet::new();
        for m in &self.models {
            if !seen.insert(m.model_id.as_str()) {
                issues.push(DataQualityIssue {
                    row: format!("models[{}]", m.model_id),
                    message: "duplicate model id".into(),
                });
            }
        }

        let mut seen = HashSet::new();
        for g in &self.standard_generators {
            if !seen.insert(g.label.as_str()) {
                issues.push(DataQualityIssue {
                    row: format!("standard_generators[{}]", g.label),
                    message: "duplicate label".into(),
                });
            }
            if g.gph_50 > g.gph_75 || g.gph_75 > g.gph_100 {
                issues.push(DataQualityIssue {
                    row: format!("standard_generators[{}]", g.label),
                    message: "fuel burn decreases with load".into(),
                });
            }
        }

        issues
    }

    /// Emits every data-quality issue as a `tracing` warning.
    pub fn log_data_quality(&self) {
        for issue in self.data_quality_issues() {
            tracing::warn!(row = %issue.row, "{}", issue.message);
        }
    }
}
