//! API response types.

use serde::{Deserialize, Serialize};

use crate::error::SizingError;
use crate::reference::{GeneratorBreakpoint, StandardGeneratorSpec};
use crate::sizing::charge_rate::{GeneratorSize, RawGeneratorSize};
use crate::sizing::{EbossType, SizingRequest};

/// `POST /sizing` body. `generator_kva` takes `65` or `"65kVA"`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizingRequestBody {
    pub model_id: String,
    pub eboss_type: EbossType,
    #[serde(default)]
    pub generator_kva: Option<RawGeneratorSize>,
    pub continuous_kw: f64,
    #[serde(default)]
    pub custom_charge_rate_kw: Option<f64>,
}

impl TryFrom<SizingRequestBody> for SizingRequest {
    type Error = SizingError;

    fn try_from(body: SizingRequestBody) -> Result<Self, Self::Error> {
        let generator_kva = body
            .generator_kva
            .map(GeneratorSize::try_from)
            .transpose()?
            .map(|size| size.0);
        Ok(SizingRequest {
            model_id: body.model_id,
            eboss_type: body.eboss_type,
            generator_kva,
            continuous_kw: body.continuous_kw,
            custom_charge_rate_kw: body.custom_charge_rate_kw,
        })
    }
}

/// Generator tables.
#[derive(Debug, Serialize)]
pub struct GeneratorsResponse {
    /// Fuel curves used for EBOSS fuel burn.
    pub breakpoints: Vec<GeneratorBreakpoint>,
    /// Conventional generators used for comparison.
    pub standard_generators: Vec<StandardGeneratorSpec>,
}

/// Single error message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every validation failure in a submitted scenario.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<String>,
}
