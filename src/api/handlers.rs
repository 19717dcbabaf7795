//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::types::{ErrorResponse, GeneratorsResponse, SizingRequestBody, ValidationResponse};
use crate::config::ScenarioConfig;
use crate::error::SizingError;
use crate::reference::EbossModelSpec;
use crate::report::SizingReport;
use crate::sizing::SizingRequest;

impl IntoResponse for SizingError {
    fn into_response(self) -> Response {
        let status = match self {
            SizingError::UnknownModel(_) | SizingError::UnknownStandardGenerator(_) => {
                StatusCode::NOT_FOUND
            }
            SizingError::InvalidGeneratorSize(_) => StatusCode::BAD_REQUEST,
            SizingError::ReferenceData(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::debug!(error = %self, %status, "request failed");
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /models` → 200 + model catalog
pub async fn get_models(State(state): State<Arc<AppState>>) -> Json<Vec<EbossModelSpec>> {
    Json(state.data.models.clone())
}

/// `GET /generators` → 200 + fuel curves and standard generators
pub async fn get_generators(State(state): State<Arc<AppState>>) -> Json<GeneratorsResponse> {
    Json(GeneratorsResponse {
        breakpoints: state.data.breakpoints.clone(),
        standard_generators: state.data.standard_generators.clone(),
    })
}

/// `POST /sizing` → 200 + `DerivedSpec`, 404 for an unknown model, 400 for
/// an unparseable generator size.
pub async fn post_sizing(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SizingRequestBody>,
) -> Result<impl IntoResponse, SizingError> {
    let request = SizingRequest::try_from(body)?;
    let spec = state.cache().get_or_compute(&state.data, &request)?;
    Ok(Json(spec))
}

/// `POST /report` → 200 + `SizingReport`, 422 on invalid terms, 404 on
/// unknown catalog entries.
pub async fn post_report(
    State(state): State<Arc<AppState>>,
    Json(scenario): Json<ScenarioConfig>,
) -> Response {
    let errors = scenario.validate();
    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationResponse {
                errors: errors.iter().map(ToString::to_string).collect(),
            }),
        )
            .into_response();
    }

    let report = SizingReport::build(&state.data, &mut state.cache(), &scenario);
    match report {
        Ok(report) => Json(report).into_response(),
        Err(e) => e.into_response(),
    }
}
