use axum::Json;
use axum::extract::State;
use rocky_core::models::result::DiagnosticResult;
use rocky_engine::reconcile::reconcile;
use rocky_model::provider::Provider;
use tracing::warn;

use crate::error::ApiError;
use crate::extract::ValidIntake;
use crate::state::AppState;

/// Deterministic engine only.
pub async fn mock(
    State(state): State<AppState>,
    ValidIntake(input): ValidIntake,
) -> Json<DiagnosticResult> {
    Json(state.engine.evaluate(&input))
}

pub async fn gemini(
    State(state): State<AppState>,
    intake: Result<ValidIntake, ApiError>,
) -> Result<Json<DiagnosticResult>, ApiError> {
    with_model(&state, Provider::Gemini, intake).await
}

pub async fn openai(
    State(state): State<AppState>,
    intake: Result<ValidIntake, ApiError>,
) -> Result<Json<DiagnosticResult>, ApiError> {
    with_model(&state, Provider::OpenAi, intake).await
}

/// Engine result reconciled with the model's candidate.
///
/// A missing key is reported before the body is looked at. Any failure
/// on the model side returns the engine's result unchanged.
async fn with_model(
    state: &AppState,
    provider: Provider,
    intake: Result<ValidIntake, ApiError>,
) -> Result<Json<DiagnosticResult>, ApiError> {
    let client = state
        .model_client(provider)
        .ok_or(ApiError::ModelUnavailable(provider))?;
    let ValidIntake(input) = intake?;

    let rules = state.engine.evaluate(&input);
    match client.assess(&input).await {
        Ok(assessment) => Ok(Json(reconcile(&rules, &assessment.candidate))),
        Err(e) => {
            warn!(%provider, error = %e, "model assessment failed, returning engine result");
            Ok(Json(rules))
        }
    }
}
