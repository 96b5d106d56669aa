use axum::Json;
use axum::extract::State;
use rocky_engine::classifier::normalize;
use rocky_engine::reconcile::{ENGINE_SOURCE, SourcedInteraction, merge_interactions};
use rocky_model::lookup::LOOKUP_SOURCE;
use serde::Serialize;
use tracing::warn;

use crate::extract::Intake;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Disabled,
    Ok,
    Failed,
}

#[derive(Serialize)]
pub struct InteractionReport {
    interactions: Vec<SourcedInteraction>,
    lookup: LookupStatus,
}

/// Engine interactions merged with the external lookup's, when one is
/// configured. Only the medication list matters here, so the intake is
/// not range-checked.
pub async fn check_interactions(
    State(state): State<AppState>,
    Intake(input): Intake,
) -> Json<InteractionReport> {
    let ours = state.engine.findings(&input).interactions;

    let (theirs, lookup) = match &state.lookup {
        None => (Vec::new(), LookupStatus::Disabled),
        Some(client) => match client.lookup(&normalize(&input.medications)).await {
            Ok(list) => (list, LookupStatus::Ok),
            Err(e) => {
                warn!(url = client.url(), error = %e, "interaction lookup failed, using engine only");
                (Vec::new(), LookupStatus::Failed)
            }
        },
    };

    let interactions = merge_interactions(&[(ENGINE_SOURCE, &ours[..]), (LOOKUP_SOURCE, &theirs[..])]);
    Json(InteractionReport {
        interactions,
        lookup,
    })
}
