use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::routes::settings::ModelAvailability;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
}

pub async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Serialize)]
pub struct Readiness {
    status: &'static str,
    models: ModelAvailability,
    lookup: bool,
    rules: usize,
}

/// Nothing here can be unready once the process is serving: the rule
/// table was loaded at start-up. Reports what is configured.
pub async fn readyz(State(state): State<AppState>) -> Json<Readiness> {
    Json(Readiness {
        status: "ok",
        models: ModelAvailability::from_config(&state.config),
        lookup: state.lookup.is_some(),
        rules: state.engine.rules().len(),
    })
}
