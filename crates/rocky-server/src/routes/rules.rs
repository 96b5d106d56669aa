use axum::Json;
use axum::extract::State;
use rocky_engine::rules::{DRUG_CLASSES, DrugClass, Rule};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    drug_classes: &'static [DrugClass],
    rules: Vec<Rule>,
}

/// The drug classes and the rule table this process evaluates against.
pub async fn list_rules(State(state): State<AppState>) -> Json<RuleTable> {
    Json(RuleTable {
        drug_classes: &DRUG_CLASSES,
        rules: state.engine.rules().to_vec(),
    })
}
