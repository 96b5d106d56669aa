use axum::Json;
use axum::extract::State;
use rocky_model::provider::Provider;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelAvailability {
    mock: bool,
    gemini: bool,
    openai: bool,
}

impl ModelAvailability {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            mock: config.model_available(Provider::Mock),
            gemini: config.model_available(Provider::Gemini),
            openai: config.model_available(Provider::OpenAi),
        }
    }
}

/// What the UI needs to pick a backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    default_model: Provider,
    models: ModelAvailability,
    llm_proxy: bool,
}

pub async fn get_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        default_model: state.config.default_model(),
        models: ModelAvailability::from_config(&state.config),
        llm_proxy: true,
    })
}
