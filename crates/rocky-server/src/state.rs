use std::sync::Arc;

use rocky_engine::SafetyEngine;
use rocky_model::client::ModelClient;
use rocky_model::lookup::InteractionLookup;
use rocky_model::provider::Provider;
use tracing::info;

use crate::config::{ConfigError, ServerConfig};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SafetyEngine>,
    pub config: Arc<ServerConfig>,
    pub openai: Option<ModelClient>,
    pub gemini: Option<ModelClient>,
    pub lookup: Option<InteractionLookup>,
}

impl AppState {
    /// Load the rule table and build a client for every configured
    /// upstream.
    pub fn from_config(config: ServerConfig) -> Result<Self, ConfigError> {
        let engine = match &config.rule_table_path {
            Some(path) => {
                let engine = SafetyEngine::from_path(path)?;
                info!(path = %path.display(), rules = engine.rules().len(), "loaded rule table");
                engine
            }
            None => SafetyEngine::default(),
        };

        let client = |provider: Provider| -> Result<Option<ModelClient>, ConfigError> {
            config
                .api_key(provider)
                .map(|key| ModelClient::new(provider, key, config.model_timeout))
                .transpose()
                .map_err(ConfigError::from)
        };
        let openai = client(Provider::OpenAi)?;
        let gemini = client(Provider::Gemini)?;

        let lookup = config
            .interaction_lookup_url
            .as_deref()
            .map(|url| InteractionLookup::new(url, config.model_timeout))
            .transpose()?;

        Ok(Self {
            engine: Arc::new(engine),
            openai,
            gemini,
            lookup,
            config: Arc::new(config),
        })
    }

    pub fn model_client(&self, provider: Provider) -> Option<&ModelClient> {
        match provider {
            Provider::Mock => None,
            Provider::Gemini => self.gemini.as_ref(),
            Provider::OpenAi => self.openai.as_ref(),
        }
    }
}
