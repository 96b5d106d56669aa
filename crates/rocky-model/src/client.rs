use std::time::Duration;

use rocky_core::models::patient::PatientInput;
use rocky_core::untrusted::UntrustedResult;
use tracing::info;
use uuid::Uuid;

use crate::error::ModelError;
use crate::http::{build_client, send_json};
use crate::json::parse_candidate;
use crate::prompt::{SYSTEM_PROMPT, patient_json};
use crate::provider::Provider;
use crate::{gemini, openai};

/// A model's candidate result, before reconciliation.
#[derive(Debug, Clone)]
pub struct ModelAssessment {
    pub transaction_id: Uuid,
    pub provider: Provider,
    pub model: String,
    pub candidate: UntrustedResult,
}

/// HTTP client for one remote model provider.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    provider: Provider,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl ModelClient {
    /// Client for the provider's public endpoint and default model.
    /// `Provider::Mock` has no remote side and is rejected.
    pub fn new(provider: Provider, api_key: &str, timeout: Duration) -> Result<Self, ModelError> {
        let (base_url, model) = match provider {
            Provider::OpenAi => (openai::OPENAI_BASE_URL, openai::OPENAI_MODEL),
            Provider::Gemini => (gemini::GEMINI_BASE_URL, gemini::GEMINI_MODEL),
            Provider::Mock => return Err(ModelError::UnsupportedProvider(provider.to_string())),
        };

        Ok(Self {
            http: build_client(timeout)?,
            provider,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            model: model.to_string(),
            timeout,
        })
    }

    /// Point the client at another host, e.g. a proxy or a local stub.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a candidate result for one intake.
    pub async fn assess(&self, input: &PatientInput) -> Result<ModelAssessment, ModelError> {
        let transaction_id = Uuid::new_v4();
        info!(
            transaction_id = %transaction_id,
            provider = %self.provider,
            model = %self.model,
            "starting model assessment"
        );

        let patient = patient_json(input)?;
        let text = match self.provider {
            Provider::OpenAi => {
                let body = openai::request_body(&self.model, SYSTEM_PROMPT, &patient);
                let request = self
                    .http
                    .post(openai::endpoint(&self.base_url))
                    .bearer_auth(&self.api_key)
                    .json(&body);
                send_json::<openai::ChatResponse>(request, self.timeout)
                    .await?
                    .into_text()?
            }
            Provider::Gemini => {
                let body = gemini::request_body(SYSTEM_PROMPT, &patient);
                let request = self
                    .http
                    .post(gemini::endpoint(&self.base_url, &self.model))
                    .header(gemini::API_KEY_HEADER, &self.api_key)
                    .json(&body);
                send_json::<gemini::GenerateResponse>(request, self.timeout)
                    .await?
                    .into_text()?
            }
            Provider::Mock => return Err(ModelError::UnsupportedProvider(self.provider.to_string())),
        };

        let candidate = parse_candidate(&text)?;

        info!(
            transaction_id = %transaction_id,
            issues = candidate.issues.len(),
            has_plan = candidate.plan.is_some(),
            "model assessment complete"
        );

        Ok(ModelAssessment {
            transaction_id,
            provider: self.provider,
            model: self.model.clone(),
            candidate,
        })
    }
}
