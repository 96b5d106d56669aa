//! External interaction lookup service.
//!
//! The service receives `{"medications": [...]}` and answers with either a
//! bare array of interactions or `{"interactions": [...]}`. Entries are
//! coerced leniently; nothing in the response is trusted.

use std::time::Duration;

use rocky_core::models::finding::Interaction;
use rocky_core::untrusted::coerce_interactions;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::ModelError;
use crate::http::{build_client, send_json};

/// Source label attached to interactions from this service.
pub const LOOKUP_SOURCE: &str = "lookup";

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    medications: &'a [String],
}

#[derive(Debug, Clone)]
pub struct InteractionLookup {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl InteractionLookup {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ModelError> {
        Ok(Self {
            http: build_client(timeout)?,
            url: url.to_string(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Interactions the service reports for the given medication tokens.
    pub async fn lookup(&self, medications: &[String]) -> Result<Vec<Interaction>, ModelError> {
        let transaction_id = Uuid::new_v4();
        info!(
            transaction_id = %transaction_id,
            medications = medications.len(),
            "starting interaction lookup"
        );

        let request = self.http.post(&self.url).json(&LookupRequest { medications });
        let body: Value = send_json(request, self.timeout).await?;
        let interactions = coerce_interactions(&body);

        info!(
            transaction_id = %transaction_id,
            interactions = interactions.len(),
            "interaction lookup complete"
        );
        Ok(interactions)
    }
}
