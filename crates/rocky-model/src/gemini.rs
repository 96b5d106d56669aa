//! Gemini `generateContent` wire types.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Header carrying the API key, so it stays out of request URLs and logs.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub fn endpoint(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{model}:generateContent",
        base_url.trim_end_matches('/')
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl Content {
    fn text(text: String) -> Self {
        Content {
            parts: vec![Part { text }],
        }
    }
}

pub fn request_body(system: &str, patient_json: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(format!("Patient Data: {patient_json}"))],
        system_instruction: Content::text(system.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn into_text(self) -> Result<String, ModelError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelError::MissingContent("no candidates"))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ModelError::MissingContent("candidate has no text parts"));
        }
        Ok(text)
    }
}
