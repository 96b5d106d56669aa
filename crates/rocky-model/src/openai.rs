//! OpenAI chat completions wire types.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-4o";

pub fn endpoint(base_url: &str) -> String {
    format!("{}/v1/chat/completions", base_url.trim_end_matches('/'))
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// A system turn with the instructions and a user turn with the intake,
/// asking for a JSON object back.
pub fn request_body<'a>(model: &'a str, system: &'a str, patient_json: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: patient_json,
            },
        ],
        response_format: ResponseFormat {
            kind: "json_object",
        },
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice.
    pub fn into_text(self) -> Result<String, ModelError> {
        self.choices
            .into_iter()
            .next()
            .ok_or(ModelError::MissingContent("no choices"))?
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(ModelError::MissingContent("empty message content"))
    }
}
