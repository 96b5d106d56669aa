//! Recovering a JSON object from free model text.

use rocky_core::untrusted::UntrustedResult;
use serde_json::Value;

use crate::error::ModelError;

/// Strip Markdown code fences and surrounding whitespace.
pub fn cleanup_json_text(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model's reply into an untrusted candidate.
///
/// The reply must be a JSON object once fences are removed. Field-level
/// problems inside the object are coerced, not rejected.
pub fn parse_candidate(text: &str) -> Result<UntrustedResult, ModelError> {
    let cleaned = cleanup_json_text(text);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| ModelError::ResponseParse(format!("candidate is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(ModelError::ResponseParse(
            "candidate is not a JSON object".to_string(),
        ));
    }
    Ok(UntrustedResult::from_value(&value))
}
