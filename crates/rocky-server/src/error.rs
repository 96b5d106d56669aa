use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rocky_core::validation::FieldError;
use rocky_model::provider::Provider;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a JSON object the intake could be read from.
    BadRequest(String),
    PayloadTooLarge,
    Validation(Vec<FieldError>),
    /// The provider has no API key configured.
    ModelUnavailable(Provider),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<FieldError>>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            reason: None,
            issues: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody::new("payload too large"),
            ),
            ApiError::Validation(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    issues: Some(issues),
                    ..ErrorBody::new("validation_failed")
                },
            ),
            ApiError::ModelUnavailable(provider) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    reason: Some("missing_api_key"),
                    ..ErrorBody::new(format!("{provider}_unavailable"))
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            tracing::debug!(reason = %rejection.body_text(), "rejected request body");
            ApiError::BadRequest("invalid payload".to_string())
        }
    }
}
