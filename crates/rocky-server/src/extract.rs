//! Request body extractors for patient intake.

use axum::Json;
use axum::extract::{FromRequest, Request};
use rocky_core::models::patient::PatientInput;
use rocky_core::validation::validate_intake;

use crate::error::ApiError;

/// Intake read leniently, without range checks.
pub struct Intake(pub PatientInput);

impl<S> FromRequest<S> for Intake
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<PatientInput>::from_request(req, state).await?;
        Ok(Intake(input))
    }
}

/// Intake that passed boundary validation.
pub struct ValidIntake(pub PatientInput);

impl<S> FromRequest<S> for ValidIntake
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Intake(input) = Intake::from_request(req, state).await?;
        let issues = validate_intake(&input);
        if !issues.is_empty() {
            return Err(ApiError::Validation(issues));
        }
        Ok(ValidIntake(input))
    }
}
