use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::{models::ValidationError, service::ServiceError};

pub const GENERIC_VALIDATION_ERROR: &str = "validation errors";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn restaurant_not_found() -> Self {
        ApiError::NotFound("Restaurant not found".to_string())
    }

    pub fn invalid_payload() -> Self {
        ApiError::Validation(vec![GENERIC_VALIDATION_ERROR.to_string()])
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields => ApiError::Validation(vec![err.to_string()]),
            _ => ApiError::invalid_payload(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(entity) => ApiError::NotFound(format!("{entity} not found")),
            ServiceError::Validation(err) => err.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::Internal(message) => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Validation failures; the rule that failed is not distinguished
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_keep_their_message() {
        match ApiError::from(ValidationError::MissingFields) {
            ApiError::Validation(errors) => assert_eq!(errors, vec!["Missing required fields"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_validation_failures_are_generic() {
        for err in [
            ValidationError::PriceOutOfRange(31),
            ValidationError::UnresolvedReference,
            ValidationError::Constraint("CHECK constraint failed".to_string()),
        ] {
            match ApiError::from(ServiceError::Validation(err)) {
                ApiError::Validation(errors) => assert_eq!(errors, vec![GENERIC_VALIDATION_ERROR]),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_unexpected_failures_are_internal() {
        match ApiError::from(ServiceError::Migration("no such table".to_string())) {
            ApiError::Internal(message) => assert!(message.contains("no such table")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_message() {
        match ApiError::from(ServiceError::NotFound("Restaurant")) {
            ApiError::NotFound(message) => assert_eq!(message, "Restaurant not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
