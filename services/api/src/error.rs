//! Error taxonomy for the Sweet Shop API
//!
//! Every handler failure maps onto one of these variants; the
//! `IntoResponse` impl fixes the status code and JSON body for each.
//! Internal causes are logged where they occur and never leak to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// API error taxonomy
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input; carries every violated field
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Duplicate email or out-of-stock purchase
    #[error("{0}")]
    Conflict(String),

    /// Missing, invalid, or expired credentials
    #[error("{0}")]
    Auth(String),

    /// Authenticated but lacking the admin role
    #[error("Admin access required")]
    Forbidden,

    /// Unknown record id
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; details stay server-side
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            ApiError::Conflict(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            ApiError::Auth(message) => (StatusCode::UNAUTHORIZED, json!({ "message": message })),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "message": "Admin access required" }),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ApiError::Validation(vec![FieldError::new("name", "Sweet name is required")]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Conflict("Sweet is out of stock".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Auth("Invalid credentials".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (
                ApiError::NotFound("Sweet not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_validation_error_serializes_all_fields() {
        let errors = vec![
            FieldError::new("name", "Sweet name is required"),
            FieldError::new("price", "Price must be a positive number"),
        ];
        let body = serde_json::to_value(&errors).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["field"], "price");
    }
}
