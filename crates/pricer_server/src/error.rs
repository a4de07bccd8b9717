//! API error responses
//!
//! Every failure is returned as JSON:
//!
//! ```json
//! {"error": "invalid_position", "message": "...", "field": "volatility", "position": 1}
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pricer_core::types::{InputError, PricingError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body shared by all endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// Offending field, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Offending position index, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// Handler error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request or position validation failed
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Body could not be decoded
    #[error("{0}")]
    BadRequest(String),

    /// Requested resource does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Unexpected failure inside the server
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError::Pricing(PricingError::InvalidInput(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pricing(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error
    pub fn body(&self) -> ErrorResponse {
        let (code, field, position) = match self {
            ApiError::Pricing(err @ PricingError::InvalidInput(_)) => {
                ("invalid_input", err.input_error().field(), None)
            }
            ApiError::Pricing(err @ PricingError::InvalidPosition { .. }) => {
                ("invalid_position", err.input_error().field(), err.position())
            }
            ApiError::BadRequest(_) => ("bad_request", None, None),
            ApiError::NotFound(_) => ("not_found", None, None),
            ApiError::Internal(_) => ("internal_error", None, None),
        };

        ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
            field: field.map(str::to_string),
            position,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_error_body() {
        let err: ApiError =
            PricingError::at_position(2, InputError::MissingField { field: "volatility" }).into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.body();
        assert_eq!(body.error, "invalid_position");
        assert_eq!(body.field.as_deref(), Some("volatility"));
        assert_eq!(body.position, Some(2));
        assert_eq!(
            body.message,
            "Invalid position 2: missing required field 'volatility'"
        );
    }

    #[test]
    fn test_input_error_body() {
        let err: ApiError = InputError::NonPositive {
            field: "spot",
            value: -1.0,
        }
        .into();

        let body = err.body();
        assert_eq!(body.error, "invalid_input");
        assert_eq!(body.field.as_deref(), Some("spot"));
        assert_eq!(body.position, None);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("ticker 'XYZ'".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("join".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadRequest("bad json".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(ApiError::NotFound("ticker 'XYZ'".into()).body()).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "ticker 'XYZ' not found");
        assert!(json.get("field").is_none());
        assert!(json.get("position").is_none());
    }
}
