//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error body: `{error}` for client errors, `{error, details}` for server errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                details: None,
            },
        }
    }

    /// Attach details (server errors only carry these)
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.response.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Convert a domain error, summarising server failures with `context`
    ///
    /// Client errors keep the domain message as `error`. An
    /// `OperationFailed` becomes `{error: context, details: message}`.
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::OperationFailed { message } => {
                Self::internal(context).with_details(message)
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthenticated { message } => Self::unauthorized(message),
            DomainError::InvalidArgument { message }
            | DomainError::AlreadyInitialized { message }
            | DomainError::TenantNotInitialized { message } => Self::bad_request(message),
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::OperationFailed { message } => {
                Self::internal("Operation failed").with_details(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response.details {
            Some(details) => write!(f, "{}: {} ({})", self.status, self.response.error, details),
            None => write!(f, "{}: {}", self.status, self.response.error),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_statuses() {
        let cases = [
            (DomainError::unauthenticated("x"), StatusCode::UNAUTHORIZED),
            (DomainError::invalid_argument("x"), StatusCode::BAD_REQUEST),
            (DomainError::already_initialized("x"), StatusCode::BAD_REQUEST),
            (DomainError::tenant_not_initialized("x"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::operation_failed("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_client_error_body_has_no_details() {
        let err: ApiError = DomainError::invalid_argument("company_name is required").into();
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json, serde_json::json!({"error": "company_name is required"}));
    }

    #[test]
    fn test_operation_failed_passes_message_through() {
        let err = ApiError::from_domain(
            DomainError::operation_failed("connection refused"),
            "Failed to initialize trial",
        );
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Failed to initialize trial",
                "details": "connection refused"
            })
        );
    }

    #[test]
    fn test_from_domain_keeps_client_errors() {
        let err = ApiError::from_domain(
            DomainError::already_initialized("User already has an initialized tenant"),
            "Failed to initialize trial",
        );

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error, "User already has an initialized tenant");
        assert!(err.response.details.is_none());
    }
}
