//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::OrchestratorError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Order workflow error.
    Orchestrator(OrchestratorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Orchestrator(err) => orchestrator_error_to_response(err),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn orchestrator_error_to_response(err: OrchestratorError) -> (StatusCode, String) {
    match &err {
        OrchestratorError::InvalidOrder(_) | OrchestratorError::UserValidationFailed(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        OrchestratorError::PersistenceFailed(_)
        | OrchestratorError::PaymentFailed { .. }
        | OrchestratorError::StatusUpdateFailed { .. }
        | OrchestratorError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        ApiError::Orchestrator(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::UserId;
    use domain::OrderError;
    use orchestrator::UserDirectoryError;
    use order_store::OrderStoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                OrchestratorError::InvalidOrder(OrderError::ProductRequired),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrchestratorError::UserValidationFailed(UserDirectoryError::NotFound(
                    UserId::new(999),
                )),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrchestratorError::PersistenceFailed(OrderStoreError::Unavailable(
                    "down".to_string(),
                )),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
