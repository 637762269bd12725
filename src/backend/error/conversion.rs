/**
 * Error Conversion
 *
 * `IntoResponse` implementations for the backend error and the response
 * envelope, so handlers can return either directly.
 *
 * # Response Format
 *
 * Errors are returned as JSON:
 * ```json
 * { "statusCode": 404, "message": "Area not found" }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::ApiResponse;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = serde_json::json!({
            "statusCode": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::GraphError;

    #[test]
    fn test_error_response_status() {
        let response = BackendError::from(GraphError::ItemNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_created_envelope_status() {
        let response = ApiResponse::created("Area added successfully", 1).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = ApiResponse::<()>::failure("User not found").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
