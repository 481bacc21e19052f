/**
 * Error Conversion
 *
 * Converts `ApiError` into an HTTP response so handlers can return it
 * directly with `?`.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Error message"
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    /// Convert the error into the uniform JSON error response
    ///
    /// Unclassified failures log their internal detail here; the client
    /// only ever sees "Server Error".
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!("unclassified failure: {}", detail);
        }

        let status = self.status_code();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::unauthorized().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid Credentials");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = ApiError::Internal("sqlite disk I/O error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Server Error");
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let response = ApiError::Validation(vec![
            "Email is Required".to_string(),
            "Password is Required".to_string(),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Email is Required, Password is Required");
    }
}
