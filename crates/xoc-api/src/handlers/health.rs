use crate::types::*;
use axum::{http::StatusCode, response::Json};

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Helper function to create error responses
pub fn create_error_response(
    status: StatusCode,
    error: &str,
    user_message: &str,
) -> (StatusCode, Json<ErrorResponse>) {
    let response = ErrorResponse {
        error: error.to_string(),
        user_message: user_message.to_string(),
    };
    (status, Json(response))
}
