//! API error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Request body could not be read as JSON of the expected shape
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),

    /// A dependency the service needs is not answering
    #[error("Service unavailable: {0:#}")]
    Unavailable(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let body = serde_json::json!({
                    "error": "Validation failed",
                    "detail": errors,
                });

                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::InvalidBody { status, message } => {
                let body = serde_json::json!({
                    "error": message
                });

                (status, Json(body)).into_response()
            }
            ApiError::Storage(err) => {
                // Cause stays in the log only
                error!("Request failed: {:#}", err);

                let body = serde_json::json!({
                    "error": "Internal server error"
                });

                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            ApiError::Unavailable(err) => {
                warn!("Service unavailable: {:#}", err);

                let body = serde_json::json!({
                    "status": "unhealthy",
                    "service": "portfolio-api"
                });

                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_422_with_detail() {
        let response = ApiError::Validation(vec![
            FieldError::new("email", "value is not a valid email address"),
            FieldError::new("service", "field is required"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["detail"][0]["field"], "email");
        assert_eq!(json["detail"][1]["field"], "service");
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let response =
            ApiError::from(anyhow::anyhow!("connection refused at 10.0.0.7:6379")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert!(!json.to_string().contains("10.0.0.7"));
    }

    #[tokio::test]
    async fn test_unavailable_maps_to_503() {
        let response = ApiError::Unavailable(anyhow::anyhow!("PING timed out")).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = body_json(response).await;
        assert_eq!(json["status"], "unhealthy");
        assert!(!json.to_string().contains("PING"));
    }

    #[tokio::test]
    async fn test_invalid_body_keeps_status() {
        let response = ApiError::InvalidBody {
            status: StatusCode::BAD_REQUEST,
            message: "Failed to parse the request body as JSON".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
