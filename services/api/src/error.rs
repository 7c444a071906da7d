use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::IngestError;

/// Central error type for the API
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::Ingestion(err) => {
                tracing::error!(error = %err, "Ingestion failed");
                // Upstream detail stays in the logs; the caller learns which source failed.
                let msg = match &err {
                    IngestError::Fetch { origin, .. } => format!("Failed to extract {origin} data"),
                    IngestError::Decode(decode) => format!("Failed to decode {} data", decode.origin),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, msg, "INGESTION_FAILED")
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
