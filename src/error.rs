use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Missing ELEVENLABS_API_KEY")]
    MissingApiKey,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body is too large, limit is {0} bytes")]
    PayloadTooLarge(usize),

    #[error("ElevenLabs returned {status}: {details}")]
    Upstream { status: StatusCode, details: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingApiKey => {
                tracing::error!("Request rejected: ELEVENLABS_API_KEY is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message("Missing ELEVENLABS_API_KEY"),
                )
            }
            AppError::Unauthorized => {
                tracing::warn!("Request rejected: proxy key mismatch");
                (StatusCode::UNAUTHORIZED, ErrorResponse::message("Unauthorized"))
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::message("Method Not Allowed"),
            ),
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::message(msg))
            }
            AppError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::message(format!(
                    "Request body is too large (max {} bytes)",
                    limit
                )),
            ),
            AppError::Upstream { status, details } => {
                tracing::warn!("ElevenLabs error ({}): {}", status, details);
                (
                    status,
                    ErrorResponse {
                        error: "ElevenLabs error".to_string(),
                        status: Some(status.as_u16()),
                        details: Some(details),
                    },
                )
            }
            internal @ (AppError::Http(_) | AppError::Json(_) | AppError::Internal(_)) => {
                tracing::error!("Request failed: {}", internal);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message("Internal error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
