//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use deckgen_core::DeckError;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upstream(String),
    Timeout(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<DeckError> for AppError {
    fn from(err: DeckError) -> Self {
        let message = err.to_string();
        match err {
            DeckError::EmptyPrompt => AppError::BadRequest(message),
            DeckError::TextGeneration { .. }
            | DeckError::ImageGeneration { .. }
            | DeckError::Upstream(_)
            | DeckError::MaxRetriesExceeded(_) => AppError::Upstream(message),
            DeckError::DeadlineExceeded => AppError::Timeout(message),
            DeckError::Render(_) | DeckError::Io(_) => AppError::Internal(message),
        }
    }
}
