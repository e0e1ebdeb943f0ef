use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::synthesizer::SynthesisError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant answers with `{ "error": "<message>" }`. Pipeline failures are
/// not distinguished by subtype on the wire; the message carries the detail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Synthesis(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(msg) => tracing::warn!("Rejected request: {msg}"),
            AppError::Synthesis(e) => tracing::error!("Error generating resume: {e}"),
            AppError::Render(e) => tracing::error!("Error rendering resume: {e}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
