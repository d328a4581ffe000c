use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use solstice_llm::error::LlmError;

/// Unified API error type for all route handlers.
///
/// Status codes are decided here and nowhere else: a missing credential on
/// the caller's side is a 401, malformed input (including bodies the JSON
/// extractor rejects) a 400, and every server-side failure (configuration,
/// upstream, coercion) a 500.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    Llm { context: &'static str, source: LlmError },
}

impl ApiError {
    /// Wrap an LLM pipeline failure with the operation it interrupted.
    pub fn llm(context: &'static str) -> impl FnOnce(LlmError) -> Self {
        move |source| ApiError::Llm { context, source }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("unauthorized: {msg}");
                (StatusCode::UNAUTHORIZED, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("bad request: {msg}");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Llm { context, source } => {
                let msg = format!("{context}: {source}");
                tracing::error!("{msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
