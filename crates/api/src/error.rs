use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use svgsmith_core::classify::{ErrorCategory, GenerationError};
use svgsmith_core::error::CoreError;
use svgsmith_core::studio::SubmitRejection;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`GenerationError`] for failed
/// generations and [`SubmitRejection`] for dropped studio submissions, and
/// adds an HTTP-specific variant. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `svgsmith_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A categorized generation failure.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A studio submission that was dropped without changing state.
    #[error(transparent)]
    Rejected(#[from] SubmitRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Domain validation ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Generation failures carry details and a suggestion ---
            AppError::Generation(err) => return generation_error_response(err),

            // --- Studio submission guards ---
            AppError::Rejected(rejection) => match rejection {
                SubmitRejection::Empty => (
                    StatusCode::BAD_REQUEST,
                    "EMPTY_SUBMISSION",
                    rejection.to_string(),
                ),
                SubmitRejection::InFlight => (
                    StatusCode::CONFLICT,
                    "GENERATION_IN_PROGRESS",
                    rejection.to_string(),
                ),
            },

            // --- HTTP-specific error ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a generation category to an HTTP status and error code.
///
/// - Safety blocks are the caller's content: 422.
/// - Quota exhaustion is passed on as 429.
/// - Malformed input is 400.
/// - Credential, connection and output problems are upstream faults: 502.
pub fn classify_generation_error(category: ErrorCategory) -> (StatusCode, &'static str) {
    match category {
        ErrorCategory::ContentFlagged => (StatusCode::UNPROCESSABLE_ENTITY, "CONTENT_FLAGGED"),
        ErrorCategory::Overloaded => (StatusCode::TOO_MANY_REQUESTS, "OVERLOADED"),
        ErrorCategory::InvalidRequest => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        ErrorCategory::AuthError => (StatusCode::BAD_GATEWAY, "AUTH_ERROR"),
        ErrorCategory::ConnectionError => (StatusCode::BAD_GATEWAY, "CONNECTION_ERROR"),
        ErrorCategory::FormatError => (StatusCode::BAD_GATEWAY, "FORMAT_ERROR"),
    }
}

fn generation_error_response(err: &GenerationError) -> Response {
    let (status, code) = classify_generation_error(err.category);
    tracing::warn!(category = ?err.category, details = %err.details, "Generation failed");

    let body = json!({
        "error": err.message,
        "code": code,
        "category": err.category,
        "details": err.details,
        "suggestion": err.suggestion,
    });

    (status, axum::Json(body)).into_response()
}
