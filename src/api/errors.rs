use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequiredResponse {
    message: &'static str,
    completion_percent: i64,
    required: i64,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    Forbidden(String),
    /// Validation failures and the 400-by-convention conflicts.
    BadRequest(String),
    NotFound(String),
    CompletionRequired { completion_percent: i64 },
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

fn message_body(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { message, error: None })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                let mut response = message_body(StatusCode::UNAUTHORIZED, message.to_string());
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            ApiError::Forbidden(message) => message_body(StatusCode::FORBIDDEN, message),
            ApiError::BadRequest(message) => message_body(StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => message_body(StatusCode::NOT_FOUND, message),
            ApiError::CompletionRequired { completion_percent } => (
                StatusCode::BAD_REQUEST,
                Json(CompletionRequiredResponse {
                    message: "Complete the course to generate certificate",
                    completion_percent,
                    required: 100,
                }),
            )
                .into_response(),
            ApiError::Internal(context) => {
                tracing::error!(error = %context, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Server error".to_string(),
                        error: Some(context),
                    }),
                )
                    .into_response()
            }
        }
    }
}
