use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Terminal, per-request error taxonomy. Each variant maps to exactly one
/// HTTP status (SPEC §7): NotFound→404, Forbidden→403, EmailTaken→400,
/// AuthFailure→401, Validation(msg)→400, Internal(anyhow)→500.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Email already taken")]
    EmailTaken,

    #[error("Authentication failed")]
    AuthFailure,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::EmailTaken => StatusCode::BAD_REQUEST,
            ApiError::AuthFailure => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal errors are logged at error level; auth/validation
        // rejections at warn (SPEC §7).
        match &self {
            ApiError::Internal(_) => tracing::error!(error = %self, "request failed"),
            _ => tracing::warn!(error = %self, "request rejected"),
        }
        (status, self.to_string()).into_response()
    }
}
