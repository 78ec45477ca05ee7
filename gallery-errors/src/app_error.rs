/// The only message a caller ever sees when a request fails.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Client-facing text. Causes stay in the server log.
    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Upload(_) => "upload",
            Self::Database(_) => "database",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: &'static str,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            tracing::error!(kind = self.kind(), "{}", self);
            let body = ErrorResponse {
                message: self.user_message(),
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}
