use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Extractor error: {0}")]
    Extractor(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An upstream failure annotated with the operation that triggered it
    #[error("{operation}: {message}")]
    Upstream {
        operation: &'static str,
        message: String,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Prefixes an upstream failure with the failing operation.
    ///
    /// Client-facing errors (`NotFound`, `InvalidInput`) pass through untouched
    /// so their status code survives the handler boundary.
    pub fn context(self, operation: &'static str) -> Self {
        match self {
            AppError::NotFound(_) | AppError::InvalidInput(_) | AppError::Upstream { .. } => self,
            other => AppError::Upstream {
                operation,
                message: other.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
