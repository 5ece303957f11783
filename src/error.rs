use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid FIT: {0}")]
    InvalidFit(String),
    #[error("File contains no activity message")]
    NotAnActivity,
    #[error("A {0} message has no timestamp")]
    MissingTimestamp(&'static str),
    #[error("No parser registered for format {0:?}")]
    UnknownFormat(String),
    #[error("The {0} parser does not support line input")]
    LineUnsupported(&'static str),
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Failure to project a single message. Siblings are unaffected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectError {
    #[error("Unsupported field encoding for {field}: {detail}")]
    UnsupportedEncoding { field: &'static str, detail: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Parse(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
