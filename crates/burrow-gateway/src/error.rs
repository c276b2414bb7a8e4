use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_shortener::{ErrorKind, ShortenerError};
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read as a create request.
    BadRequest(String),
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(error: ShortenerError) -> Self {
        AppError::Shortener(error)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        let error = match self {
            AppError::BadRequest(message) => return (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Shortener(error) => error,
        };

        match error.kind() {
            ErrorKind::MissingField => (StatusCode::BAD_REQUEST, error.to_string()),
            ErrorKind::InvalidFormat => (
                StatusCode::BAD_REQUEST,
                "custom_shortcode must be alphanumeric".to_string(),
            ),
            ErrorKind::InvalidValidity => (StatusCode::BAD_REQUEST, error.to_string()),
            ErrorKind::AlreadyExists => (
                StatusCode::CONFLICT,
                "custom_shortcode already exists".to_string(),
            ),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "shortcode not found".to_string()),
            ErrorKind::Expired => (StatusCode::GONE, "url has expired".to_string()),
            ErrorKind::StoreFailure => {
                error!(error = %error, "request failed on the store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
