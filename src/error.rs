use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please select a date and enter the issue.";
pub const BOOKING_FAILED_MESSAGE: &str = "Booking failed. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Rejected before anything went over the wire.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure or non-success status from the doctors API.
    #[error("Upstream error: {0}")]
    Transport(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Text shown to the person booking. Transport details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => msg,
            AppError::Transport(_) => BOOKING_FAILED_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Error: {}: {}", self.status_code(), self);

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.user_message()
        }))
    }
}
