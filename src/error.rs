use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::core::validation::CalcError;
use crate::models::ErrorResponse;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Malformed request
    ValidationError(String),
    /// Inputs parsed but no result exists for them
    Unavailable(CalcError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::Unavailable(err) => write!(f, "Result unavailable: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::InvalidSweepStep(_) => AppError::ValidationError(err.to_string()),
            other => AppError::Unavailable(other),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
            AppError::Unavailable(err) => ("unavailable", err.to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}
