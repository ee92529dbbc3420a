//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parking::ParkingError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Parking operation error
    #[error(transparent)]
    Parking(#[from] ParkingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Parking(err) => {
                let status = match &err {
                    ParkingError::NotFound(_) => StatusCode::NOT_FOUND,
                    ParkingError::AlreadyOccupied(_) => StatusCode::CONFLICT,
                    ParkingError::BelowMinimum { .. } | ParkingError::Validation(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    ParkingError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    ParkingError::Inconsistent(_)
                    | ParkingError::PasswordHash(_)
                    | ParkingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };

                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("Request failed: {}", err);
                }
                (status, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
