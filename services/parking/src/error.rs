//! Custom error types for the parking service

use common::error::StoreError;
use thiserror::Error;

/// Custom error type for parking operations
#[derive(Error, Debug)]
pub enum ParkingError {
    /// Referenced id is absent (or the space is disabled)
    #[error("{0} not found")]
    NotFound(String),

    /// The space already has an occupant
    #[error("Space {0} is already occupied")]
    AlreadyOccupied(String),

    /// Requested rental is shorter than the configured minimum
    #[error("Rental of {requested} minutes is below the minimum of {minimum} minutes")]
    BelowMinimum { requested: u32, minimum: u32 },

    /// Stored data violates an invariant
    #[error("Inconsistent data: {0}")]
    Inconsistent(String),

    /// Malformed configuration or form input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wrong identification or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Type alias for parking results
pub type ParkingResult<T> = Result<T, ParkingError>;
