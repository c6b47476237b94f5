//! Error types and Result alias for the BuildFlow rewards subsystem

use thiserror::Error;

/// Main error type for the rewards subsystem
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("SMS delivery via {provider} failed: {message}")]
    DeliveryError { provider: String, message: String },

    #[error("All SMS providers failed or not configured.")]
    AllProvidersFailed,

    #[error("Ledger out of balance for employee {employee_id}: balance shows {recorded}, ledger sums to {actual}")]
    ConsistencyError {
        employee_id: String,
        recorded: i64,
        actual: i64,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
