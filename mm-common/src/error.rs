//! Common error types for matchmaker services

use thiserror::Error;

/// Common result type for matchmaker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across matchmaker microservices
#[derive(Error, Debug)]
pub enum Error {
    /// Inbound profile failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}
