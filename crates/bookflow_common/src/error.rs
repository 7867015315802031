// --- File: crates/bookflow_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Bookflow crates.
///
/// Crate-specific errors convert into this at the service boundary so that
/// the HTTP layer has a single place to map failures onto status codes.
#[derive(Error, Debug)]
pub enum BookflowError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested action conflicts with the current state
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookflowError {
    fn status_code(&self) -> u16 {
        match self {
            BookflowError::ParseError(_) => 400,
            BookflowError::ConfigError(_) => 500,
            BookflowError::ValidationError(_) => 422,
            BookflowError::ExternalServiceError { .. } => 502,
            BookflowError::ConflictError(_) => 409,
            BookflowError::NotFoundError(_) => 404,
        }
    }
}

// Utility functions for error handling
pub fn parse_error<T: fmt::Display>(message: T) -> BookflowError {
    BookflowError::ParseError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> BookflowError {
    BookflowError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BookflowError {
    BookflowError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BookflowError {
    BookflowError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> BookflowError {
    BookflowError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BookflowError {
    BookflowError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
