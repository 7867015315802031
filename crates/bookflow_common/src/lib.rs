// --- File: crates/bookflow_common/src/lib.rs ---

pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Booking data shared between the wizard and its sinks
pub mod services; // Service abstractions

#[cfg(test)]
mod models_test;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, external_service_error, not_found, parse_error, validation_error,
    BookflowError, HttpStatusCode,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result, parse_level};
