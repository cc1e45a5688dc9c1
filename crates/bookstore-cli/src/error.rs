//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io / toml / serde_json errors ──┐                                      │
//! │                                  ├──► CliError ──► main ──► stderr     │
//! │  CoreError / ValidationError ────┘                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cart line that the core refuses (not enough stock) is NOT an error
//! here: it is recorded in the run report like any other outcome.

use bookstore_core::{CartId, CoreError, CustomerId, OrderId, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown or incomplete command-line arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // =========================================================================
    // Scenario Errors
    // =========================================================================
    /// Scenario file could not be read.
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario JSON is malformed or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scenario references unknown customer {0}")]
    UnknownCustomer(CustomerId),

    #[error("Scenario references unknown cart {0}")]
    UnknownCart(CartId),

    #[error("Scenario references unknown order {0}")]
    UnknownOrder(OrderId),

    /// Two orders were placed from the same cart.
    #[error("Cart {0} is already bound to an order")]
    CartAlreadyOrdered(CartId),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;
