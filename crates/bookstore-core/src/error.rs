//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - Stock and catalog failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bookstore-cli errors (separate crate)                                 │
//! │  └── CliError         - Config, scenario file and output failures      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejected Operations Never Mutate
//! Every operation returning `Err` leaves the item, cart and catalog exactly
//! as they were before the call.

use thiserror::Error;

use crate::types::{CartId, ItemId};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Not enough stock to take the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// cart.add_item(book, 12)
    ///      │
    ///      ▼
    /// remove_stock(12): available=10
    ///      │
    ///      ▼
    /// InsufficientStock { item_id: 1, available: 10, requested: 12 }
    ///      │
    ///      ▼
    /// No line entry, no total change, stock still 10
    /// ```
    #[error("Insufficient stock for item {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: ItemId,
        available: i64,
        requested: i64,
    },

    /// A stock change would leave the counter outside `i64`.
    #[error("Stock change of {change} on item {item_id} overflows stock {stock}")]
    StockOverflow {
        item_id: ItemId,
        stock: i64,
        change: i64,
    },

    /// A cart line or running total would exceed what the cart can count.
    #[error("Cart {cart_id} totals overflow")]
    TotalsOverflow { cart_id: CartId },

    /// Catalog lookup by id found nothing.
    #[error("Item not found: {0}")]
    UnknownItem(ItemId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the opt-in validators in [`crate::validation`], by the
/// catalog on duplicate ids, and by the stock setter on negative levels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate item id in the catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
