//! # bookstore-core: Pure Business Logic for the Bookstore
//!
//! Catalog items, carts, orders and invoices, with the pricing rules that
//! connect them. No I/O of any kind happens in this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bookstore-cli                                │   │
//! │  │    config file + env ──► scenario file ──► summaries            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────────────┐   │   │
//! │  │   │  item   │─►│  cart   │─►│  order  │─►│    invoice      │   │   │
//! │  │   │  EBook  │  │ Lines   │  │ frozen  │  │ discount / VAT  │   │   │
//! │  │   │  stock  │  │ totals  │  │ total   │  │ final total     │   │   │
//! │  │   └─────────┘  └─────────┘  └────┬────┘  └────────▲────────┘   │   │
//! │  │                                  └─── pricing ────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Identifiers, rates, genres, order status
//! - [`money`] - Exact decimal money
//! - [`item`] - Items, e-books and the stock ledger
//! - [`catalog`] - Id-keyed e-book collection
//! - [`customer`] - Customers and loyalty
//! - [`cart`] - Shopping cart and line entries
//! - [`pricing`] - Order total and invoice breakdown rules
//! - [`order`] - Orders with frozen totals
//! - [`invoice`] - Invoices derived from orders
//! - [`error`] - Domain error types
//! - [`validation`] - Opt-in input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::{Cart, CartId, Customer, CustomerId, EBook, Genre, ItemId, Money, Order, OrderId};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let mut book = EBook::new(
//!     ItemId::new(1),
//!     "Programming Fundamentals",
//!     "Afshan Parkar",
//!     NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//!     Genre::Education,
//!     Money::from_cents(2999),
//!     "A comprehensive guide to Programming Fundamentals.",
//!     10,
//! );
//! let customer = Customer::new(CustomerId::new(1002), "Fatima", "fatima@example.com");
//!
//! let mut cart = Cart::new(CartId::new(1), customer.id);
//! cart.add_item(&mut book, 2).unwrap();
//! assert_eq!(cart.total_price().amount(), dec!(59.98));
//!
//! let order = Order::new(OrderId::new(2001), customer, cart);
//! assert_eq!(order.total_amount().amount(), dec!(64.7784));
//! assert_eq!(order.invoices()[0].final_total().amount(), dec!(69.960672));
//! ```

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod error;
pub mod invoice;
pub mod item;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, LineEntry};
pub use catalog::Catalog;
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::Invoice;
pub use item::{EBook, Item};
pub use money::Money;
pub use order::Order;
pub use pricing::{InvoiceBreakdown, PricingConfig, PricingEngine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default VAT rate in basis points (8%).
pub const DEFAULT_VAT_BPS: u32 = 800;

/// Default loyalty discount in basis points (10%).
pub const DEFAULT_LOYALTY_DISCOUNT_BPS: u32 = 1000;

/// Default bulk discount in basis points (20%).
pub const DEFAULT_BULK_DISCOUNT_BPS: u32 = 2000;

/// Line entries needed before the bulk discount applies.
///
/// Counts `add_item` calls, not units: one line of 10 copies does not
/// qualify, five lines of one copy do.
pub const DEFAULT_BULK_THRESHOLD: usize = 5;
