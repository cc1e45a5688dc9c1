//! # Domain Types
//!
//! Small value types shared by every entity in the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Identifiers   │   │      Rate       │   │      Genre      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  ItemId         │   │  bps (u32)      │   │  Fiction        │       │
//! │  │  CustomerId     │   │  800 = 8%       │   │  Non-Fiction    │       │
//! │  │  CartId         │   └─────────────────┘   │  Science  ...   │       │
//! │  │  OrderId        │                         └─────────────────┘       │
//! │  │  InvoiceId      │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │  OrderStatus    │                             │
//! │                        │  Pending ...    │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are plain integers assigned by the caller. Uniqueness is the
//! caller's job, except inside a [`crate::catalog::Catalog`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw integer id.
            #[inline]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw integer id.
            #[inline]
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identity of a catalog item (and of the e-book wrapping it).
    ItemId
);
define_id!(
    /// Identity of a customer.
    CustomerId
);
define_id!(
    /// Identity of a shopping cart.
    CartId
);
define_id!(
    /// Identity of an order.
    OrderId
);
define_id!(
    /// Identity of an invoice.
    InvoiceId
);

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (VAT), 1000 bps = 10% (loyalty), 2000 bps = 20% (bulk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (800 bps → 0.08).
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4).normalize()
    }

    /// Returns the rate as a percentage (800 bps → 8).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2).normalize()
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Genre
// =============================================================================

/// The genre of an e-book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction", alias = "NonFiction")]
    NonFiction,
    Science,
    Fantasy,
    Mystery,
    Biography,
    Education,
}

impl Genre {
    /// Display name, as printed on summaries.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Science => "Science",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Biography => "Biography",
            Genre::Education => "Education",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Stored on every order. Nothing in this crate moves an order between
/// states; fulfilment lives outside the pricing core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order has been placed and priced.
    #[default]
    Pending,
    Shipped,
    Delivered,
    Canceled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Canceled => write!(f, "Canceled"),
        }
    }
}
