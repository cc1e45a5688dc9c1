//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    59.98 × 1.08 = 64.77840000000001  ❌ WRONG!                          │
//! │                                                                         │
//! │  Integer cents are exact, but invoices here carry VAT amounts like     │
//! │  5.182272, which cents would silently round away.                      │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    59.98 × 1.08 = 64.7784 exactly                                      │
//! │    Rounding happens only when a human reads the value (Display)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::from_cents(2999); // $29.99
//! let line = price.multiply_quantity(2);
//! assert_eq!(line, Money::from_cents(5998));
//! assert_eq!(line.to_string(), "$59.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount in major currency units.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for discounts and refunds
/// - **Single field tuple struct**: Zero-cost wrapper around `Decimal`
/// - **Equality is numeric**: `64.7784 == 64.778400`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.price ──► LineEntry.unit_price ──► Cart.total_price               │
/// │                                                                         │
/// │  Cart lines ──► PricingEngine::order_total ──► Order.total_amount       │
/// │                                                                         │
/// │  Order.total_amount ──► Invoice subtotal/discount/vat/final_total       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_cents(3999); // $39.99
    /// assert_eq!(price.to_string(), "$39.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(8997));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Like [`Money::multiply_quantity`], but `None` if the product does not
    /// fit a `Decimal`.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns `rate` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    /// use bookstore_core::types::Rate;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// let loyalty = subtotal.portion(Rate::from_bps(1000)); // 10%
    /// assert_eq!(loyalty, Money::from_cents(1000));
    /// ```
    #[inline]
    pub fn portion(&self, rate: Rate) -> Money {
        Money(self.0 * rate.as_decimal())
    }

    /// Scales the amount down by `rate` (multiplies by `1 - rate`).
    ///
    /// Two discounts applied one after another compound:
    /// `x.apply_discount(10%).apply_discount(20%) == x × 0.9 × 0.8`.
    #[inline]
    pub fn apply_discount(&self, rate: Rate) -> Money {
        Money(self.0 * (Decimal::ONE - rate.as_decimal()))
    }

    /// Scales the amount up by `rate` (multiplies by `1 + rate`).
    ///
    /// Used for VAT-inclusive totals.
    #[inline]
    pub fn apply_surcharge(&self, rate: Rate) -> Money {
        Money(self.0 * (Decimal::ONE + rate.as_decimal()))
    }

    /// Rounds to `dp` decimal places using Bankers Rounding.
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display rounds to cents for summaries. The stored value stays exact.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_dp(2).0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
