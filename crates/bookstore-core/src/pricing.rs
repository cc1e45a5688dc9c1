//! # Pricing Engine
//!
//! Pure functions turning a cart and a customer into money.
//!
//! ## Two Pricing Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stage 1: order_total (multiplicative)                                  │
//! │                                                                         │
//! │    base = Σ unit_price × quantity                                       │
//! │    loyalty member?      base × (1 - 10%)                                │
//! │    lines >= 5?          .... × (1 - 20%)                                │
//! │    VAT                  .... × (1 + 8%)        ──► Order.total_amount   │
//! │                                                                         │
//! │  Stage 2: invoice_breakdown (additive, on the stage 1 result)           │
//! │                                                                         │
//! │    subtotal = Order.total_amount                                        │
//! │    discount = subtotal × 10% (loyalty) + subtotal × 20% (bulk)          │
//! │    vat      = (subtotal - discount) × 8%                                │
//! │    final    = subtotal - discount + vat                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stage 2 applies the same discounts and VAT again to a figure that already
//! includes them. Existing invoices depend on these numbers, so both stages
//! are kept exactly as they are.
//!
//! ## Example
//! ```rust
//! use bookstore_core::money::Money;
//! use bookstore_core::pricing::PricingEngine;
//! use rust_decimal_macros::dec;
//!
//! let engine = PricingEngine::default();
//! let total = engine.price(Money::from_cents(5998), false, 1);
//! assert_eq!(total.amount(), dec!(64.7784));
//!
//! let invoice = engine.invoice_breakdown(total, false, 1);
//! assert_eq!(invoice.vat_amount.amount(), dec!(5.182272));
//! assert_eq!(invoice.final_total.amount(), dec!(69.960672));
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineEntry};
use crate::customer::Customer;
use crate::money::Money;
use crate::types::Rate;
use crate::{DEFAULT_BULK_DISCOUNT_BPS, DEFAULT_BULK_THRESHOLD, DEFAULT_LOYALTY_DISCOUNT_BPS, DEFAULT_VAT_BPS};

// =============================================================================
// Pricing Config
// =============================================================================

/// The rates and thresholds the engine prices with.
///
/// ## Defaults
/// - VAT: 8%
/// - Loyalty discount: 10%
/// - Bulk discount: 20%, from 5 line entries up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub vat_rate: Rate,
    pub loyalty_discount: Rate,
    pub bulk_discount: Rate,
    /// Minimum number of line entries for the bulk discount.
    pub bulk_threshold: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            vat_rate: Rate::from_bps(DEFAULT_VAT_BPS),
            loyalty_discount: Rate::from_bps(DEFAULT_LOYALTY_DISCOUNT_BPS),
            bulk_discount: Rate::from_bps(DEFAULT_BULK_DISCOUNT_BPS),
            bulk_threshold: DEFAULT_BULK_THRESHOLD,
        }
    }
}

// =============================================================================
// Invoice Breakdown
// =============================================================================

/// The four figures printed on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceBreakdown {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub vat_amount: Money,
    pub final_total: Money,
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Computes order totals and invoice breakdowns.
///
/// Stateless apart from its [`PricingConfig`]; every method is a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        PricingEngine { config }
    }

    #[inline]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Whether `line_count` line entries earn the bulk discount.
    #[inline]
    pub fn qualifies_for_bulk(&self, line_count: usize) -> bool {
        line_count >= self.config.bulk_threshold
    }

    /// Sum of unit price × quantity over `lines`.
    pub fn base_total(lines: &[LineEntry]) -> Money {
        lines.iter().map(LineEntry::line_total).sum()
    }

    /// Stage 1 from an already summed base.
    ///
    /// Discounts compound: a loyalty member with a bulk cart pays
    /// `base × 0.9 × 0.8 × 1.08` with the default config.
    pub fn price(&self, base: Money, loyalty_member: bool, line_count: usize) -> Money {
        let mut total = base;
        if loyalty_member {
            total = total.apply_discount(self.config.loyalty_discount);
        }
        if self.qualifies_for_bulk(line_count) {
            total = total.apply_discount(self.config.bulk_discount);
        }
        total.apply_surcharge(self.config.vat_rate)
    }

    /// Stage 1: the VAT-inclusive order total for `cart` bought by `customer`.
    ///
    /// Reads the cart's line entries, not its running total. An empty cart
    /// is always zero.
    pub fn order_total(&self, cart: &Cart, customer: &Customer) -> Money {
        let base = Self::base_total(cart.items());
        self.price(base, customer.is_loyalty_member(), cart.line_count())
    }

    /// Stage 2: invoice figures derived from `subtotal`.
    ///
    /// Loyalty and bulk discounts are both taken as a share of `subtotal`
    /// and added together; VAT is charged on what is left.
    pub fn invoice_breakdown(
        &self,
        subtotal: Money,
        loyalty_member: bool,
        line_count: usize,
    ) -> InvoiceBreakdown {
        let mut discount_amount = Money::zero();
        if loyalty_member {
            discount_amount += subtotal.portion(self.config.loyalty_discount);
        }
        if self.qualifies_for_bulk(line_count) {
            discount_amount += subtotal.portion(self.config.bulk_discount);
        }

        let vat_amount = (subtotal - discount_amount).portion(self.config.vat_rate);
        let final_total = subtotal - discount_amount + vat_amount;

        InvoiceBreakdown {
            subtotal,
            discount_amount,
            vat_amount,
            final_total,
        }
    }
}
