//! # Invoices
//!
//! An invoice is a derived snapshot of an [`Order`]: subtotal, discount,
//! VAT and final total. It holds no independent source of truth.
//!
//! ## Two Ways to Compute
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Invoice::new(id, &order)                                               │
//! │      subtotal = order.total_amount()     ◄── the FROZEN total          │
//! │                                                                         │
//! │  invoice.set_order(&order)                                              │
//! │      subtotal = order.calculate_total()  ◄── priced AFRESH from the    │
//! │                                              order's current cart      │
//! │                                                                         │
//! │  Both then run PricingEngine::invoice_breakdown on the subtotal.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The back-reference to the order is its id; the order owns its invoices.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::money::Money;
use crate::order::Order;
use crate::pricing::InvoiceBreakdown;
use crate::types::{InvoiceId, OrderId};

/// An invoice for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    order_id: OrderId,
    #[serde(flatten)]
    breakdown: InvoiceBreakdown,
}

impl Invoice {
    /// Builds an invoice from the order's frozen total.
    pub fn new(id: InvoiceId, order: &Order) -> Self {
        Invoice {
            id,
            order_id: order.id(),
            breakdown: Self::breakdown_for(order, order.total_amount()),
        }
    }

    /// Re-binds the invoice to `order` and recomputes every figure.
    ///
    /// The subtotal comes from [`Order::calculate_total`], not from the
    /// order's stored total, so cart changes made after the order was
    /// created show up here.
    pub fn set_order(&mut self, order: &Order) {
        self.order_id = order.id();
        self.breakdown = Self::breakdown_for(order, order.calculate_total());
        debug!(
            invoice_id = %self.id,
            order_id = %self.order_id,
            final_total = %self.breakdown.final_total,
            "Invoice re-bound"
        );
    }

    fn breakdown_for(order: &Order, subtotal: Money) -> InvoiceBreakdown {
        order.engine().invoice_breakdown(
            subtotal,
            order.customer().is_loyalty_member(),
            order.cart().line_count(),
        )
    }

    #[inline]
    pub fn id(&self) -> InvoiceId {
        self.id
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    #[inline]
    pub fn breakdown(&self) -> &InvoiceBreakdown {
        &self.breakdown
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        self.breakdown.subtotal
    }

    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.breakdown.discount_amount
    }

    #[inline]
    pub fn vat_amount(&self) -> Money {
        self.breakdown.vat_amount
    }

    #[inline]
    pub fn final_total(&self) -> Money {
        self.breakdown.final_total
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invoice(ID: {}, Subtotal: {}, Discount: {}, VAT: {}, Final Total: {})",
            self.id,
            self.breakdown.subtotal,
            self.breakdown.discount_amount,
            self.breakdown.vat_amount,
            self.breakdown.final_total
        )
    }
}
