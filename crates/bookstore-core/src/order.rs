//! # Orders
//!
//! An order binds a customer to a cart and freezes the price at creation.
//!
//! ## Construction Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order::new(id, customer, cart)                                         │
//! │      │                                                                  │
//! │      ├──► engine.order_total(cart, customer) ──► total_amount (frozen)  │
//! │      │                                                                  │
//! │      └──► Invoice::new(1, &order) ──► invoices = [invoice]              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `total_amount` is not re-derived on read. Changing the cart through
//! [`Order::cart_mut`] or the customer through [`Order::set_customer`] leaves
//! it alone; [`Order::rebind_cart`] is the explicit way to re-price.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::cart::Cart;
use crate::customer::Customer;
use crate::invoice::Invoice;
use crate::money::Money;
use crate::pricing::PricingEngine;
use crate::types::{InvoiceId, OrderId, OrderStatus};

/// Id given to the invoice every order creates for itself.
pub const INITIAL_INVOICE_ID: InvoiceId = InvoiceId::new(1);

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    cart: Cart,
    status: OrderStatus,
    total_amount: Money,
    invoices: Vec<Invoice>,
    engine: PricingEngine,
}

impl Order {
    /// Creates an order priced with the default rates.
    pub fn new(id: OrderId, customer: Customer, cart: Cart) -> Self {
        Self::with_engine(id, customer, cart, PricingEngine::default())
    }

    /// Creates an order priced by `engine`.
    ///
    /// The total is computed once here, then exactly one invoice is built
    /// from it.
    pub fn with_engine(id: OrderId, customer: Customer, cart: Cart, engine: PricingEngine) -> Self {
        let total_amount = engine.order_total(&cart, &customer);
        let mut order = Order {
            id,
            customer,
            cart,
            status: OrderStatus::default(),
            total_amount,
            invoices: Vec::with_capacity(1),
            engine,
        };

        let invoice = Invoice::new(INITIAL_INVOICE_ID, &order);
        order.invoices.push(invoice);

        info!(
            order_id = %order.id,
            customer_id = %order.customer.id,
            lines = order.cart.line_count(),
            total = %order.total_amount,
            "Order created"
        );
        order
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Replaces the customer. The frozen total is not recomputed.
    pub fn set_customer(&mut self, customer: Customer) {
        self.customer = customer;
    }

    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the bound cart. The frozen total is not recomputed.
    #[inline]
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// The total frozen at construction (or at the last [`Order::rebind_cart`]).
    #[inline]
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    #[inline]
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    #[inline]
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Prices the current cart and customer afresh.
    ///
    /// Does not touch the frozen total.
    pub fn calculate_total(&self) -> Money {
        self.engine.order_total(&self.cart, &self.customer)
    }

    /// Binds a different cart and re-prices the order.
    ///
    /// The total is frozen again from the new cart and every owned invoice
    /// is re-bound to this order. Returns the cart that was replaced.
    pub fn rebind_cart(&mut self, cart: Cart) -> Cart {
        let previous = std::mem::replace(&mut self.cart, cart);
        self.total_amount = self.calculate_total();

        let mut invoices = std::mem::take(&mut self.invoices);
        for invoice in &mut invoices {
            invoice.set_order(self);
        }
        self.invoices = invoices;

        debug!(
            order_id = %self.id,
            previous_cart = %previous.id(),
            cart = %self.cart.id(),
            total = %self.total_amount,
            "Order re-bound to cart"
        );
        previous
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order(ID: {}, Total: {})", self.id, self.total_amount)?;
        write!(f, "Invoices:")?;
        for invoice in &self.invoices {
            write!(f, "\n{}", invoice)?;
        }
        Ok(())
    }
}
