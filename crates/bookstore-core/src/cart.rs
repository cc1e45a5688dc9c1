//! # Shopping Cart
//!
//! A cart collects line entries for one owner and keeps running totals.
//! Adding to the cart takes stock out of the e-book immediately.
//!
//! ## Add Item Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    cart.add_item(&mut book, qty)                        │
//! │                                                                         │
//! │  line total / running totals overflow ? ──yes──► Err(TotalsOverflow)    │
//! │      │no                                                                │
//! │      ▼                                                                  │
//! │  book.remove_stock(qty) ──Err──► Err(InsufficientStock) nothing changes │
//! │      │Ok                                                                │
//! │      ▼                                                                  │
//! │  LineEntry snapshot ──► items.push ──► totals += ──► last_updated = now │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `add_item` call that succeeds appends a new line, even for a book
//! already in the cart. The quantity is not validated: `add_item(book, 0)`
//! appends a zero-quantity line. The bulk discount counts lines, not units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::item::EBook;
use crate::money::Money;
use crate::types::{CartId, CustomerId, ItemId};

// =============================================================================
// Line Entry
// =============================================================================

/// One successful add-to-cart event, frozen at append time.
///
/// ## Snapshot Semantics
/// Title, description and unit price are copied from the book when the
/// entry is created. Later price changes on the book do not reach it.
///
/// `is_available` records `stock >= quantity` as measured right after the
/// cart took its units out of stock. It is captured once and never
/// refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEntry {
    pub ebook_id: ItemId,
    pub title: String,
    pub description: String,
    /// Price per unit at time of adding (frozen).
    pub unit_price: Money,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
    pub is_available: bool,
}

impl LineEntry {
    fn snapshot(ebook: &EBook, quantity: i64) -> Self {
        LineEntry {
            ebook_id: ebook.id(),
            title: ebook.title.clone(),
            description: ebook.item.description.clone(),
            unit_price: ebook.price(),
            quantity,
            added_at: Utc::now(),
            is_available: ebook.stock_quantity() >= quantity,
        }
    }

    /// Unit price × quantity. Always fits: `Cart::add_item` refuses lines
    /// whose product overflows.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

impl fmt::Display for LineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CartItem(EBook: {}, Item: {}, Quantity: {}, Date Added: {}, Available: {})",
            self.title,
            self.description,
            self.quantity,
            self.added_at.date_naive(),
            self.is_available
        )
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart.
///
/// ## Invariants
/// - `total_quantity == Σ line.quantity`
/// - `total_price == Σ line.unit_price × line.quantity`
///
/// Both totals are kept incrementally by [`Cart::add_item`], the only way
/// lines get in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    owner: CustomerId,
    items: Vec<LineEntry>,
    total_quantity: i64,
    total_price: Money,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new(id: CartId, owner: CustomerId) -> Self {
        let now = Utc::now();
        Cart {
            id,
            owner,
            items: Vec::new(),
            total_quantity: 0,
            total_price: Money::zero(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Takes `quantity` units of `ebook` out of stock and records a line.
    ///
    /// ## Returns
    /// - `Ok(&LineEntry)` with the line just appended
    /// - `Err(CoreError::InsufficientStock)` if the book cannot cover it
    /// - `Err(CoreError::TotalsOverflow)` if the line or the running totals
    ///   would not fit
    ///
    /// On error the cart and the book are left exactly as they were.
    pub fn add_item(&mut self, ebook: &mut EBook, quantity: i64) -> CoreResult<&LineEntry> {
        let (total_quantity, total_price) = match self.totals_after(ebook.price(), quantity) {
            Some(totals) => totals,
            None => {
                warn!(cart_id = %self.id, ebook_id = %ebook.id(), quantity, "Rejected add: totals overflow");
                return Err(CoreError::TotalsOverflow { cart_id: self.id });
            }
        };

        if let Err(err) = ebook.remove_stock(quantity) {
            warn!(cart_id = %self.id, ebook_id = %ebook.id(), quantity, error = %err, "Rejected add to cart");
            return Err(err);
        }

        let entry = LineEntry::snapshot(ebook, quantity);
        self.total_quantity = total_quantity;
        self.total_price = total_price;
        self.last_updated = entry.added_at;
        debug!(
            cart_id = %self.id,
            ebook_id = %entry.ebook_id,
            quantity,
            total_price = %self.total_price,
            "Added line to cart"
        );

        self.items.push(entry);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Running totals with one more line of `quantity` at `unit_price`.
    fn totals_after(&self, unit_price: Money, quantity: i64) -> Option<(i64, Money)> {
        let line_total = unit_price.checked_multiply_quantity(quantity)?;
        Some((
            self.total_quantity.checked_add(quantity)?,
            self.total_price.checked_add(line_total)?,
        ))
    }

    #[inline]
    pub fn id(&self) -> CartId {
        self.id
    }

    #[inline]
    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    /// Hands the cart to another customer. Lines and totals are kept.
    pub fn set_owner(&mut self, owner: CustomerId) {
        self.owner = owner;
        self.last_updated = Utc::now();
    }

    /// Line entries in the order they were added.
    #[inline]
    pub fn items(&self) -> &[LineEntry] {
        &self.items
    }

    /// Number of line entries (successful `add_item` calls).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities over all lines.
    #[inline]
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    /// Sum of line totals, before any discount or VAT.
    #[inline]
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShoppingCart(ID: {}, Owner: {}, Total Items: {}, Total Price: {})",
            self.id, self.owner, self.total_quantity, self.total_price
        )
    }
}

/// Cart totals summary for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total_price: cart.total_price(),
        }
    }
}
