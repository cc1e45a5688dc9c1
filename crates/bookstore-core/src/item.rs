//! # Catalog Items
//!
//! [`Item`] is the priced, stocked base record. [`EBook`] is a catalog entry
//! that nests an `Item` instead of inheriting from it.
//!
//! ## Stock Ledger
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stock Ledger                                    │
//! │                                                                         │
//! │  add_stock(q)                     remove_stock(q)                       │
//! │  ────────────                     ───────────────                       │
//! │  q > 0  → stock += q              q <= stock → stock -= q, Ok           │
//! │  q <= 0 → nothing happens, Ok     q > stock  → Err, unchanged           │
//! │  overflow → Err, unchanged        overflow   → Err, unchanged           │
//! │                                                                         │
//! │  q is not validated: remove_stock(0) succeeds, and a negative          │
//! │  removal raises the stock.                                             │
//! │                                                                         │
//! │  INVARIANT: stock_quantity >= 0 at all times                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Genre, ItemId};

// =============================================================================
// Item
// =============================================================================

/// A priced, stocked store item.
///
/// Constructors do not validate their arguments; see
/// [`crate::validation`] for opt-in checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,

    /// Unit price.
    pub price: Money,

    /// Free-text description.
    pub description: String,

    /// Units on hand. Private: only the ledger methods may change it.
    stock_quantity: i64,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: ItemId, price: Money, description: impl Into<String>, stock_quantity: i64) -> Self {
        Item {
            id,
            price,
            description: description.into(),
            stock_quantity,
        }
    }

    /// Units currently on hand.
    #[inline]
    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    /// Overwrites the stock level.
    ///
    /// Negative levels are refused and leave the stock untouched.
    pub fn set_stock_quantity(&mut self, stock_quantity: i64) -> CoreResult<()> {
        if stock_quantity < 0 {
            return Err(ValidationError::OutOfRange {
                field: "stock quantity".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }
        self.stock_quantity = stock_quantity;
        Ok(())
    }

    /// Checks whether `quantity` units could be taken right now.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        quantity <= self.stock_quantity
    }

    /// Adds `quantity` units to stock.
    ///
    /// Non-positive quantities are ignored without error. A sum that would
    /// overflow is refused and leaves the stock untouched.
    pub fn add_stock(&mut self, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Ok(());
        }
        self.stock_quantity = self.shifted_stock(quantity)?;
        debug!(item_id = %self.id, added = quantity, stock = self.stock_quantity, "Stock added");
        Ok(())
    }

    /// Takes `quantity` units out of stock.
    ///
    /// Succeeds exactly when `quantity <= stock_quantity`. The quantity
    /// itself is not checked, so zero is a successful no-op and a negative
    /// quantity puts units back.
    ///
    /// ## Returns
    /// - `Ok(())` if the stock covered the request (stock is decremented)
    /// - `Err(CoreError::InsufficientStock)` if it did not
    /// - `Err(CoreError::StockOverflow)` if a negative removal would overflow
    ///
    /// On error the stock is unchanged.
    pub fn remove_stock(&mut self, quantity: i64) -> CoreResult<()> {
        if !self.has_stock(quantity) {
            return Err(CoreError::InsufficientStock {
                item_id: self.id,
                available: self.stock_quantity,
                requested: quantity,
            });
        }

        let change = quantity.checked_neg().ok_or(CoreError::StockOverflow {
            item_id: self.id,
            stock: self.stock_quantity,
            change: quantity,
        })?;
        self.stock_quantity = self.shifted_stock(change)?;
        debug!(item_id = %self.id, removed = quantity, stock = self.stock_quantity, "Stock removed");
        Ok(())
    }

    fn shifted_stock(&self, change: i64) -> CoreResult<i64> {
        self.stock_quantity
            .checked_add(change)
            .ok_or(CoreError::StockOverflow {
                item_id: self.id,
                stock: self.stock_quantity,
                change,
            })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Item(ID: {}, Price: {}, Stock: {})",
            self.id, self.price, self.stock_quantity
        )
    }
}

// =============================================================================
// EBook
// =============================================================================

/// An electronic book in the catalog.
///
/// The base [`Item`] is a nested field; `id()`, `price()` and the stock
/// ledger are forwarded for convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EBook {
    /// Identity, price, description and stock.
    pub item: Item,

    pub title: String,

    pub author: String,

    /// Publication date.
    pub pub_date: NaiveDate,

    pub genre: Genre,
}

impl EBook {
    /// Creates a new e-book.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        author: impl Into<String>,
        pub_date: NaiveDate,
        genre: Genre,
        price: Money,
        description: impl Into<String>,
        stock_quantity: i64,
    ) -> Self {
        EBook {
            item: Item::new(id, price, description, stock_quantity),
            title: title.into(),
            author: author.into(),
            pub_date,
            genre,
        }
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.item.id
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.item.price
    }

    #[inline]
    pub fn stock_quantity(&self) -> i64 {
        self.item.stock_quantity()
    }

    /// See [`Item::add_stock`].
    pub fn add_stock(&mut self, quantity: i64) -> CoreResult<()> {
        self.item.add_stock(quantity)
    }

    /// See [`Item::remove_stock`].
    pub fn remove_stock(&mut self, quantity: i64) -> CoreResult<()> {
        self.item.remove_stock(quantity)
    }
}

impl fmt::Display for EBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EBook(Title: {}, Author: {}, Genre: {})",
            self.title, self.author, self.genre
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_book(stock: i64) -> EBook {
        EBook::new(
            ItemId::new(1),
            "Programming Fundamentals",
            "Afshan Parkar",
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            Genre::Education,
            Money::from_cents(2999),
            "A comprehensive guide to Programming Fundamentals.",
            stock,
        )
    }

    #[test]
    fn test_add_stock() {
        let mut book = test_book(10);
        book.add_stock(5).unwrap();
        assert_eq!(book.stock_quantity(), 15);
    }

    #[test]
    fn test_add_stock_ignores_non_positive() {
        let mut book = test_book(10);
        assert!(book.add_stock(0).is_ok());
        assert!(book.add_stock(-4).is_ok());
        assert_eq!(book.stock_quantity(), 10);
    }

    #[test]
    fn test_remove_stock_success() {
        let mut book = test_book(10);
        assert!(book.remove_stock(10).is_ok());
        assert_eq!(book.stock_quantity(), 0);
    }

    #[test]
    fn test_remove_stock_insufficient_leaves_stock() {
        let mut book = test_book(3);
        let err = book.remove_stock(5).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                item_id: ItemId::new(1),
                available: 3,
                requested: 5,
            }
        );
        assert_eq!(book.stock_quantity(), 3);
    }

    #[test]
    fn test_remove_zero_succeeds() {
        let mut book = test_book(0);
        assert!(book.remove_stock(0).is_ok());
        assert_eq!(book.stock_quantity(), 0);
    }

    #[test]
    fn test_remove_negative_puts_units_back() {
        let mut book = test_book(3);
        assert!(book.remove_stock(-2).is_ok());
        assert_eq!(book.stock_quantity(), 5);
    }

    #[test]
    fn test_add_stock_overflow_is_refused() {
        let mut book = test_book(i64::MAX - 1);
        book.add_stock(1).unwrap();
        assert_eq!(book.stock_quantity(), i64::MAX);

        assert_eq!(
            book.add_stock(1).unwrap_err(),
            CoreError::StockOverflow {
                item_id: ItemId::new(1),
                stock: i64::MAX,
                change: 1,
            }
        );
        assert_eq!(book.stock_quantity(), i64::MAX);
    }

    #[test]
    fn test_negative_removal_overflow_is_refused() {
        let mut book = test_book(i64::MAX);
        assert!(matches!(
            book.remove_stock(-1),
            Err(CoreError::StockOverflow { .. })
        ));
        assert!(matches!(
            book.remove_stock(i64::MIN),
            Err(CoreError::StockOverflow { .. })
        ));
        assert_eq!(book.stock_quantity(), i64::MAX);
    }

    #[test]
    fn test_set_stock_quantity() {
        let mut book = test_book(3);
        book.item.set_stock_quantity(8).unwrap();
        assert_eq!(book.stock_quantity(), 8);
        assert!(book.item.set_stock_quantity(-1).is_err());
        assert_eq!(book.stock_quantity(), 8);
    }

    #[test]
    fn test_display() {
        let book = test_book(10);
        assert_eq!(
            book.to_string(),
            "EBook(Title: Programming Fundamentals, Author: Afshan Parkar, Genre: Education)"
        );
        assert_eq!(
            book.item.to_string(),
            "Item(ID: 1, Price: $29.99, Stock: 10)"
        );
    }

    #[test]
    fn test_serde_keeps_stock() {
        let book = test_book(4);
        let json = serde_json::to_string(&book).unwrap();
        let back: EBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stock_quantity(), 4);
        assert_eq!(back, book);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum LedgerOp {
        Add(i64),
        Remove(i64),
    }

    fn ledger_op() -> impl Strategy<Value = LedgerOp> {
        prop_oneof![
            (-20i64..=20).prop_map(LedgerOp::Add),
            (-20i64..=40).prop_map(LedgerOp::Remove),
        ]
    }

    /// Stock never goes negative, and a refused removal changes nothing.
    #[test]
    fn prop_stock_never_negative() {
        proptest!(|(
            initial in 0i64..=30,
            ops in prop::collection::vec(ledger_op(), 0..=50)
        )| {
            let mut item = Item::new(ItemId::new(1), Money::from_cents(100), "", initial);

            for op in ops {
                let before = item.stock_quantity();
                match op {
                    LedgerOp::Add(q) => {
                        prop_assert!(item.add_stock(q).is_ok());
                        let expected = if q > 0 { before + q } else { before };
                        prop_assert_eq!(item.stock_quantity(), expected);
                    }
                    LedgerOp::Remove(q) => {
                        let ok = item.remove_stock(q).is_ok();
                        prop_assert_eq!(ok, q <= before);
                        if ok {
                            prop_assert_eq!(item.stock_quantity(), before - q);
                        } else {
                            prop_assert_eq!(item.stock_quantity(), before);
                        }
                    }
                }
                prop_assert!(item.stock_quantity() >= 0);
            }
        });
    }
}
