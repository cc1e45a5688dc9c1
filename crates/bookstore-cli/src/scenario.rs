//! # Scenario Files
//!
//! A scenario is a JSON description of one storefront session: the catalog,
//! the customers, the carts they fill and the orders and invoices placed
//! from those carts.
//!
//! ## Run Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Scenario Run                                    │
//! │                                                                         │
//! │  JSON ──► Scenario::from_json ──► validate()                            │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │  books ──► Catalog       customers ──► map                              │
//! │                                      │                                  │
//! │  carts (in file order):              ▼                                  │
//! │    restock ──► add_item per line ──► LineOutcome (accepted / refused)   │
//! │                                      │                                  │
//! │  orders:   cart moved into Order::with_engine                           │
//! │  invoices: Invoice::new against a placed order                          │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                                  RunReport                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Structural problems (unknown ids, duplicates, bad emails, negative
//! prices, non-positive quantities) are rejected by `validate()` before any
//! stock moves. A line the stock cannot cover is not a structural problem:
//! it is refused by the cart and recorded as a [`LineOutcome`].

use bookstore_core::validation::{
    validate_email, validate_price, validate_quantity, validate_stock, validate_text,
    validate_title,
};
use bookstore_core::{
    Cart, CartId, Catalog, CoreError, Customer, CustomerId, EBook, Genre, Invoice, InvoiceId,
    ItemId, Money, Order, OrderId, PricingEngine, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// The built-in storefront session run when no scenario file is given.
pub const DEMO_SCENARIO: &str = include_str!("../scenarios/storefront.json");

// =============================================================================
// Scenario Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub pub_date: NaiveDate,
    pub genre: Genre,
    pub price: Money,
    #[serde(default)]
    pub description: String,
    /// Opening stock level.
    pub stock: i64,
}

impl BookRecord {
    fn to_ebook(&self) -> EBook {
        EBook::new(
            self.id,
            self.title.clone(),
            self.author.clone(),
            self.pub_date,
            self.genre,
            self.price,
            self.description.clone(),
            self.stock,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub loyalty: bool,
}

impl CustomerRecord {
    fn to_customer(&self) -> Customer {
        let mut customer = Customer::new(self.id, self.name.clone(), self.email.clone());
        if self.loyalty {
            customer.enable_loyalty();
        }
        customer
    }
}

/// A book id with a quantity; used for both cart lines and restocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub book: ItemId,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    pub id: CartId,
    pub owner: CustomerId,

    /// Stock delivered just before this cart is filled.
    #[serde(default)]
    pub restock: Vec<LineRecord>,

    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub cart: CartId,

    /// Customer placing the order. Defaults to the cart owner.
    #[serde(default)]
    pub customer: Option<CustomerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub order: OrderId,
}

// =============================================================================
// Scenario
// =============================================================================

/// One storefront session, as read from a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub carts: Vec<CartRecord>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    /// Standalone invoices, issued in addition to each order's own.
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
}

impl Scenario {
    /// Reads and validates a scenario file.
    pub fn load(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading scenario");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The built-in storefront session.
    pub fn demo() -> CliResult<Self> {
        Self::from_json(DEMO_SCENARIO)
    }

    /// Parses and validates a scenario document.
    pub fn from_json(contents: &str) -> CliResult<Self> {
        let scenario: Scenario = serde_json::from_str(contents)?;
        scenario.validate()?;
        debug!(
            books = scenario.books.len(),
            customers = scenario.customers.len(),
            carts = scenario.carts.len(),
            orders = scenario.orders.len(),
            "Scenario validated"
        );
        Ok(scenario)
    }

    /// Checks every record and cross-reference.
    pub fn validate(&self) -> CliResult<()> {
        let mut book_ids = BTreeSet::new();
        for book in &self.books {
            unique(&mut book_ids, book.id, "item id")?;
            validate_title(&book.title)?;
            validate_text("author", &book.author)?;
            validate_price(book.price)?;
            validate_stock(book.stock)?;
        }

        let mut customer_ids = BTreeSet::new();
        for customer in &self.customers {
            unique(&mut customer_ids, customer.id, "customer id")?;
            validate_text("name", &customer.name)?;
            validate_email(&customer.email)?;
        }

        let known_book = |line: &LineRecord| -> CliResult<()> {
            if !book_ids.contains(&line.book) {
                return Err(CoreError::UnknownItem(line.book).into());
            }
            validate_quantity(line.quantity)?;
            Ok(())
        };

        let mut cart_ids = BTreeSet::new();
        for cart in &self.carts {
            unique(&mut cart_ids, cart.id, "cart id")?;
            if !customer_ids.contains(&cart.owner) {
                return Err(CliError::UnknownCustomer(cart.owner));
            }
            cart.restock.iter().try_for_each(&known_book)?;
            cart.lines.iter().try_for_each(&known_book)?;
        }

        let mut order_ids = BTreeSet::new();
        let mut ordered_carts = BTreeSet::new();
        for order in &self.orders {
            unique(&mut order_ids, order.id, "order id")?;
            if !cart_ids.contains(&order.cart) {
                return Err(CliError::UnknownCart(order.cart));
            }
            if !ordered_carts.insert(order.cart) {
                return Err(CliError::CartAlreadyOrdered(order.cart));
            }
            if let Some(customer) = order.customer {
                if !customer_ids.contains(&customer) {
                    return Err(CliError::UnknownCustomer(customer));
                }
            }
        }

        let mut invoice_ids = BTreeSet::new();
        for invoice in &self.invoices {
            unique(&mut invoice_ids, invoice.id, "invoice id")?;
            if !order_ids.contains(&invoice.order) {
                return Err(CliError::UnknownOrder(invoice.order));
            }
        }

        Ok(())
    }

    /// Plays the session against `engine`.
    pub fn run(&self, engine: PricingEngine) -> CliResult<RunReport> {
        let mut catalog = Catalog::new();
        for book in &self.books {
            catalog.insert(book.to_ebook())?;
        }

        let customers: BTreeMap<CustomerId, Customer> = self
            .customers
            .iter()
            .map(|record| (record.id, record.to_customer()))
            .collect();

        let mut outcomes = Vec::new();
        let mut carts: BTreeMap<CartId, Cart> = BTreeMap::new();
        for record in &self.carts {
            for restock in &record.restock {
                catalog.require_mut(restock.book)?.add_stock(restock.quantity)?;
            }

            let mut cart = Cart::new(record.id, record.owner);
            for line in &record.lines {
                let book = catalog.require_mut(line.book)?;
                let refusal = cart.add_item(book, line.quantity).err();
                outcomes.push(LineOutcome {
                    cart: record.id,
                    book: line.book,
                    quantity: line.quantity,
                    accepted: refusal.is_none(),
                    reason: refusal.map(|e| e.to_string()),
                });
            }
            carts.insert(record.id, cart);
        }

        let mut orders = Vec::with_capacity(self.orders.len());
        for record in &self.orders {
            let cart = carts
                .remove(&record.cart)
                .ok_or(CliError::CartAlreadyOrdered(record.cart))?;
            let customer_id = record.customer.unwrap_or_else(|| cart.owner());
            let customer = customers
                .get(&customer_id)
                .cloned()
                .ok_or(CliError::UnknownCustomer(customer_id))?;
            orders.push(Order::with_engine(record.id, customer, cart, engine));
        }

        let mut invoices = Vec::with_capacity(self.invoices.len());
        for record in &self.invoices {
            let order = orders
                .iter()
                .find(|order| order.id() == record.order)
                .ok_or(CliError::UnknownOrder(record.order))?;
            invoices.push(Invoice::new(record.id, order));
        }

        info!(
            orders = orders.len(),
            invoices = invoices.len(),
            refused_lines = outcomes.iter().filter(|o| !o.accepted).count(),
            "Scenario run complete"
        );

        Ok(RunReport {
            books: catalog.iter().cloned().collect(),
            customers: customers.into_values().collect(),
            outcomes,
            orders,
            open_carts: carts.into_values().collect(),
            invoices,
        })
    }
}

fn unique<T: Ord + Copy + ToString>(seen: &mut BTreeSet<T>, id: T, field: &str) -> CliResult<()> {
    if !seen.insert(id) {
        return Err(ValidationError::Duplicate {
            field: field.to_string(),
            value: id.to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Run Results
// =============================================================================

/// What happened to one requested cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOutcome {
    pub cart: CartId,
    pub book: ItemId,
    pub quantity: i64,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Everything a scenario run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Catalog state after the run, ascending by id.
    pub books: Vec<EBook>,
    pub customers: Vec<Customer>,
    pub outcomes: Vec<LineOutcome>,
    /// Placed orders, each owning its cart.
    pub orders: Vec<Order>,
    /// Carts that were filled but never ordered.
    pub open_carts: Vec<Cart>,
    pub invoices: Vec<Invoice>,
}

impl RunReport {
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }

    pub fn book(&self, id: ItemId) -> Option<&EBook> {
        self.books.iter().find(|book| book.id() == id)
    }

    /// Lines the carts refused.
    pub fn refused(&self) -> impl Iterator<Item = &LineOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.accepted)
    }
}
