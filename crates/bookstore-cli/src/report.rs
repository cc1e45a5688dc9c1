//! # Run Summaries
//!
//! Renders a [`RunReport`] as plain text (entity `Display` lines grouped by
//! section) or as one pretty-printed JSON document.

use bookstore_core::{Cart, CartId, CartTotals, CustomerId};
use serde::Serialize;
use std::io::Write;

use crate::error::CliResult;
use crate::scenario::RunReport;

/// JSON envelope: the report plus the store it ran under.
#[derive(Serialize)]
struct JsonReport<'a> {
    store: &'a str,
    /// Totals of every cart, ordered or not, ascending by id.
    carts: Vec<CartSummary>,
    #[serde(flatten)]
    report: &'a RunReport,
}

#[derive(Serialize)]
struct CartSummary {
    id: CartId,
    owner: CustomerId,
    #[serde(flatten)]
    totals: CartTotals,
}

/// Every cart in the report, ascending by id.
fn all_carts(report: &RunReport) -> Vec<&Cart> {
    let mut carts: Vec<&Cart> = report
        .orders
        .iter()
        .map(|order| order.cart())
        .chain(report.open_carts.iter())
        .collect();
    carts.sort_by_key(|cart| cart.id());
    carts
}

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &RunReport, store: &str) -> CliResult<()> {
    let carts = all_carts(report)
        .into_iter()
        .map(|cart| CartSummary {
            id: cart.id(),
            owner: cart.owner(),
            totals: CartTotals::from(cart),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &JsonReport { store, carts, report })?;
    writeln!(out)?;
    Ok(())
}

/// Writes the report as text.
pub fn write_text<W: Write>(out: &mut W, report: &RunReport, store: &str) -> CliResult<()> {
    writeln!(out, "{}", store)?;
    writeln!(out, "{}", "=".repeat(store.chars().count()))?;

    section(out, "Catalog")?;
    for book in &report.books {
        writeln!(
            out,
            "  {} [{}, stock {}]",
            book,
            book.price(),
            book.stock_quantity()
        )?;
    }

    section(out, "Customers")?;
    for customer in &report.customers {
        let tag = if customer.is_loyalty_member() {
            " [loyalty]"
        } else {
            ""
        };
        writeln!(out, "  {}{}", customer, tag)?;
    }

    section(out, "Cart Lines")?;
    for outcome in &report.outcomes {
        match &outcome.reason {
            None => writeln!(
                out,
                "  cart {}: {} x item {} added",
                outcome.cart, outcome.quantity, outcome.book
            )?,
            Some(reason) => writeln!(
                out,
                "  cart {}: {} x item {} refused ({})",
                outcome.cart, outcome.quantity, outcome.book, reason
            )?,
        }
    }

    section(out, "Carts")?;
    for cart in all_carts(report) {
        let totals = CartTotals::from(cart);
        writeln!(out, "  {} [lines: {}]", cart, totals.line_count)?;
    }

    section(out, "Orders")?;
    for order in &report.orders {
        writeln!(out, "{}", order)?;
    }

    if !report.invoices.is_empty() {
        section(out, "Invoices")?;
        for invoice in &report.invoices {
            writeln!(out, "{}", invoice)?;
        }
    }

    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> CliResult<()> {
    writeln!(out)?;
    writeln!(out, "{}:", title)?;
    Ok(())
}
