//! Runs the built-in storefront session end to end.

use bookstore_cli::report::{write_json, write_text};
use bookstore_cli::{AppConfig, Scenario};
use bookstore_core::{CartId, ItemId, OrderId, PricingEngine, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn demo_report() -> bookstore_cli::RunReport {
    Scenario::demo()
        .unwrap()
        .run(PricingEngine::default())
        .unwrap()
}

fn order_total(report: &bookstore_cli::RunReport, id: u64) -> Decimal {
    report.order(OrderId::new(id)).unwrap().total_amount().amount()
}

#[test]
fn demo_order_totals() {
    let report = demo_report();

    assert_eq!(order_total(&report, 2001), dec!(97.17084));
    assert_eq!(order_total(&report, 2002), dec!(97.1676));
    assert_eq!(order_total(&report, 2003), dec!(43.1892));
    assert_eq!(order_total(&report, 2004), dec!(204.06168));
    assert_eq!(order_total(&report, 2005), dec!(0));
    assert_eq!(order_total(&report, 2006), dec!(245.7));
    assert_eq!(order_total(&report, 2007), dec!(32.3892));
}

#[test]
fn demo_invoices() {
    let report = demo_report();
    assert_eq!(report.invoices.len(), 7);

    let loyal = &report.invoices[0];
    assert_eq!(loyal.order_id(), OrderId::new(2001));
    assert_eq!(loyal.discount_amount().amount(), dec!(9.717084));
    assert_eq!(loyal.vat_amount().amount(), dec!(6.99630048));
    assert_eq!(loyal.final_total().amount(), dec!(94.45005648));

    let two_lines = &report.invoices[3];
    assert_eq!(two_lines.discount_amount().amount(), dec!(20.406168));
    assert_eq!(two_lines.vat_amount().amount(), dec!(14.69244096));
    assert_eq!(two_lines.final_total().amount(), dec!(198.34795296));

    let empty = &report.invoices[4];
    assert!(empty.subtotal().is_zero());
    assert!(empty.final_total().is_zero());

    let plain = &report.invoices[6];
    assert!(plain.discount_amount().is_zero());
    assert_eq!(plain.vat_amount().amount(), dec!(2.591136));
    assert_eq!(plain.final_total().amount(), dec!(34.980336));

    // Each standalone invoice agrees with the one its order issued itself.
    for invoice in &report.invoices {
        let order = report.order(invoice.order_id()).unwrap();
        assert_eq!(invoice.breakdown(), order.invoices()[0].breakdown());
    }
}

#[test]
fn demo_stock_and_refusals() {
    let report = demo_report();

    assert_eq!(report.book(ItemId::new(1)).unwrap().stock_quantity(), 1);
    assert_eq!(report.book(ItemId::new(2)).unwrap().stock_quantity(), 0);
    assert_eq!(report.book(ItemId::new(3)).unwrap().stock_quantity(), 5);

    let refused: Vec<(CartId, ItemId, i64)> = report
        .refused()
        .map(|o| (o.cart, o.book, o.quantity))
        .collect();
    assert_eq!(
        refused,
        vec![
            (CartId::new(2), ItemId::new(3), 1),
            (CartId::new(2), ItemId::new(1), 12),
            (CartId::new(5), ItemId::new(1), 15),
        ]
    );

    assert_eq!(report.open_carts.len(), 1);
    assert_eq!(report.open_carts[0].id(), CartId::new(5));
    assert!(report.open_carts[0].is_empty());
}

#[test]
fn demo_with_custom_rates() {
    let mut config = AppConfig::default();
    config.pricing.vat_rate = Rate::from_bps(0);
    config.pricing.bulk_threshold = 2;
    config.validate().unwrap();

    let report = Scenario::demo().unwrap().run(config.engine()).unwrap();

    // 99.97 × 0.9 × 0.8, no VAT
    assert_eq!(order_total(&report, 2001), dec!(71.9784));
    // Single line: no bulk discount, no VAT
    assert_eq!(order_total(&report, 2003), dec!(39.99));
}

#[test]
fn demo_renders() {
    let report = demo_report();

    let mut text = Vec::new();
    write_text(&mut text, &report, "Online Bookstore").unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("Order(ID: 2001, Total: $97.17)"));
    assert!(text.contains("Invoice(ID: 3007, Subtotal: $32.39, Discount: $0.00, VAT: $2.59, Final Total: $34.98)"));

    let mut json = Vec::new();
    write_json(&mut json, &report, "Online Bookstore").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["orders"].as_array().unwrap().len(), 7);
    assert_eq!(value["books"][2]["title"], "Data Science Essentials");
}
