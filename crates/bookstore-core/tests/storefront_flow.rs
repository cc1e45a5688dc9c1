//! End-to-end storefront runs: catalog → carts → orders → invoices.

use bookstore_core::{
    Cart, CartId, Catalog, CoreError, Customer, CustomerId, EBook, Genre, Invoice, InvoiceId,
    ItemId, Money, Order, OrderId, OrderStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FUNDAMENTALS: ItemId = ItemId::new(1);
const WIMPY_KID: ItemId = ItemId::new(2);
const DATA_SCIENCE: ItemId = ItemId::new(3);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .insert(EBook::new(
            FUNDAMENTALS,
            "Programming Fundamentals",
            "Afshan Parkar",
            date(2021, 1, 1),
            Genre::Education,
            Money::from_cents(2999),
            "A comprehensive guide to Programming Fundamentals.",
            10,
        ))
        .unwrap();
    catalog
        .insert(EBook::new(
            WIMPY_KID,
            "Diary of a Wimpy Kid",
            "Jeff Kinney",
            date(2022, 2, 2),
            Genre::Fiction,
            Money::from_cents(3999),
            "A fun read",
            5,
        ))
        .unwrap();
    catalog
        .insert(EBook::new(
            DATA_SCIENCE,
            "Data Science Essentials",
            "Mary Brown",
            date(2020, 6, 15),
            Genre::Science,
            Money::from_cents(4550),
            "Data Science basics.",
            0,
        ))
        .unwrap();
    catalog
}

fn add(cart: &mut Cart, catalog: &mut Catalog, id: ItemId, qty: i64) -> Result<(), CoreError> {
    let book = catalog.require_mut(id)?;
    cart.add_item(book, qty).map(|_| ())
}

fn stock(catalog: &Catalog, id: ItemId) -> i64 {
    catalog.get(id).unwrap().stock_quantity()
}

fn amount(money: Money) -> Decimal {
    money.amount()
}

#[test]
fn full_storefront_run() {
    let mut catalog = catalog();

    let mut loyal = Customer::new(CustomerId::new(1001), "Abdulla Alremeithi", "abdulla@example.com");
    loyal.enable_loyalty();
    let plain = Customer::new(CustomerId::new(1002), "Fatima Almansoori", "fatima@example.com");

    // Cart 1: loyal customer, two lines.
    let mut cart1 = Cart::new(CartId::new(1), loyal.id);
    add(&mut cart1, &mut catalog, FUNDAMENTALS, 2).unwrap();
    add(&mut cart1, &mut catalog, WIMPY_KID, 1).unwrap();
    assert_eq!(cart1.total_quantity(), 3);
    assert_eq!(amount(cart1.total_price()), dec!(99.97));

    // Cart 2: out-of-stock and over-stock adds are refused, the third works.
    let mut cart2 = Cart::new(CartId::new(2), plain.id);
    assert!(matches!(
        add(&mut cart2, &mut catalog, DATA_SCIENCE, 1),
        Err(CoreError::InsufficientStock { available: 0, .. })
    ));
    assert!(matches!(
        add(&mut cart2, &mut catalog, FUNDAMENTALS, 12),
        Err(CoreError::InsufficientStock { available: 8, requested: 12, .. })
    ));
    add(&mut cart2, &mut catalog, FUNDAMENTALS, 3).unwrap();
    assert_eq!(cart2.line_count(), 1);
    assert_eq!(amount(cart2.total_price()), dec!(89.97));
    assert_eq!(stock(&catalog, FUNDAMENTALS), 5);

    // Orders freeze totals.
    let order1 = Order::new(OrderId::new(2001), loyal.clone(), cart1);
    let order2 = Order::new(OrderId::new(2002), plain.clone(), cart2);
    assert_eq!(order1.status(), OrderStatus::Pending);
    assert_eq!(amount(order1.total_amount()), dec!(97.17084));
    assert_eq!(amount(order2.total_amount()), dec!(97.1676));

    // A standalone invoice matches the one the order made for itself.
    let invoice1 = Invoice::new(InvoiceId::new(3001), &order1);
    assert_eq!(invoice1.breakdown(), order1.invoices()[0].breakdown());
    assert_eq!(amount(invoice1.subtotal()), dec!(97.17084));
    assert_eq!(amount(invoice1.discount_amount()), dec!(9.717084));
    assert_eq!(amount(invoice1.vat_amount()), dec!(6.99630048));
    assert_eq!(amount(invoice1.final_total()), dec!(94.45005648));

    // Case 1: plain customer, single line.
    let mut cart3 = Cart::new(CartId::new(3), plain.id);
    add(&mut cart3, &mut catalog, WIMPY_KID, 1).unwrap();
    let order3 = Order::new(OrderId::new(2003), plain.clone(), cart3);
    assert_eq!(amount(order3.total_amount()), dec!(43.1892));

    // Case 2: loyal customer, six units over two lines: loyalty only.
    let mut cart4 = Cart::new(CartId::new(4), loyal.id);
    add(&mut cart4, &mut catalog, FUNDAMENTALS, 3).unwrap();
    add(&mut cart4, &mut catalog, WIMPY_KID, 3).unwrap();
    assert_eq!(cart4.total_quantity(), 6);
    let order4 = Order::new(OrderId::new(2004), loyal.clone(), cart4);
    assert_eq!(amount(order4.total_amount()), dec!(204.06168));
    assert!(!order4.engine().qualifies_for_bulk(order4.cart().line_count()));

    // Case 3: more than what is left.
    let mut cart5 = Cart::new(CartId::new(5), plain.id);
    assert!(add(&mut cart5, &mut catalog, FUNDAMENTALS, 15).is_err());
    assert!(cart5.is_empty());
    assert_eq!(stock(&catalog, FUNDAMENTALS), 2);
    assert_eq!(stock(&catalog, WIMPY_KID), 0);
}

#[test]
fn loyal_bulk_order_double_discounts_on_invoice() {
    let mut book = EBook::new(
        ItemId::new(10),
        "Short Stories",
        "Various",
        date(2019, 3, 3),
        Genre::Fantasy,
        Money::from_cents(1000),
        "",
        5,
    );
    let mut customer = Customer::new(CustomerId::new(1), "Reader", "reader@example.com");
    customer.enable_loyalty();

    let mut cart = Cart::new(CartId::new(1), customer.id);
    for _ in 0..5 {
        cart.add_item(&mut book, 1).unwrap();
    }
    let order = Order::new(OrderId::new(1), customer, cart);

    // 50 × 0.9 × 0.8 × 1.08
    assert_eq!(amount(order.total_amount()), dec!(38.88));

    let invoice = &order.invoices()[0];
    assert_eq!(amount(invoice.discount_amount()), dec!(11.664));
    assert_eq!(amount(invoice.vat_amount()), dec!(2.17728));
    assert_eq!(amount(invoice.final_total()), dec!(29.39328));
}

#[test]
fn bulk_counts_lines_not_units() {
    let mut book = EBook::new(
        ItemId::new(10),
        "Atlas",
        "Cartographer",
        date(2018, 1, 1),
        Genre::NonFiction,
        Money::from_cents(1000),
        "",
        100,
    );
    let customer = Customer::new(CustomerId::new(1), "Reader", "reader@example.com");

    let mut cart = Cart::new(CartId::new(1), customer.id);
    cart.add_item(&mut book, 50).unwrap();
    let order = Order::new(OrderId::new(1), customer, cart);

    // 500 × 1.08, no bulk discount for one big line
    assert_eq!(amount(order.total_amount()), dec!(540));
}

#[test]
fn empty_cart_prices_to_zero_everywhere() {
    let mut customer = Customer::new(CustomerId::new(1), "Reader", "reader@example.com");
    customer.enable_loyalty();
    let order = Order::new(OrderId::new(1), customer, Cart::new(CartId::new(1), CustomerId::new(1)));

    let invoice = &order.invoices()[0];
    assert!(order.total_amount().is_zero());
    assert!(invoice.subtotal().is_zero());
    assert!(invoice.discount_amount().is_zero());
    assert!(invoice.vat_amount().is_zero());
    assert!(invoice.final_total().is_zero());
}

#[test]
fn zero_quantity_line_counts_toward_bulk() {
    let mut book = EBook::new(
        ItemId::new(10),
        "Pocket Guide",
        "Editor",
        date(2020, 5, 5),
        Genre::Education,
        Money::from_cents(1000),
        "",
        4,
    );
    let customer = Customer::new(CustomerId::new(1), "Reader", "reader@example.com");

    let mut cart = Cart::new(CartId::new(1), customer.id);
    for _ in 0..4 {
        cart.add_item(&mut book, 1).unwrap();
    }
    // Stock is now 0; taking zero units still succeeds and appends a line.
    assert_eq!(cart.add_item(&mut book, 0).unwrap().quantity, 0);
    assert_eq!(cart.line_count(), 5);
    assert_eq!(cart.total_quantity(), 4);
    assert_eq!(book.stock_quantity(), 0);

    let order = Order::new(OrderId::new(1), customer, cart);

    // 40 × 0.8 × 1.08
    assert_eq!(amount(order.total_amount()), dec!(34.56));
    let invoice = &order.invoices()[0];
    assert_eq!(amount(invoice.discount_amount()), dec!(6.912));
    assert_eq!(amount(invoice.vat_amount()), dec!(2.21184));
    assert_eq!(amount(invoice.final_total()), dec!(29.85984));
}
