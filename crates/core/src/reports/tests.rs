//! Tests for the inventory report.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stockbook_shared::types::{Money, OrderId, PurchaseId};

use super::service::ReportService;
use crate::catalog::{Item, NewItem};
use crate::lifecycle::{Order, Purchase};

fn item(name: &str, quantity: i32, price: Decimal) -> Item {
    Item::create(
        NewItem {
            name: name.to_string(),
            description: None,
            quantity,
            price,
        },
        Utc::now(),
    )
    .unwrap()
}

fn order(item: &Item, quantity: i32, minutes_ago: i64) -> Order {
    Order {
        id: OrderId::new(),
        item_id: item.id,
        customer_id: None,
        quantity,
        order_date: Utc::now() - Duration::minutes(minutes_ago),
        invoiced: false,
    }
}

fn purchase(item: &Item, quantity: i32, minutes_ago: i64) -> Purchase {
    Purchase {
        id: PurchaseId::new(),
        item_id: item.id,
        supplier_id: None,
        quantity,
        purchase_date: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[test]
fn test_totals() {
    let widget = item("Widget", 6, dec!(5.00));
    let gadget = item("Gadget", 10, dec!(2.50));
    let orders = vec![order(&widget, 4, 10), order(&gadget, 2, 5)];
    let purchases = vec![purchase(&widget, 20, 30)];

    let report =
        ReportService::inventory_report(&[widget, gadget], &orders, &purchases, 5, 5);

    assert_eq!(report.item_count, 2);
    assert_eq!(report.order_count, 2);
    assert_eq!(report.purchase_count, 1);
    assert_eq!(report.stock_value, Money::new(dec!(55.00)));
    assert_eq!(report.sales_total, Money::new(dec!(25.00)));
    assert_eq!(report.purchases_total, Money::new(dec!(100.00)));
}

#[test]
fn test_low_stock_is_below_threshold_ascending() {
    let a = item("A", 4, dec!(1));
    let b = item("B", 0, dec!(1));
    let c = item("C", 5, dec!(1));

    let report = ReportService::inventory_report(&[a, b, c], &[], &[], 5, 5);

    let names: Vec<&str> = report.low_stock.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
    assert_eq!(report.low_stock_threshold, 5);
}

#[test]
fn test_recent_activity_newest_first_and_limited() {
    let widget = item("Widget", 100, dec!(1.00));
    let orders: Vec<Order> = (0..8).map(|i| order(&widget, 1, i * 10)).collect();
    let purchases = vec![purchase(&widget, 3, 60), purchase(&widget, 7, 1)];

    let report =
        ReportService::inventory_report(&[widget], &orders, &purchases, 5, 5);

    assert_eq!(report.recent_orders.len(), 5);
    let expected: Vec<OrderId> = orders.iter().take(5).map(|o| o.id).collect();
    let actual: Vec<OrderId> = report.recent_orders.iter().map(|r| r.order.id).collect();
    assert_eq!(actual, expected);
    assert_eq!(report.recent_orders[0].item_name, "Widget");

    assert_eq!(report.recent_purchases[0].purchase.quantity, 7);
    assert_eq!(report.recent_purchases[0].total, Money::new(dec!(7.00)));
}

#[test]
fn test_empty_report() {
    let report = ReportService::inventory_report(&[], &[], &[], 5, 5);
    assert_eq!(report.item_count, 0);
    assert_eq!(report.stock_value, Money::ZERO);
    assert!(report.low_stock.is_empty());
    assert!(report.recent_orders.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Stock value equals the sum of quantity × price in cents.
    #[test]
    fn prop_stock_value_matches_cents(
        specs in prop::collection::vec((0i32..1000, 0i64..100_000), 0..20),
    ) {
        let items: Vec<Item> = specs
            .iter()
            .map(|&(quantity, cents)| item("X", quantity, Decimal::new(cents, 2)))
            .collect();
        let expected: i64 = specs.iter().map(|&(q, c)| i64::from(q) * c).sum();

        let report = ReportService::inventory_report(&items, &[], &[], 5, 5);
        prop_assert_eq!(report.stock_value, Money::new(Decimal::new(expected, 2)));
    }
}
