//! Concurrent ledger tests.
//!
//! These run against a file-backed database with several pooled connections,
//! so transactions genuinely overlap and losers go through the retry path.
//! Many sales racing for the same item must never oversell it, and two
//! commands racing for the same order must leave exactly one winner.

mod common;

use std::collections::HashSet;

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal_macros::dec;
use stockbook_core::invoice::{CreateInvoice, InvoiceResult, SkipReason};
use stockbook_core::lifecycle::{CancelOrder, CreateOrder, CreatePurchase, OrderFilter};
use stockbook_core::{EntityKind, InventoryError};
use stockbook_db::{InvoiceRepository, OrderRepository, PurchaseRepository};
use stockbook_shared::types::{ItemId, OrderId, PageRequest};

use common::{create_item, quantity_of, setup_shared_db};

const CONNECTIONS: u32 = 8;
const ATTEMPTS: u32 = 50;

fn invoice(order_ids: Vec<OrderId>, reference: &str) -> CreateInvoice {
    CreateInvoice {
        order_ids,
        reference: reference.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        billed_to: "Acme Retail".to_string(),
    }
}

async fn place_orders(orders: &OrderRepository, item_id: ItemId, count: usize) -> Vec<OrderId> {
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let order = orders
            .create_order(CreateOrder {
                item_id,
                quantity: 2,
                customer_id: None,
            })
            .await
            .unwrap();
        placed.push(order.id);
    }
    placed
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let shared = setup_shared_db(CONNECTIONS).await;
    let db = &shared.db;
    let item = create_item(db, "Widget", 10, dec!(5.00)).await;
    let orders = OrderRepository::new(db.clone()).with_max_attempts(ATTEMPTS);

    let attempts = (0..20).map(|_| {
        let orders = orders.clone();
        let item_id = item.id;
        tokio::spawn(async move {
            orders
                .create_order(CreateOrder {
                    item_id,
                    quantity: 1,
                    customer_id: None,
                })
                .await
        })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(InventoryError::InsufficientStock { .. })))
        .count();

    assert_eq!(succeeded, 10, "{results:?}");
    assert_eq!(rejected, 10, "{results:?}");
    assert_eq!(quantity_of(db, &item).await, 0);
}

#[tokio::test]
async fn test_concurrent_mixed_operations_conserve_stock() {
    let shared = setup_shared_db(CONNECTIONS).await;
    let db = &shared.db;
    let item = create_item(db, "Widget", 50, dec!(1.00)).await;
    let orders = OrderRepository::new(db.clone()).with_max_attempts(ATTEMPTS);
    let purchases = PurchaseRepository::new(db.clone()).with_max_attempts(ATTEMPTS);

    let placed = place_orders(&orders, item.id, 10).await;
    assert_eq!(quantity_of(db, &item).await, 30);

    let cancels = placed.iter().take(5).map(|&order_id| {
        let orders = orders.clone();
        tokio::spawn(async move { orders.cancel_order(CancelOrder { order_id }).await })
    });
    let restocks = (0..5).map(|_| {
        let purchases = purchases.clone();
        let item_id = item.id;
        tokio::spawn(async move {
            purchases
                .create_purchase(CreatePurchase {
                    item_id,
                    quantity: 3,
                    supplier_id: None,
                })
                .await
                .map(|_| ())
        })
    });

    let (cancelled, restocked) = futures::join!(join_all(cancels), join_all(restocks));
    for result in cancelled {
        result.expect("task panicked").unwrap();
    }
    for result in restocked {
        result.expect("task panicked").unwrap();
    }

    // 50 - 10×2 + 5×2 restored + 5×3 purchased
    assert_eq!(quantity_of(db, &item).await, 55);
}

#[tokio::test]
async fn test_double_cancel_race_credits_once() {
    let shared = setup_shared_db(CONNECTIONS).await;
    let db = &shared.db;
    let item = create_item(db, "Widget", 10, dec!(5.00)).await;
    let orders = OrderRepository::new(db.clone()).with_max_attempts(ATTEMPTS);
    let order_id = place_orders(&orders, item.id, 1).await[0];

    let racers = (0..2).map(|_| {
        let orders = orders.clone();
        tokio::spawn(async move { orders.cancel_order(CancelOrder { order_id }).await })
    });
    let results: Vec<_> = join_all(racers)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1, "{results:?}");
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(InventoryError::NotFound { entity: EntityKind::Order, .. }))));
    assert_eq!(quantity_of(db, &item).await, 10);
}

#[tokio::test]
async fn test_concurrent_invoices_mark_each_order_once() {
    let shared = setup_shared_db(CONNECTIONS).await;
    let db = &shared.db;
    let item = create_item(db, "Widget", 20, dec!(5.00)).await;
    let orders = OrderRepository::new(db.clone()).with_max_attempts(ATTEMPTS);
    let invoices = InvoiceRepository::new(db.clone()).with_max_attempts(ATTEMPTS);
    let placed = place_orders(&orders, item.id, 6).await;

    let racers = ["INV-A", "INV-B"].map(|reference| {
        let invoices = invoices.clone();
        let order_ids = placed.clone();
        tokio::spawn(async move { invoices.create_invoice(invoice(order_ids, reference)).await })
    });
    let results: Vec<InvoiceResult> = join_all(racers)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").unwrap())
        .collect();

    let mut billed = HashSet::new();
    for result in &results {
        for order_id in result.invoiced_order_ids() {
            assert!(billed.insert(order_id), "order {order_id} billed twice");
        }
    }
    assert_eq!(billed, placed.iter().copied().collect::<HashSet<_>>());

    // Whatever one invoice billed, the other reports as already invoiced.
    for (result, other) in [(&results[0], &results[1]), (&results[1], &results[0])] {
        for order_id in other.invoiced_order_ids() {
            assert!(result
                .skipped
                .iter()
                .any(|s| s.order_id == order_id && s.reason == SkipReason::AlreadyInvoiced));
        }
    }

    let invoiced = orders
        .list_orders(
            OrderFilter {
                invoiced: Some(true),
                ..OrderFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(invoiced.meta.total, 6);
    assert_eq!(quantity_of(db, &item).await, 8);
}

#[tokio::test]
async fn test_cancel_and_invoice_race_has_one_winner() {
    let shared = setup_shared_db(CONNECTIONS).await;
    let db = &shared.db;
    let item = create_item(db, "Widget", 10, dec!(5.00)).await;
    let orders = OrderRepository::new(db.clone()).with_max_attempts(ATTEMPTS);
    let invoices = InvoiceRepository::new(db.clone()).with_max_attempts(ATTEMPTS);
    let order_id = place_orders(&orders, item.id, 1).await[0];

    let cancel = {
        let orders = orders.clone();
        tokio::spawn(async move { orders.cancel_order(CancelOrder { order_id }).await })
    };
    let bill = {
        let invoices = invoices.clone();
        tokio::spawn(async move { invoices.create_invoice(invoice(vec![order_id], "INV-1")).await })
    };
    let (cancelled, billed) = futures::join!(cancel, bill);
    let cancelled = cancelled.expect("task panicked");
    let billed = billed.expect("task panicked").unwrap();

    if cancelled.is_ok() {
        assert!(billed.is_empty());
        assert_eq!(billed.skipped[0].reason, SkipReason::NotFound);
        assert_eq!(quantity_of(db, &item).await, 10);
    } else {
        assert_eq!(cancelled.unwrap_err(), InventoryError::AlreadyInvoiced(order_id));
        assert_eq!(billed.invoiced_order_ids(), vec![order_id]);
        assert_eq!(quantity_of(db, &item).await, 8);
    }
}
