//! Marking orders from an invoice plan that another invoice has overtaken.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::TransactionTrait;
use stockbook_core::invoice::{CreateInvoice, SkipReason, SkippedOrder};
use stockbook_core::lifecycle::{CancelOrder, CreateOrder, Order};
use stockbook_shared::types::{ItemId, OrderId};

use super::{mark_invoiced_in, plan_invoice_in, InvoiceRepository};
use crate::test_support::{create_item, setup_db};
use crate::OrderRepository;

fn invoice(order_ids: Vec<OrderId>, reference: &str) -> CreateInvoice {
    CreateInvoice {
        order_ids,
        reference: reference.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        billed_to: "Acme".to_string(),
    }
}

async fn place(orders: &OrderRepository, item_id: ItemId) -> Order {
    orders
        .create_order(CreateOrder {
            item_id,
            quantity: 1,
            customer_id: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_stale_plan_is_not_half_applied() {
    let db = setup_db().await;
    let item = create_item(&db, 10, dec!(5.00)).await;
    let orders = OrderRepository::new(db.clone());
    let invoices = InvoiceRepository::new(db.clone());
    let first = place(&orders, item.id).await;
    let second = place(&orders, item.id).await;

    let stale = plan_invoice_in(&db, &invoice(vec![first.id, second.id], "INV-A"))
        .await
        .unwrap();
    assert_eq!(stale.lines.len(), 2);

    invoices
        .create_invoice(invoice(vec![first.id], "INV-B"))
        .await
        .unwrap();

    let txn = db.begin().await.unwrap();
    let err = mark_invoiced_in(&txn, &stale).await.unwrap_err();
    txn.rollback().await.unwrap();

    assert!(err.is_retryable());
    assert!(!orders.get_order(second.id).await.unwrap().invoiced);

    let retried = invoices
        .create_invoice(invoice(vec![first.id, second.id], "INV-A"))
        .await
        .unwrap();
    assert_eq!(retried.invoiced_order_ids(), vec![second.id]);
    assert_eq!(
        retried.skipped,
        vec![SkippedOrder {
            order_id: first.id,
            reason: SkipReason::AlreadyInvoiced,
        }]
    );
}

#[tokio::test]
async fn test_stale_plan_after_cancel_conflicts() {
    let db = setup_db().await;
    let item = create_item(&db, 10, dec!(5.00)).await;
    let orders = OrderRepository::new(db.clone());
    let order = place(&orders, item.id).await;

    let stale = plan_invoice_in(&db, &invoice(vec![order.id], "INV-A"))
        .await
        .unwrap();
    orders
        .cancel_order(CancelOrder { order_id: order.id })
        .await
        .unwrap();

    let txn = db.begin().await.unwrap();
    let err = mark_invoiced_in(&txn, &stale).await.unwrap_err();
    txn.rollback().await.unwrap();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_empty_plan_marks_nothing() {
    let db = setup_db().await;
    let plan = plan_invoice_in(&db, &invoice(vec![OrderId::new()], "INV-A"))
        .await
        .unwrap();
    assert!(plan.is_empty());

    let txn = db.begin().await.unwrap();
    mark_invoiced_in(&txn, &plan).await.unwrap();
    txn.commit().await.unwrap();
}
