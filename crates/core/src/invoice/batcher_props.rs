//! Property-based tests for InvoiceBatcher.
//!
//! - Grand total equals the sum of `quantity * price` over included orders
//! - Every requested id is either a line or a skip, never both, never lost

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockbook_shared::types::{ItemId, Money, OrderId};

use super::batcher::InvoiceBatcher;
use super::types::{CreateInvoice, InvoiceCandidate};
use crate::lifecycle::Order;

/// (quantity, price in cents, invoiced, exists)
fn order_spec() -> impl Strategy<Value = (i32, i64, bool, bool)> {
    (1i32..100, 0i64..100_000, any::<bool>(), any::<bool>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_totals_and_partition(specs in prop::collection::vec(order_spec(), 1..20)) {
        let mut stored = HashMap::new();
        let mut requested = Vec::new();
        let mut expected_cents = 0i64;
        let mut expected_lines = 0usize;

        for (quantity, cents, invoiced, exists) in specs {
            let id = OrderId::new();
            requested.push(id);
            if !exists {
                continue;
            }
            if !invoiced {
                expected_cents += cents * i64::from(quantity);
                expected_lines += 1;
            }
            stored.insert(id, InvoiceCandidate {
                order: Order {
                    id,
                    item_id: ItemId::new(),
                    customer_id: None,
                    quantity,
                    order_date: Utc::now(),
                    invoiced,
                },
                item_name: "Widget".to_string(),
                unit_price: Money::new(Decimal::new(cents, 2)),
            });
        }

        let cmd = CreateInvoice {
            order_ids: requested.clone(),
            reference: "INV-P".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            billed_to: String::new(),
        };
        let result = InvoiceBatcher::plan(&cmd, |id| stored.get(&id).cloned()).unwrap();

        prop_assert_eq!(result.grand_total, Money::new(Decimal::new(expected_cents, 2)));
        prop_assert_eq!(result.lines.len(), expected_lines);
        prop_assert_eq!(result.lines.len() + result.skipped.len(), requested.len());

        for line in &result.lines {
            prop_assert!(!result.skipped.iter().any(|s| s.order_id == line.order_id));
        }
    }

    #[test]
    fn prop_second_pass_invoices_nothing(quantities in prop::collection::vec(1i32..50, 1..10)) {
        let mut stored: HashMap<OrderId, InvoiceCandidate> = quantities
            .iter()
            .map(|&quantity| {
                let id = OrderId::new();
                (id, InvoiceCandidate {
                    order: Order {
                        id,
                        item_id: ItemId::new(),
                        customer_id: None,
                        quantity,
                        order_date: Utc::now(),
                        invoiced: false,
                    },
                    item_name: "Widget".to_string(),
                    unit_price: Money::new(Decimal::new(500, 2)),
                })
            })
            .collect();

        let cmd = CreateInvoice {
            order_ids: stored.keys().copied().collect(),
            reference: "INV-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            billed_to: String::new(),
        };

        let first = InvoiceBatcher::plan(&cmd, |id| stored.get(&id).cloned()).unwrap();
        prop_assert_eq!(first.lines.len(), quantities.len());

        for id in first.invoiced_order_ids() {
            if let Some(candidate) = stored.get_mut(&id) {
                candidate.order.invoiced = true;
            }
        }

        let second = InvoiceBatcher::plan(&cmd, |id| stored.get(&id).cloned()).unwrap();
        prop_assert!(second.is_empty());
        prop_assert_eq!(second.grand_total, Money::ZERO);
        prop_assert_eq!(second.skipped.len(), quantities.len());
    }
}
