//! Property-based tests for the stock ledger.
//!
//! - Quantity never goes negative across any sequence of sales, restocks and
//!   cancellations.
//! - Conservation: final = initial - open sales + restocks.

use proptest::prelude::*;
use stockbook_shared::types::ItemId;

use super::ledger::{StockLedger, StockMovement};
use crate::error::InventoryError;

#[derive(Debug, Clone)]
enum Command {
    Sell(i32),
    Restock(i32),
    /// Cancel the n-th open sale (modulo the number of open sales).
    Cancel(usize),
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        (1i32..50).prop_map(Command::Sell),
        (1i32..50).prop_map(Command::Restock),
        any::<usize>().prop_map(Command::Cancel),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_quantity_never_negative_and_conserved(
        initial in 0i32..100,
        commands in prop::collection::vec(command_strategy(), 0..60),
    ) {
        let item = ItemId::new();
        let mut quantity = initial;
        let mut open_sales: Vec<i32> = Vec::new();
        let mut restocked = 0i32;

        for command in commands {
            let movement = match &command {
                Command::Sell(q) => StockMovement::Sale(*q),
                Command::Restock(q) => StockMovement::Restock(*q),
                Command::Cancel(n) => {
                    if open_sales.is_empty() {
                        continue;
                    }
                    StockMovement::SaleReversal(open_sales[n % open_sales.len()])
                }
            };

            match StockLedger::apply(item, quantity, movement) {
                Ok(next) => {
                    prop_assert!(next >= 0);
                    quantity = next;
                    match command {
                        Command::Sell(q) => open_sales.push(q),
                        Command::Restock(q) => restocked += q,
                        Command::Cancel(n) => {
                            let index = n % open_sales.len();
                            open_sales.remove(index);
                        }
                    }
                }
                Err(InventoryError::InsufficientStock { requested, available, .. }) => {
                    prop_assert!(movement.delta() < 0);
                    prop_assert_eq!(available, quantity);
                    prop_assert!(requested > available);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }

        let open: i32 = open_sales.iter().sum();
        prop_assert_eq!(quantity, initial - open + restocked);
    }

    #[test]
    fn prop_rejected_delta_reports_current_quantity(
        current in 0i32..1000,
        excess in 1i32..1000,
    ) {
        let item = ItemId::new();
        let requested = current + excess;
        let err = StockLedger::apply(item, current, StockMovement::Sale(requested)).unwrap_err();
        prop_assert_eq!(
            err,
            InventoryError::InsufficientStock { item_id: item, requested, available: current }
        );
    }

    #[test]
    fn prop_increments_always_succeed(current in 0i32..1_000_000, quantity in 1i32..1_000_000) {
        let next = StockLedger::apply(ItemId::new(), current, StockMovement::Restock(quantity)).unwrap();
        prop_assert_eq!(next, current + quantity);
    }
}
