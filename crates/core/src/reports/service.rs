//! Report generation service.

use std::collections::HashMap;

use stockbook_shared::types::{ItemId, Money};

use super::types::{InventoryReport, LowStockItem, RecentOrder, RecentPurchase};
use crate::catalog::Item;
use crate::lifecycle::{Order, Purchase};

/// Service for generating inventory reports.
pub struct ReportService;

impl ReportService {
    /// Builds the inventory overview.
    ///
    /// Orders and purchases referencing an item missing from `items` are
    /// counted but contribute nothing to the money totals. Totals saturate
    /// rather than overflow.
    #[must_use]
    pub fn inventory_report(
        items: &[Item],
        orders: &[Order],
        purchases: &[Purchase],
        low_stock_threshold: i32,
        recent_limit: usize,
    ) -> InventoryReport {
        let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();
        let value_of = |item_id: ItemId, quantity: i32| {
            by_id
                .get(&item_id)
                .map_or(Money::ZERO, |item| item.price.times(i64::from(quantity)))
        };
        let name_of = |item_id: ItemId| {
            by_id
                .get(&item_id)
                .map(|item| item.name.clone())
                .unwrap_or_default()
        };

        let stock_value = items.iter().map(Item::stock_value).sum();
        let sales_total = orders
            .iter()
            .map(|o| value_of(o.item_id, o.quantity))
            .sum();
        let purchases_total = purchases
            .iter()
            .map(|p| value_of(p.item_id, p.quantity))
            .sum();

        let mut low_stock: Vec<LowStockItem> = items
            .iter()
            .filter(|item| item.quantity < low_stock_threshold)
            .map(|item| LowStockItem {
                item_id: item.id,
                name: item.name.clone(),
                quantity: item.quantity,
            })
            .collect();
        low_stock.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.name.cmp(&b.name)));

        let mut newest_orders: Vec<&Order> = orders.iter().collect();
        newest_orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));
        let recent_orders = newest_orders
            .into_iter()
            .take(recent_limit)
            .map(|order| RecentOrder {
                order: *order,
                item_name: name_of(order.item_id),
                total: value_of(order.item_id, order.quantity),
            })
            .collect();

        let mut newest_purchases: Vec<&Purchase> = purchases.iter().collect();
        newest_purchases
            .sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date).then(b.id.cmp(&a.id)));
        let recent_purchases = newest_purchases
            .into_iter()
            .take(recent_limit)
            .map(|purchase| RecentPurchase {
                purchase: *purchase,
                item_name: name_of(purchase.item_id),
                total: value_of(purchase.item_id, purchase.quantity),
            })
            .collect();

        InventoryReport {
            item_count: items.len() as u64,
            order_count: orders.len() as u64,
            purchase_count: purchases.len() as u64,
            stock_value,
            sales_total,
            purchases_total,
            low_stock_threshold,
            low_stock,
            recent_orders,
            recent_purchases,
        }
    }
}
