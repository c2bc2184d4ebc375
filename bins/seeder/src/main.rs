//! Demo data seeder for Stockbook development.
//!
//! Seeds a small catalog (items, customers, suppliers) plus a few orders and
//! purchases so the inventory report has something to show. Runs through the
//! same repositories as the API, so stock is moved by the ledger and never
//! written directly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stockbook_core::catalog::{Item, NewItem, PartyDetails};
use stockbook_core::lifecycle::{CreateOrder, CreatePurchase};
use stockbook_db::{
    CustomerRepository, ItemRepository, OrderRepository, PurchaseRepository, SupplierRepository,
};
use stockbook_shared::{AppConfig, types::PageRequest};

const ITEMS: &[(&str, &str, i32, Decimal)] = &[
    ("Widget", "Standard blue widget", 40, dec!(5.00)),
    ("Gizmo", "Pocket gizmo", 12, dec!(12.50)),
    ("Sprocket", "Steel sprocket, 24 teeth", 3, dec!(2.75)),
    ("Flange", "Galvanised flange", 0, dec!(8.40)),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Acme Retail", "orders@acme.example"),
    ("Bluebird Stores", "buying@bluebird.example"),
];

const SUPPLIERS: &[(&str, &str)] = &[
    ("Northwind Components", "sales@northwind.example"),
    ("Contoso Metals", "trade@contoso.example"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    println!("Connecting to database...");
    let db = stockbook_db::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let items = ItemRepository::new(db.clone());
    let existing = items.list_items(PageRequest::new(1, 1)).await?;
    if existing.meta.total > 0 {
        println!("  Catalog already has {} item(s), skipping...", existing.meta.total);
        return Ok(());
    }

    println!("Seeding items...");
    let mut seeded: Vec<Item> = Vec::with_capacity(ITEMS.len());
    for &(name, description, quantity, price) in ITEMS {
        let item = items
            .create_item(NewItem {
                name: name.to_string(),
                description: Some(description.to_string()),
                quantity,
                price,
            })
            .await
            .with_context(|| format!("failed to seed item {name}"))?;
        println!("  {} ({} on hand at {})", item.name, item.quantity, item.price);
        seeded.push(item);
    }

    println!("Seeding customers...");
    let customers = CustomerRepository::new(db.clone());
    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for &(name, email) in CUSTOMERS {
        let customer = customers
            .create_customer(PartyDetails {
                name: name.to_string(),
                email: Some(email.to_string()),
                ..PartyDetails::default()
            })
            .await
            .with_context(|| format!("failed to seed customer {name}"))?;
        customer_ids.push(customer.id);
    }

    println!("Seeding suppliers...");
    let suppliers = SupplierRepository::new(db.clone());
    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for &(name, email) in SUPPLIERS {
        let supplier = suppliers
            .create_supplier(PartyDetails {
                name: name.to_string(),
                email: Some(email.to_string()),
                ..PartyDetails::default()
            })
            .await
            .with_context(|| format!("failed to seed supplier {name}"))?;
        supplier_ids.push(supplier.id);
    }

    println!("Seeding orders and purchases...");
    let orders = OrderRepository::new(db.clone());
    let purchases = PurchaseRepository::new(db.clone());

    for (n, (item, customer_id)) in seeded.iter().zip(customer_ids.iter().cycle()).take(2).enumerate() {
        let quantity = i32::try_from(n + 2).unwrap_or(1);
        orders
            .create_order(CreateOrder {
                item_id: item.id,
                quantity,
                customer_id: Some(*customer_id),
            })
            .await
            .with_context(|| format!("failed to seed order for {}", item.name))?;
    }

    for (item, supplier_id) in seeded.iter().skip(2).zip(supplier_ids.iter()) {
        purchases
            .create_purchase(CreatePurchase {
                item_id: item.id,
                quantity: 10,
                supplier_id: Some(*supplier_id),
            })
            .await
            .with_context(|| format!("failed to seed purchase for {}", item.name))?;
    }

    println!("Seeding complete!");
    Ok(())
}
