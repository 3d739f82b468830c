//! Inspect and manage stored orders.

use cardpress_common::config::AppConfig;
use cardpress_order_store::OrderStore;

use super::parse_status;

fn store() -> OrderStore {
    let config = AppConfig::load();
    OrderStore::new(config.order_api_url, config.orders_file)
}

pub async fn list() -> anyhow::Result<()> {
    let orders = store().list().await?;
    if orders.is_empty() {
        println!("No orders found.");
        return Ok(());
    }

    println!("{} order(s):", orders.len());
    for order in orders {
        println!(
            "  {:<10} {:<26} {:<4} {:>3} cards  {:>8.2}  {:?}",
            order.id,
            order.customer.last_name,
            order.game.short_code(),
            order.deck.len(),
            order.total_price,
            order.status,
        );
    }
    Ok(())
}

pub fn update_status(id: &str, status: &str) -> anyhow::Result<()> {
    let status = parse_status(status)?;
    let found = store().update_status(id, status, None)?;
    if found {
        println!("Order {id} set to {status:?}");
    } else {
        println!("Order {id} not found in the local store.");
    }
    Ok(())
}
