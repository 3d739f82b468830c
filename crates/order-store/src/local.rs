//! Local durable order store: a JSON file of orders, used whenever the
//! remote service is unreachable and as the only place status updates
//! currently persist.

use std::path::PathBuf;

use cardpress_common::error::{CardpressError, CardpressResult};
use cardpress_deck_model::{Order, OrderStatus};

/// Read-modify-write JSON file store.
#[derive(Debug, Clone)]
pub struct LocalOrderStore {
    path: PathBuf,
}

impl LocalOrderStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// All locally stored orders; an absent file is an empty store.
    pub fn load(&self) -> CardpressResult<Vec<Order>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let orders = serde_json::from_str(&content)
            .map_err(|e| CardpressError::order(format!("corrupt order store: {e}")))?;
        Ok(orders)
    }

    /// Insert or replace an order, newest first.
    pub fn upsert(&self, order: &Order) -> CardpressResult<()> {
        let mut orders = self.load()?;
        orders.retain(|o| o.id != order.id);
        orders.insert(0, order.clone());
        self.save(&orders)
    }

    /// Update one order's status in place. Returns whether it was found.
    pub fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        deleted_at: Option<String>,
    ) -> CardpressResult<bool> {
        let mut orders = self.load()?;
        let mut found = false;
        for order in orders.iter_mut() {
            if order.id == order_id {
                order.status = status;
                order.deleted_at = deleted_at.clone();
                found = true;
            }
        }
        if found {
            self.save(&orders)?;
        }
        Ok(found)
    }

    fn save(&self, orders: &[Order]) -> CardpressResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(orders)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
