//! CardPress Order Store
//!
//! Client for the remote order service plus a local durable fallback.
//! The remote API is a collaborator, not part of the core: the export
//! pipeline only needs a fully-populated [`Order`] value and does not care
//! where it came from. Every operation tolerates network failure by
//! degrading to the local JSON store.

pub mod local;
pub mod remote;

use std::path::PathBuf;

use cardpress_common::error::CardpressResult;
use cardpress_deck_model::{Order, OrderStatus};

use crate::local::LocalOrderStore;
use crate::remote::RemoteOrderApi;

/// Where an order ended up after [`OrderStore::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDestination {
    Remote,
    LocalFallback,
}

/// Combined order store: remote API first, local JSON file as fallback.
pub struct OrderStore {
    remote: RemoteOrderApi,
    local: LocalOrderStore,
}

impl OrderStore {
    pub fn new(api_url: impl Into<String>, orders_file: PathBuf) -> Self {
        Self {
            remote: RemoteOrderApi::new(api_url),
            local: LocalOrderStore::new(orders_file),
        }
    }

    /// Persist a new order. Tries the remote service; on any transport or
    /// API failure the order is kept in the local fallback store instead.
    pub async fn create(&self, order: &Order) -> CardpressResult<SaveDestination> {
        match self.remote.create(order).await {
            Ok(()) => Ok(SaveDestination::Remote),
            Err(e) => {
                tracing::warn!(
                    order = %order.id,
                    error = %e,
                    "Order service unreachable, saving to local fallback"
                );
                self.local.upsert(order)?;
                Ok(SaveDestination::LocalFallback)
            }
        }
    }

    /// List all known orders: remote rows first, then local-only orders
    /// the service has never seen. Falls back to local contents entirely
    /// when the service is unreachable.
    pub async fn list(&self) -> CardpressResult<Vec<Order>> {
        let local = self.local.load()?;
        match self.remote.list().await {
            Ok(remote) => Ok(merge_orders(remote, local)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch orders, showing local data");
                Ok(local)
            }
        }
    }

    /// Update an order's production status in the local store. The remote
    /// API does not support status updates yet. Returns whether the order
    /// was found. Moving an order to trash stamps `deleted_at` unless the
    /// caller supplies its own timestamp.
    pub fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        deleted_at: Option<String>,
    ) -> CardpressResult<bool> {
        let deleted_at = if status == OrderStatus::Deleted {
            deleted_at.or_else(|| Some(chrono::Utc::now().to_rfc3339()))
        } else {
            deleted_at
        };
        self.local.update_status(order_id, status, deleted_at)
    }
}

/// Remote rows win; local orders the API does not know are appended.
fn merge_orders(remote: Vec<Order>, local: Vec<Order>) -> Vec<Order> {
    let known: std::collections::HashSet<String> =
        remote.iter().map(|o| o.id.clone()).collect();
    let mut merged = remote;
    merged.extend(local.into_iter().filter(|o| !known.contains(&o.id)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpress_deck_model::{
        generate_deck, CardBack, CardStyle, CustomerDetails, DeliveryMethod, GameKind,
        PaymentMethod,
    };

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            date: "2026-03-01T08:00:00Z".to_string(),
            customer: CustomerDetails {
                first_name: "Petr".to_string(),
                last_name: "Dvořák".to_string(),
                email: "petr@example.com".to_string(),
                phone: "+420601020304".to_string(),
                street: "Nová 1".to_string(),
                city: "Olomouc".to_string(),
                zip: "77900".to_string(),
                delivery_method: DeliveryMethod::Posta,
                payment_method: PaymentMethod::Card,
                note: String::new(),
            },
            game: GameKind::MariasSingle,
            style: CardStyle::BackOnly,
            deck: generate_deck(
                "https://cdn.example.com/karty",
                GameKind::MariasSingle,
                CardStyle::BackOnly,
            ),
            back: CardBack::default(),
            total_price: 490.0,
            status: cardpress_deck_model::OrderStatus::New,
            deleted_at: None,
        }
    }

    #[test]
    fn test_merge_prefers_remote_rows() {
        let mut remote_row = order("ORD-1");
        remote_row.total_price = 990.0;
        let local_row = order("ORD-1");
        let local_only = order("ORD-2");

        let merged = merge_orders(vec![remote_row], vec![local_row, local_only]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "ORD-1");
        assert_eq!(merged[0].total_price, 990.0);
        assert_eq!(merged[1].id, "ORD-2");
    }

    #[test]
    fn test_merge_keeps_remote_order_first() {
        let merged = merge_orders(
            vec![order("ORD-3"), order("ORD-4")],
            vec![order("ORD-5")],
        );
        let ids: Vec<_> = merged.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["ORD-3", "ORD-4", "ORD-5"]);
    }
}
