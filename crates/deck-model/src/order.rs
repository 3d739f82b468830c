//! Customer orders as consumed by the export pipeline.
//!
//! The core only reads orders: an `Order` arrives fully populated from the
//! order store (or a file) and drives one export run. Creating, validating,
//! and persisting orders belongs to the order-service collaborator.

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardBack, CardStyle};
use crate::catalog::GameKind;

/// Production status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Processing,
    Issue,
    Done,
    Cancelled,
    Deleted,
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::catalog::UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "processing" => Ok(OrderStatus::Processing),
            "issue" => Ok(OrderStatus::Issue),
            "done" => Ok(OrderStatus::Done),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "deleted" => Ok(OrderStatus::Deleted),
            other => Err(crate::catalog::UnknownTag {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// How the finished deck ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Zasilkovna,
    Posta,
    Ppl,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Transfer,
}

/// Customer contact and delivery details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub note: String,
}

/// A complete customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id in the form `ORD-{number}`.
    pub id: String,

    /// Creation timestamp, RFC 3339.
    pub date: String,

    pub customer: CustomerDetails,

    #[serde(rename = "gameType")]
    pub game: GameKind,

    #[serde(rename = "cardStyle")]
    pub style: CardStyle,

    /// The full card set in canonical deck order.
    pub deck: Vec<Card>,

    /// The shared back design.
    #[serde(rename = "backConfig")]
    pub back: CardBack,

    pub total_price: f64,

    pub status: OrderStatus,

    /// RFC 3339 timestamp of the move to trash, if any.
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Order {
    /// Create a new order stamped with the current time.
    pub fn new(
        number: u64,
        customer: CustomerDetails,
        game: GameKind,
        style: CardStyle,
        deck: Vec<Card>,
        back: CardBack,
        total_price: f64,
    ) -> Self {
        Self {
            id: format!("ORD-{number}"),
            date: chrono::Utc::now().to_rfc3339(),
            customer,
            game,
            style,
            deck,
            back,
            total_price,
            status: OrderStatus::New,
            deleted_at: None,
        }
    }

    /// Numeric part of the order id (`ORD-1042` -> `1042`).
    pub fn numeric_id(&self) -> &str {
        self.id.strip_prefix("ORD-").unwrap_or(&self.id)
    }

    /// Base name of the production archive:
    /// `MC{id}_{surname}_{game short code}_1ks`.
    pub fn archive_stem(&self) -> String {
        let surname = if self.customer.last_name.is_empty() {
            "Zakaznik"
        } else {
            self.customer.last_name.as_str()
        };
        format!(
            "MC{}_{}_{}_1ks",
            self.numeric_id(),
            surname,
            self.game.short_code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::generate_deck;

    fn sample_customer() -> CustomerDetails {
        CustomerDetails {
            first_name: "Jan".to_string(),
            last_name: "Novák".to_string(),
            email: "jan@example.com".to_string(),
            phone: "+420123456789".to_string(),
            street: "Dlouhá 12".to_string(),
            city: "Praha".to_string(),
            zip: "11000".to_string(),
            delivery_method: DeliveryMethod::Zasilkovna,
            payment_method: PaymentMethod::Card,
            note: String::new(),
        }
    }

    fn sample_order() -> Order {
        Order {
            id: "ORD-1042".to_string(),
            date: "2026-05-01T10:30:00Z".to_string(),
            customer: sample_customer(),
            game: GameKind::PokerStandard,
            style: CardStyle::BackAndFace,
            deck: generate_deck(
                "https://cdn.example.com/karty",
                GameKind::PokerStandard,
                CardStyle::BackAndFace,
            ),
            back: CardBack::default(),
            total_price: 890.0,
            status: OrderStatus::New,
            deleted_at: None,
        }
    }

    #[test]
    fn test_archive_stem() {
        let order = sample_order();
        assert_eq!(order.archive_stem(), "MC1042_Novák_PST_1ks");
    }

    #[test]
    fn test_archive_stem_falls_back_for_missing_surname() {
        let mut order = sample_order();
        order.customer.last_name = String::new();
        order.game = GameKind::Canasta;
        assert_eq!(order.archive_stem(), "MC1042_Zakaznik_CAN_1ks");
    }

    #[test]
    fn test_numeric_id_tolerates_bare_ids() {
        let mut order = sample_order();
        order.id = "77".to_string();
        assert_eq!(order.numeric_id(), "77");
    }

    #[test]
    fn test_order_wire_format_round_trips() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"gameType\":\"poker-standard\""));
        assert!(json.contains("\"cardStyle\":\"back-face\""));
        assert!(json.contains("\"backConfig\""));
        assert!(json.contains("\"totalPrice\":890.0"));
        assert!(json.contains("\"status\":\"new\""));

        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.deck.len(), 54);
        assert_eq!(parsed.status, OrderStatus::New);
        assert_eq!(parsed.customer.last_name, "Novák");
    }
}
