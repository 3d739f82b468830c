//! Remote order-service API client.
//!
//! The service is a plain JSON-over-POST endpoint: `{"action":"create",
//! ...order}` to store, GET to list. List rows use the service's column
//! names (`created_at`, `deck_data`, ...) and are mapped into [`Order`]
//! values here. Any transport or protocol failure surfaces as an error so
//! the caller can degrade to the local store.

use std::time::Duration;

use serde::Deserialize;

use cardpress_common::error::{CardpressError, CardpressResult};
use cardpress_deck_model::{Card, CardBack, CardStyle, CustomerDetails, GameKind, Order, OrderStatus};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Thin client for the remote order endpoint.
#[derive(Debug, Clone)]
pub struct RemoteOrderApi {
    client: reqwest::Client,
    api_url: String,
}

impl RemoteOrderApi {
    pub fn new(api_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Store a new order remotely.
    pub async fn create(&self, order: &Order) -> CardpressResult<()> {
        let mut payload = serde_json::to_value(order)?;
        if let Some(object) = payload.as_object_mut() {
            object.insert(
                "action".to_string(),
                serde_json::Value::String("create".to_string()),
            );
        }

        tracing::debug!(url = %self.api_url, order = %order.id, "Sending order");
        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CardpressError::order(format!("POST {}: {e}", self.api_url)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CardpressError::order(format!("reading response: {e}")))?;
        if !status.is_success() {
            return Err(CardpressError::order(format!(
                "order service returned HTTP {status}: {body}"
            )));
        }

        check_api_error(&body)
    }

    /// Fetch all orders the service knows about.
    pub async fn list(&self) -> CardpressResult<Vec<Order>> {
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| CardpressError::order(format!("GET {}: {e}", self.api_url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardpressError::order(format!(
                "order service returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CardpressError::order(format!("reading response: {e}")))?;
        parse_order_rows(&body)
    }
}

/// A successful response may still carry a logical API error.
fn check_api_error(body: &str) -> CardpressResult<()> {
    #[derive(Deserialize)]
    struct ApiStatus {
        status: Option<String>,
        message: Option<String>,
    }

    let parsed: ApiStatus = serde_json::from_str(body)
        .map_err(|e| CardpressError::order(format!("invalid JSON from order service: {e}")))?;
    if parsed.status.as_deref() == Some("error") {
        return Err(CardpressError::order(
            parsed.message.unwrap_or_else(|| "unknown API error".to_string()),
        ));
    }
    Ok(())
}

/// One row as the service stores it.
#[derive(Debug, Deserialize)]
struct ApiOrderRow {
    id: String,
    created_at: String,
    customer_data: CustomerDetails,
    game_type: GameKind,
    card_style: CardStyle,
    deck_data: Vec<Card>,
    back_config: CardBack,
    total_price: NumberOrString,
    #[serde(default)]
    status: Option<OrderStatus>,
    #[serde(default)]
    deleted_at: Option<String>,
}

/// The service serializes prices as either numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> f64 {
        match self {
            NumberOrString::Number(n) => *n,
            NumberOrString::Text(s) => s.parse().unwrap_or(0.0),
        }
    }
}

impl From<ApiOrderRow> for Order {
    fn from(row: ApiOrderRow) -> Self {
        Order {
            id: row.id,
            date: row.created_at,
            customer: row.customer_data,
            game: row.game_type,
            style: row.card_style,
            deck: row.deck_data,
            back: row.back_config,
            total_price: row.total_price.as_f64(),
            status: row.status.unwrap_or(OrderStatus::New),
            deleted_at: row.deleted_at,
        }
    }
}

fn parse_order_rows(body: &str) -> CardpressResult<Vec<Order>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CardpressError::order(format!("invalid JSON from order service: {e}")))?;

    if !value.is_array() {
        // A non-array body is either a logical error or an empty result.
        check_api_error(body)?;
        return Ok(vec![]);
    }

    let rows: Vec<ApiOrderRow> = serde_json::from_value(value)
        .map_err(|e| CardpressError::order(format!("unexpected order row shape: {e}")))?;
    Ok(rows.into_iter().map(Order::from).collect())
}
