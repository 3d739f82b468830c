pub mod deck;
pub mod dimensions;
pub mod export;
pub mod orders;

use cardpress_deck_model::{CardStyle, GameKind, OrderStatus};

/// Parse a game tag, with a usage hint on failure.
pub fn parse_game(value: &str) -> anyhow::Result<GameKind> {
    value.parse().map_err(|_| {
        anyhow::anyhow!(
            "Unknown game: {value}. Use: marias-single, marias-double, poker-standard, poker-big, canasta"
        )
    })
}

/// Parse a card-style tag, with a usage hint on failure.
pub fn parse_style(value: &str) -> anyhow::Result<CardStyle> {
    value.parse().map_err(|_| {
        anyhow::anyhow!("Unknown style: {value}. Use: back-only, back-face, back-face-faces, custom-game")
    })
}

/// Parse an order-status tag, with a usage hint on failure.
pub fn parse_status(value: &str) -> anyhow::Result<OrderStatus> {
    value.parse().map_err(|_| {
        anyhow::anyhow!("Unknown status: {value}. Use: new, processing, issue, done, cancelled, deleted")
    })
}
