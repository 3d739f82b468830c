//! Print the generated deck manifest for a (game, style) selection.

use cardpress_common::config::AppConfig;
use cardpress_deck_model::{generate_deck, template_file_name};

use super::{parse_game, parse_style};

pub fn run(game: &str, style: &str) -> anyhow::Result<()> {
    let game = parse_game(game)?;
    let style = parse_style(style)?;
    let config = AppConfig::load();

    let deck = generate_deck(&config.asset_base_url, game, style);
    println!(
        "Deck for {:?} / {:?} — {} cards in print order:",
        game,
        style,
        deck.len()
    );

    for (index, card) in deck.iter().enumerate() {
        let lock = if card.locked { "locked" } else { "      " };
        println!(
            "  {:03}  {:>8} {:>6}  {}  {}",
            index + 1,
            card.suit.label(),
            card.rank.label(card.game),
            lock,
            template_file_name(game, style, card.suit, card.rank),
        );
    }

    Ok(())
}
