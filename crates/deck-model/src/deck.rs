//! Deck generation in the canonical face-printing order.
//!
//! The generated order is stable and reproducible for identical inputs:
//! suits in declaration order (outer loop), the variant's rank list in
//! catalog order (inner loop), jokers appended last. The export pipeline
//! relies on this order for face numbering.

use crate::assets::template_url;
use crate::card::{Card, CardStyle, Rank, Suit};
use crate::catalog::GameKind;

/// Build the full ordered card set for a (game, style) selection.
///
/// Every (suit, rank) pair of the variant's rank list yields exactly one
/// card; French-pattern variants get a red and a black joker appended.
/// The `locked` flag marks cards the selected style tier keeps fixed.
pub fn generate_deck(base_url: &str, game: GameKind, style: CardStyle) -> Vec<Card> {
    let spec = game.spec();
    let mut deck = Vec::with_capacity(spec.card_count as usize);
    let mut id_counter = 1u32;

    for suit in Suit::ALL {
        for &rank in spec.ranks {
            let mut card = Card::new(format!("card-{id_counter}"), suit, rank, game);
            id_counter += 1;
            card.template_image = Some(template_url(base_url, game, style, suit, rank));
            card.locked = is_locked(game, style, rank);
            deck.push(card);
        }
    }

    if game.has_jokers() {
        let joker_locked = style == CardStyle::BackOnly;
        for (slot, suit) in [(1u32, Suit::Hearts), (2u32, Suit::Spades)] {
            let mut joker = Card::new(
                format!("card-joker-{slot}-{id_counter}"),
                suit,
                Rank::Joker,
                game,
            );
            id_counter += 1;
            joker.template_image = Some(template_url(base_url, game, style, suit, Rank::Joker));
            joker.locked = joker_locked;
            deck.push(joker);
        }
    }

    deck
}

/// Style-tier locking rules for ranked cards.
fn is_locked(game: GameKind, style: CardStyle, rank: Rank) -> bool {
    match style {
        CardStyle::BackOnly => true,
        CardStyle::BackAndFaceFaces => !rank.is_court(),
        CardStyle::BackAndFace => {
            game.is_marias()
                && matches!(rank, Rank::Seven | Rank::Eight | Rank::Nine | Rank::Ten)
        }
        CardStyle::CustomGame => false,
    }
}
