//! Deterministic template-artwork addressing.
//!
//! Template images are pre-rendered per (game, style, suit, rank) by the
//! production pipeline and served from a static CDN. The file-naming scheme
//! below mirrors that pipeline exactly; a mismatch shows up downstream as a
//! broken image, never as a builder error. The numbering tables and the two
//! spelling exceptions are externally dictated facts — encoded as data, not
//! derived.
//!
//! Nothing here performs I/O; building a URL never validates it.

use crate::card::{CardStyle, Rank, Suit};
use crate::catalog::GameKind;

/// Asset-addressing parameters for one (game, style) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleAssets {
    /// File-name prefix of the game family.
    pub prefix: &'static str,
    /// Remote subdirectory under the CDN base.
    pub folder: &'static str,
    /// Asset version tag baked into every file name.
    pub version: &'static str,
}

/// Resolve the asset subfolder and version for a (game, style) pair.
///
/// BackOnly and CustomGame share the v1 back-only artwork set; the two
/// face-customizing styles each get their own folder and version.
pub fn style_assets(game: GameKind, style: CardStyle) -> StyleAssets {
    use CardStyle::*;
    use GameKind::*;

    let (prefix, folder, version) = match (game, style) {
        (MariasSingle, BackAndFaceFaces) => ("m1h", "M1H/RUB_a_LIC_oblicej", "v3"),
        (MariasSingle, BackAndFace) => ("m1h", "M1H/RUB_a_LIC", "v2"),
        (MariasSingle, _) => ("m1h", "M1H/RUB", "v1"),

        (MariasDouble, BackAndFaceFaces) => ("m2h", "M2H/RUB_a_LIC_oblicej", "v3"),
        (MariasDouble, BackAndFace) => ("m2h", "M2H/RUB_a_LIC", "v2"),
        (MariasDouble, _) => ("m2h", "M2H/RUB", "v1"),

        (PokerStandard, BackAndFace) => ("p2b", "PST2BIG/RUB_a_LIC", "v3"),
        (PokerStandard, BackAndFaceFaces) => ("p2b", "PST2BIG/RUB_a_LIC_figury", "v2"),
        (PokerStandard, _) => ("p2b", "PST2BIG/RUB", "v1"),

        (PokerBig, BackAndFace) => ("p4b", "PST4BIG/RUB_a_LIC", "v3"),
        (PokerBig, BackAndFaceFaces) => ("p4b", "PST4BIG/RUB_a_LIC_figury", "v2"),
        (PokerBig, _) => ("p4b", "PST4BIG/RUB", "v1"),

        (Canasta, BackAndFace) => ("pst", "PST_a_CAN/RUB_a_LIC", "v3"),
        (Canasta, BackAndFaceFaces) => ("pst", "PST_a_CAN/RUB_a_LIC_figury", "v2"),
        (Canasta, _) => ("pst", "PST_a_CAN/RUB", "v1"),
    };

    StyleAssets {
        prefix,
        folder,
        version,
    }
}

/// Template file name for a (game, style, suit, rank) combination.
pub fn template_file_name(game: GameKind, style: CardStyle, suit: Suit, rank: Rank) -> String {
    let assets = style_assets(game, style);
    if game.is_marias() {
        marias_file_name(game, assets, suit, rank)
    } else {
        poker_file_name(assets, suit, rank)
    }
}

/// Full template URL on the asset server.
pub fn template_url(
    base: &str,
    game: GameKind,
    style: CardStyle,
    suit: Suit,
    rank: Rank,
) -> String {
    let assets = style_assets(game, style);
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        assets.folder,
        template_file_name(game, style, suit, rank)
    )
}

/// Mariáš numbering: one block of 8 per suit plus a 0-7 rank offset,
/// giving a collision-free index in [0, 31].
fn marias_index(suit: Suit, rank: Rank) -> u32 {
    marias_suit_offset(suit) + marias_rank(rank).0
}

fn marias_suit_offset(suit: Suit) -> u32 {
    match suit {
        Suit::Diamonds => 0,
        Suit::Hearts => 8,
        Suit::Spades => 16,
        Suit::Clubs => 24,
    }
}

fn marias_rank(rank: Rank) -> (u32, &'static str) {
    match rank {
        Rank::Seven => (0, "7"),
        Rank::Eight => (1, "8"),
        Rank::Nine => (2, "9"),
        Rank::Ten => (3, "10"),
        Rank::Jack => (4, "spodek"),
        Rank::Queen => (5, "svrsek"),
        Rank::King => (6, "kral"),
        Rank::Ace => (7, "eso"),
        // Not present in any Mariáš rank list.
        _ => (0, ""),
    }
}

fn marias_file_name(game: GameKind, assets: StyleAssets, suit: Suit, rank: Rank) -> String {
    // M1H names the acorn suit "zaludy", M2H "zalud" — a fixed fact of the
    // asset pipeline, not derivable.
    let acorn = if game == GameKind::MariasSingle {
        "zaludy"
    } else {
        "zalud"
    };
    let suit_name = match suit {
        Suit::Diamonds => "kule",
        Suit::Hearts => "srdce",
        Suit::Spades => "zelene",
        Suit::Clubs => acorn,
    };
    let (_, rank_name) = marias_rank(rank);

    format!(
        "{}_{}_{:02}_{}_{}.png",
        assets.prefix,
        assets.version,
        marias_index(suit, rank),
        suit_name,
        rank_name
    )
}

/// Poker/Canasta numbering: per-suit bands with court cards at fixed
/// positions and pips at `band_base + (10 - value)`. Jokers sit at the
/// fixed indices 2 (red) and 3 (black).
fn poker_index(suit: Suit, rank: Rank) -> u32 {
    let (ace, court_base, pip_base) = match suit {
        Suit::Hearts => (1, 4, 16),
        Suit::Diamonds => (34, 7, 25),
        Suit::Clubs => (44, 10, 35),
        Suit::Spades => (54, 13, 45),
    };
    match rank {
        Rank::Ace => ace,
        Rank::King => court_base,
        Rank::Queen => court_base + 1,
        Rank::Jack => court_base + 2,
        pip => pip_base + (10 - pip.numeric_value().unwrap_or(10)),
    }
}

fn poker_file_name(assets: StyleAssets, suit: Suit, rank: Rank) -> String {
    if rank == Rank::Joker {
        let index = if suit.is_red() { 2 } else { 3 };
        return format!("{}_{}_{:02}_joker.png", assets.prefix, assets.version, index);
    }

    // The diamond token is "kara" everywhere except the original v1
    // Canasta artwork, which shipped as "kary".
    let diamond = if assets.prefix == "pst" && assets.version == "v1" {
        "kary"
    } else {
        "kara"
    };
    let suit_name = match suit {
        Suit::Hearts => "srdce",
        Suit::Diamonds => diamond,
        Suit::Clubs => "krize",
        Suit::Spades => "piky",
    };
    let rank_name = match rank {
        Rank::Ace => "eso".to_string(),
        Rank::King => "kral".to_string(),
        Rank::Queen => "dama".to_string(),
        Rank::Jack => "kluk".to_string(),
        pip => pip.numeric_value().unwrap_or(10).to_string(),
    };

    format!(
        "{}_{}_{:02}_{}_{}.png",
        assets.prefix,
        assets.version,
        poker_index(suit, rank),
        suit_name,
        rank_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_marias_indices_cover_0_to_31_without_collisions() {
        let mut seen = HashSet::new();
        for suit in Suit::ALL {
            for rank in GameKind::MariasSingle.spec().ranks {
                let index = marias_index(suit, *rank);
                assert!(index <= 31, "index {index} out of range");
                assert!(seen.insert(index), "collision at index {index}");
            }
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn test_poker_bands_cover_1_to_54_with_jokers() {
        let mut seen = HashSet::new();
        for suit in Suit::ALL {
            for rank in GameKind::PokerStandard.spec().ranks {
                assert!(seen.insert(poker_index(suit, *rank)));
            }
        }
        // 52 ranked indices plus the two fixed joker slots tile 1..=54.
        assert_eq!(seen.len(), 52);
        assert!(!seen.contains(&2) && !seen.contains(&3));
        seen.insert(2);
        seen.insert(3);
        for index in 1..=54 {
            assert!(seen.contains(&index), "gap at index {index}");
        }
    }

    #[test]
    fn test_poker_court_positions_are_pinned() {
        assert_eq!(poker_index(Suit::Hearts, Rank::Ace), 1);
        assert_eq!(poker_index(Suit::Hearts, Rank::King), 4);
        assert_eq!(poker_index(Suit::Hearts, Rank::Two), 24);
        assert_eq!(poker_index(Suit::Diamonds, Rank::King), 7);
        assert_eq!(poker_index(Suit::Diamonds, Rank::Ace), 34);
        assert_eq!(poker_index(Suit::Clubs, Rank::Jack), 12);
        assert_eq!(poker_index(Suit::Clubs, Rank::Ten), 35);
        assert_eq!(poker_index(Suit::Spades, Rank::Ace), 54);
    }

    #[test]
    fn test_marias_file_names() {
        assert_eq!(
            template_file_name(
                GameKind::MariasSingle,
                CardStyle::BackOnly,
                Suit::Diamonds,
                Rank::Seven
            ),
            "m1h_v1_00_kule_7.png"
        );
        assert_eq!(
            template_file_name(
                GameKind::MariasSingle,
                CardStyle::BackAndFace,
                Suit::Clubs,
                Rank::Ace
            ),
            "m1h_v2_31_zaludy_eso.png"
        );
        // The double-headed variant spells the acorn suit differently.
        assert_eq!(
            template_file_name(
                GameKind::MariasDouble,
                CardStyle::BackAndFace,
                Suit::Clubs,
                Rank::Ace
            ),
            "m2h_v2_31_zalud_eso.png"
        );
    }

    #[test]
    fn test_poker_file_names() {
        assert_eq!(
            template_file_name(
                GameKind::PokerStandard,
                CardStyle::BackAndFace,
                Suit::Hearts,
                Rank::Ace
            ),
            "p2b_v3_01_srdce_eso.png"
        );
        assert_eq!(
            template_file_name(
                GameKind::PokerBig,
                CardStyle::BackAndFaceFaces,
                Suit::Spades,
                Rank::Queen
            ),
            "p4b_v2_14_piky_dama.png"
        );
    }

    #[test]
    fn test_joker_file_names_use_fixed_slots() {
        assert_eq!(
            template_file_name(
                GameKind::Canasta,
                CardStyle::BackAndFace,
                Suit::Hearts,
                Rank::Joker
            ),
            "pst_v3_02_joker.png"
        );
        assert_eq!(
            template_file_name(
                GameKind::Canasta,
                CardStyle::BackAndFace,
                Suit::Spades,
                Rank::Joker
            ),
            "pst_v3_03_joker.png"
        );
    }

    #[test]
    fn test_diamond_spelling_exception_only_for_canasta_v1() {
        let v1 = template_file_name(
            GameKind::Canasta,
            CardStyle::BackOnly,
            Suit::Diamonds,
            Rank::King,
        );
        assert!(v1.contains("_kary_"), "expected kary in {v1}");

        let v3 = template_file_name(
            GameKind::Canasta,
            CardStyle::BackAndFace,
            Suit::Diamonds,
            Rank::King,
        );
        assert!(v3.contains("_kara_"), "expected kara in {v3}");

        let p2b = template_file_name(
            GameKind::PokerStandard,
            CardStyle::BackOnly,
            Suit::Diamonds,
            Rank::King,
        );
        assert!(p2b.contains("_kara_"), "expected kara in {p2b}");
    }

    #[test]
    fn test_style_versions_are_distinct_per_game() {
        for game in GameKind::ALL {
            let v1 = style_assets(game, CardStyle::BackOnly);
            let v2_or_v3 = style_assets(game, CardStyle::BackAndFace);
            let faces = style_assets(game, CardStyle::BackAndFaceFaces);
            assert_eq!(v1.version, "v1");
            assert_ne!(v2_or_v3.version, v1.version);
            assert_ne!(faces.version, v1.version);
            assert_ne!(faces.version, v2_or_v3.version);
            assert_ne!(v2_or_v3.folder, v1.folder);
            assert_ne!(faces.folder, v2_or_v3.folder);
            // CustomGame reuses the back-only artwork set.
            assert_eq!(style_assets(game, CardStyle::CustomGame), v1);
        }
    }

    #[test]
    fn test_template_url_joins_base_and_folder() {
        let url = template_url(
            "https://cdn.example.com/karty/",
            GameKind::MariasSingle,
            CardStyle::BackOnly,
            Suit::Hearts,
            Rank::King,
        );
        assert_eq!(
            url,
            "https://cdn.example.com/karty/M1H/RUB/m1h_v1_14_srdce_kral.png"
        );
    }
}
