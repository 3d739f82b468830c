//! Game-variant catalog and print-dimension resolution.
//!
//! The catalog is a fixed set of immutable entries initialized at compile
//! time; nothing mutates it at runtime, so it is freely shareable.

use serde::{Deserialize, Serialize};

use crate::card::Rank;

/// Pixels per millimeter at the production print resolution (300 DPI).
pub const PX_PER_MM: f64 = 11.811;

/// One supported physical card game/format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "marias-single")]
    MariasSingle,
    #[serde(rename = "marias-double")]
    MariasDouble,
    #[serde(rename = "poker-standard")]
    PokerStandard,
    #[serde(rename = "poker-big")]
    PokerBig,
    #[serde(rename = "canasta")]
    Canasta,
}

impl GameKind {
    /// All supported variants in catalog order.
    pub const ALL: [GameKind; 5] = [
        GameKind::MariasSingle,
        GameKind::MariasDouble,
        GameKind::PokerStandard,
        GameKind::PokerBig,
        GameKind::Canasta,
    ];

    /// Czech-pattern Mariáš games (32 cards, no jokers).
    pub fn is_marias(self) -> bool {
        matches!(self, GameKind::MariasSingle | GameKind::MariasDouble)
    }

    /// French-pattern games ship with two jokers.
    pub fn has_jokers(self) -> bool {
        !self.is_marias()
    }

    /// Traditional single-headed art; everything else is double-headed.
    pub fn is_single_headed(self) -> bool {
        matches!(self, GameKind::MariasSingle)
    }

    /// Short code used in production archive names.
    pub fn short_code(self) -> &'static str {
        match self {
            GameKind::MariasSingle => "M1H",
            GameKind::MariasDouble => "M2H",
            GameKind::PokerStandard => "PST",
            GameKind::PokerBig => "P4B",
            GameKind::Canasta => "CAN",
        }
    }

    /// The immutable catalog entry for this variant.
    pub fn spec(self) -> &'static GameSpec {
        match self {
            GameKind::MariasSingle => &MARIAS_SINGLE,
            GameKind::MariasDouble => &MARIAS_DOUBLE,
            GameKind::PokerStandard => &POKER_STANDARD,
            GameKind::PokerBig => &POKER_BIG,
            GameKind::Canasta => &CANASTA,
        }
    }
}

/// An unrecognized wire/CLI tag for one of the catalog enums.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} tag: {value}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl std::str::FromStr for GameKind {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marias-single" => Ok(GameKind::MariasSingle),
            "marias-double" => Ok(GameKind::MariasDouble),
            "poker-standard" => Ok(GameKind::PokerStandard),
            "poker-big" => Ok(GameKind::PokerBig),
            "canasta" => Ok(GameKind::Canasta),
            other => Err(UnknownTag {
                kind: "game",
                value: other.to_string(),
            }),
        }
    }
}

/// Physical card dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MillimeterSize {
    pub width_mm: f64,
    pub height_mm: f64,
    /// Human-readable label shown in the catalog.
    pub label: &'static str,
}

/// Print raster dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// Immutable catalog entry for one game variant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GameSpec {
    pub id: GameKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Total cards produced per deck, jokers included.
    pub card_count: u32,
    pub dimensions: MillimeterSize,
    /// Allowed ranks in ascending order; also the rank iteration order
    /// for deck generation.
    pub ranks: &'static [Rank],
}

const MARIAS_RANKS: [Rank; 8] = [
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

const FRENCH_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

static MARIAS_SINGLE: GameSpec = GameSpec {
    id: GameKind::MariasSingle,
    name: "Mariášové Jednohlavé",
    description: "Klasické české karty, 32 listů. Ideální na Prší nebo Mariáš.",
    card_count: 32,
    dimensions: MillimeterSize {
        width_mm: 56.0,
        height_mm: 89.0,
        label: "56 × 89 mm",
    },
    ranks: &MARIAS_RANKS,
};

static MARIAS_DOUBLE: GameSpec = GameSpec {
    id: GameKind::MariasDouble,
    name: "Mariášové Dvouhlavé",
    description: "Moderní verze mariášek, zrcadlový obraz. Nemusíte karty otáčet.",
    card_count: 32,
    dimensions: MillimeterSize {
        width_mm: 56.0,
        height_mm: 89.0,
        label: "56 × 89 mm",
    },
    ranks: &MARIAS_RANKS,
};

static POKER_STANDARD: GameSpec = GameSpec {
    id: GameKind::PokerStandard,
    name: "Poker Standard",
    description: "Francouzské karty, 52 listů + Žolíci. Klasické indexy ve 4 rozích.",
    card_count: 54,
    dimensions: MillimeterSize {
        width_mm: 63.0,
        height_mm: 88.0,
        label: "63 × 88 mm",
    },
    ranks: &FRENCH_RANKS,
};

static POKER_BIG: GameSpec = GameSpec {
    id: GameKind::PokerBig,
    name: "Poker 4BIG Index",
    description: "Francouzské karty s obřími indexy. Skvěle čitelné i potmě.",
    card_count: 54,
    dimensions: MillimeterSize {
        width_mm: 63.0,
        height_mm: 88.0,
        label: "63 × 88 mm",
    },
    ranks: &FRENCH_RANKS,
};

static CANASTA: GameSpec = GameSpec {
    id: GameKind::Canasta,
    name: "Canasta / Žolíky",
    description: "Sada obsahuje 2 balíčky po 54 kartách (celkem 108). \
                  Zde navrhujete design pro jeden balíček, který vyrobíme dvakrát.",
    card_count: 54,
    dimensions: MillimeterSize {
        width_mm: 57.0,
        height_mm: 88.0,
        label: "57 × 88 mm",
    },
    ranks: &FRENCH_RANKS,
};

/// Resolve the print raster size for a variant at 300 DPI.
///
/// Each axis rounds to the nearest integer independently. Total and
/// deterministic for every catalog entry.
pub fn print_dimensions(game: GameKind) -> PixelSize {
    let mm = game.spec().dimensions;
    PixelSize {
        width: (mm.width_mm * PX_PER_MM).round() as u32,
        height: (mm.height_mm * PX_PER_MM).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_dimensions_poker_standard() {
        // 63 × 11.811 = 744.09 -> 744; 88 × 11.811 = 1039.37 -> 1039
        let px = print_dimensions(GameKind::PokerStandard);
        assert_eq!(px.width, 744);
        assert_eq!(px.height, 1039);
    }

    #[test]
    fn test_print_dimensions_all_variants() {
        let marias = print_dimensions(GameKind::MariasSingle);
        assert_eq!(marias, PixelSize { width: 661, height: 1051 });
        assert_eq!(print_dimensions(GameKind::MariasDouble), marias);

        let canasta = print_dimensions(GameKind::Canasta);
        assert_eq!(canasta, PixelSize { width: 673, height: 1039 });
    }

    #[test]
    fn test_print_dimensions_is_pure() {
        for game in GameKind::ALL {
            assert_eq!(print_dimensions(game), print_dimensions(game));
        }
    }

    #[test]
    fn test_catalog_card_counts_are_consistent() {
        for game in GameKind::ALL {
            let spec = game.spec();
            let jokers = if game.has_jokers() { 2 } else { 0 };
            assert_eq!(
                spec.card_count,
                spec.ranks.len() as u32 * 4 + jokers,
                "catalog count mismatch for {game:?}"
            );
        }
    }

    #[test]
    fn test_short_codes() {
        assert_eq!(GameKind::MariasSingle.short_code(), "M1H");
        assert_eq!(GameKind::MariasDouble.short_code(), "M2H");
        assert_eq!(GameKind::PokerStandard.short_code(), "PST");
        assert_eq!(GameKind::PokerBig.short_code(), "P4B");
        assert_eq!(GameKind::Canasta.short_code(), "CAN");
    }

    #[test]
    fn test_game_kind_serde_tags() {
        let json = serde_json::to_string(&GameKind::PokerBig).unwrap();
        assert_eq!(json, "\"poker-big\"");
        let parsed: GameKind = serde_json::from_str("\"marias-single\"").unwrap();
        assert_eq!(parsed, GameKind::MariasSingle);
    }
}
