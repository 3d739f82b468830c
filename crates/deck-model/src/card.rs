//! Card-level types: suits, ranks, customization styles, and per-card state.
//!
//! Wire names follow the order service: decks serialize with the same field
//! names the remote API stores (`customImage`, `imageScale`, `isLocked`, ...),
//! and suits/ranks serialize as their catalog display tokens.

use serde::{Deserialize, Serialize};

use crate::catalog::GameKind;

/// Card suit.
///
/// Declaration order is the canonical suit order for deck generation.
/// Serialized values are the display tokens the order service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "Srdce")]
    Hearts,
    #[serde(rename = "Kule")]
    Diamonds,
    #[serde(rename = "Žaludy")]
    Clubs,
    #[serde(rename = "Listy")]
    Spades,
}

impl Suit {
    /// All suits in canonical (declaration) order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Display token, also used in export file names.
    pub fn label(self) -> &'static str {
        match self {
            Suit::Hearts => "Srdce",
            Suit::Diamonds => "Kule",
            Suit::Clubs => "Žaludy",
            Suit::Spades => "Listy",
        }
    }

    /// Red suits print in red; black suits in black.
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// Card rank.
///
/// Jokers only exist for the French-pattern games; the deck generator never
/// produces them for Mariáš variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "JOKER")]
    Joker,
}

impl Rank {
    /// Numeric value for pip ranks (2-10).
    pub fn numeric_value(self) -> Option<u32> {
        match self {
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            Rank::Ten => Some(10),
            _ => None,
        }
    }

    /// Court ranks carry figure artwork.
    pub fn is_court(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    /// Display label, game-dependent: Mariáš decks use the traditional
    /// Czech court names, French decks use index letters.
    pub fn label(self, game: GameKind) -> &'static str {
        if self == Rank::Joker {
            return "JOKER";
        }
        if game.is_marias() {
            match self {
                Rank::Jack => "Spodek",
                Rank::Queen => "Svršek",
                Rank::King => "Král",
                Rank::Ace => "Eso",
                other => other.index_label(),
            }
        } else {
            self.index_label()
        }
    }

    fn index_label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "JOKER",
        }
    }
}

/// Customization tier selected by the customer.
///
/// Decides which cards accept user photos and which asset version the
/// template artwork comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStyle {
    /// Only the shared back is customized; all faces are fixed artwork.
    #[serde(rename = "back-only")]
    BackOnly,
    /// Back plus every eligible face.
    #[serde(rename = "back-face")]
    BackAndFace,
    /// Back plus court cards only (photo-in-costume overlays).
    #[serde(rename = "back-face-faces")]
    BackAndFaceFaces,
    /// Fully custom game; every card is editable.
    #[serde(rename = "custom-game")]
    CustomGame,
}

impl CardStyle {
    pub const ALL: [CardStyle; 4] = [
        CardStyle::BackOnly,
        CardStyle::BackAndFace,
        CardStyle::BackAndFaceFaces,
        CardStyle::CustomGame,
    ];
}

impl std::str::FromStr for CardStyle {
    type Err = crate::catalog::UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back-only" => Ok(CardStyle::BackOnly),
            "back-face" => Ok(CardStyle::BackAndFace),
            "back-face-faces" => Ok(CardStyle::BackAndFaceFaces),
            "custom-game" => Ok(CardStyle::CustomGame),
            other => Err(crate::catalog::UnknownTag {
                kind: "style",
                value: other.to_string(),
            }),
        }
    }
}

/// User-image placement on a card surface.
///
/// Scale is clamped to [1, 4]; offsets are percentages of the card
/// dimensions in [-100, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    #[serde(rename = "imageScale")]
    pub scale: f64,
    #[serde(rename = "imageX")]
    pub offset_x: f64,
    #[serde(rename = "imageY")]
    pub offset_y: f64,
}

impl ImageTransform {
    pub const IDENTITY: ImageTransform = ImageTransform {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Create a transform, clamping values to the editable range.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: scale.clamp(1.0, 4.0),
            offset_x: offset_x.clamp(-100.0, 100.0),
            offset_y: offset_y.clamp(-100.0, 100.0),
        }
    }
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Default frame color for new cards and backs.
pub const DEFAULT_BORDER_COLOR: &str = "#D4AF37";

/// Maximum length of per-card free text.
pub const MAX_CUSTOM_TEXT_CHARS: usize = 20;

/// A single playing card in a customer deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique id within the deck (`card-{n}` in generation order).
    pub id: String,

    pub suit: Suit,
    pub rank: Rank,

    /// Owning game variant.
    #[serde(rename = "gameType")]
    pub game: GameKind,

    /// URL of the server-hosted template artwork for this (suit, rank, style).
    #[serde(default)]
    pub template_image: Option<String>,

    /// User-supplied photo as a data URI.
    #[serde(default)]
    pub custom_image: Option<String>,

    /// Whether the user photo had its background removed upstream.
    #[serde(rename = "isBackgroundRemoved", default)]
    pub background_removed: bool,

    /// User-image placement.
    #[serde(flatten)]
    pub transform: ImageTransform,

    /// Free text printed on the card (at most [`MAX_CUSTOM_TEXT_CHARS`]).
    pub custom_text: String,

    /// Frame color shown in the interactive editor.
    pub border_color: String,

    /// Locked cards are not editable at the selected style tier.
    #[serde(rename = "isLocked", default)]
    pub locked: bool,
}

impl Card {
    /// Create a fresh card with default customization state.
    pub fn new(id: String, suit: Suit, rank: Rank, game: GameKind) -> Self {
        Self {
            id,
            suit,
            rank,
            game,
            template_image: None,
            custom_image: None,
            background_removed: false,
            transform: ImageTransform::IDENTITY,
            custom_text: String::new(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            locked: false,
        }
    }

    /// Set the free text, truncating to the printable limit.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        self.custom_text = text.chars().take(MAX_CUSTOM_TEXT_CHARS).collect();
    }
}

/// The shared back design: one instance per deck, not per card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBack {
    /// User-supplied back image as a data URI.
    #[serde(default)]
    pub custom_image: Option<String>,

    /// Free text printed on the back.
    pub custom_text: String,

    /// Frame color shown in the interactive editor.
    pub border_color: String,

    /// Back-image placement.
    #[serde(flatten)]
    pub transform: ImageTransform,

    /// Fill color used when no back image is set.
    pub color: String,
}

impl Default for CardBack {
    fn default() -> Self {
        Self {
            custom_image: None,
            custom_text: String::new(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            transform: ImageTransform::IDENTITY,
            color: "#0F1623".to_string(),
        }
    }
}
