//! CardPress Deck Model
//!
//! Defines the core data contracts for CardPress decks:
//! - **Catalog:** Supported game variants, physical dimensions, print pixel sizes
//! - **Cards:** Suits, ranks, customization styles, per-card state, the shared back
//! - **Assets:** Deterministic template-artwork addressing on the remote CDN
//! - **Deck:** Deck generation in the canonical face-printing order
//! - **Orders:** Customer orders as consumed by the export pipeline
//!
//! All image placement values are expressed relative to the card surface
//! (scale factor plus percent offsets) so a deck survives being edited at
//! preview size and rendered at print size.

pub mod assets;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod order;

pub use assets::*;
pub use card::*;
pub use catalog::*;
pub use deck::*;
pub use order::*;
