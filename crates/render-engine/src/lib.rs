//! CardPress Render Engine
//!
//! Off-screen rendering pipeline that composites template artwork with
//! customer photos and text, rasterizes every card face at print
//! resolution, and packages the results into a production archive.
//!
//! # Pipeline Architecture
//!
//! ```text
//! order.deck ──────┐
//!                  ├── Scene (per card, print pixel dims)
//! catalog dims ────┘        │
//!                           ├── Asset loads (template CDN, data URIs)
//! asset server ─────────────┘        │
//!                                    ├── Settle (delay + loads resolved)
//!                                    │
//!                                    ├── Composite + rasterize (PNG)
//!                                    ▼
//!                             {NNN}_{suit}_{rank}.png
//!                                    │
//!                                    ▼
//!                      MC{id}_{surname}_{game}_1ks.zip
//! ```
//!
//! Cards render strictly sequentially: the off-screen surface is a single
//! shared mutable resource with exactly one writer, and card N+1 is never
//! presented before card N's bytes are captured.

pub mod compositor;
pub mod export;
pub mod fetcher;
pub mod surface;

pub use export::*;
pub use surface::*;
