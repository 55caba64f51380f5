//! # dobble-gen
//!
//! Generates decks of "spot-the-shared-symbol" cards: every pair of cards
//! shares exactly one symbol, and each card's symbols are laid out as
//! non-overlapping circles inside a circular card.
//!
//! ## Architecture
//!
//! - **Design**: a deck is a finite projective plane of order `k - 1`,
//!   built deterministically. `k - 1` must be prime (or 1).
//!
//! - **Placement**: each card is laid out independently, either by circle
//!   packing or by rejection sampling under a retry budget. Randomness
//!   always comes from an explicit, seedable `DeckRng`.
//!
//! - **Orchestration**: whole-card retries, symbol id → image resolution,
//!   and hand-off to a `CardSink` that renders the result.
//!
//! ## Modules
//!
//! - `core`: symbol ids, RNG, configuration, errors
//! - `design`: cards, decks, the generator
//! - `placement`: geometry, circle packing, layout strategies, the engine
//! - `render`: symbol images and the PNG card writer
//! - `orchestrator`: per-card retries and emission
//! - `pipeline`: the end-to-end run

pub mod core;
pub mod design;
pub mod orchestrator;
pub mod pipeline;
pub mod placement;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, DeckConfig, DeckError, DeckRng, PlacementError, PlacementFailure,
    PlacementStrategy, SupplyError, SymbolId,
};

pub use crate::design::{generate, Card, Deck, DesignViolation};

pub use crate::placement::{
    CardDisk, LayoutStrategy, PackedLayout, Placement, PlacementEngine, RejectionLayout,
    RejectionParams,
};

pub use crate::render::{PngCardWriter, SymbolImage, SymbolLibrary};

pub use crate::orchestrator::{CardLayout, CardOrchestrator, CardSink};

pub use crate::pipeline::{create_output_dir, run, RunSummary};
