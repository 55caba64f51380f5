//! Placement engine: one card's symbols in, a checked layout out.

use tracing::debug;

use super::geometry::{verify_layout, CardDisk, Placement};
use super::strategy::{LayoutStrategy, PackedLayout, RejectionLayout, RejectionParams};
use crate::core::{DeckConfig, DeckRng, PlacementError, PlacementStrategy, SymbolId};

/// Lays out the symbols of a single card.
///
/// Holds no per-card state: the same engine can be shared by every card
/// (and every thread), each call drawing from the RNG it is handed.
///
/// ```
/// use dobble_gen::core::{DeckRng, SymbolId};
/// use dobble_gen::placement::PlacementEngine;
///
/// let engine = PlacementEngine::new(1181, 5);
/// let symbols: Vec<SymbolId> = (1..=8).map(SymbolId::new).collect();
///
/// let placements = engine.place(&symbols, &mut DeckRng::new(42)).unwrap();
/// assert_eq!(placements.len(), 8);
/// ```
pub struct PlacementEngine {
    disk: CardDisk,
    strategy: Box<dyn LayoutStrategy>,
}

impl PlacementEngine {
    /// Create an engine using circle packing.
    #[must_use]
    pub fn new(diameter_px: u32, margin_px: u32) -> Self {
        Self {
            disk: CardDisk::new(diameter_px, margin_px),
            strategy: Box::new(PackedLayout),
        }
    }

    /// Create an engine using rejection sampling.
    #[must_use]
    pub fn rejection(diameter_px: u32, margin_px: u32, max_retries: u32, params: RejectionParams) -> Self {
        Self::new(diameter_px, margin_px)
            .with_strategy(RejectionLayout::new(max_retries).with_params(params))
    }

    /// Create the engine a configuration asks for.
    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Self {
        let diameter = config.card_diameter_px();
        match config.strategy {
            PlacementStrategy::Packing => Self::new(diameter, config.margin_px),
            PlacementStrategy::Rejection => Self::rejection(
                diameter,
                config.margin_px,
                config.max_placement_retries,
                RejectionParams::default(),
            ),
        }
    }

    /// Replace the layout strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl LayoutStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// The card disk symbols are placed on.
    #[must_use]
    pub fn disk(&self) -> &CardDisk {
        &self.disk
    }

    /// Place every symbol of one card.
    ///
    /// On success the result has exactly one placement per symbol, every
    /// placement is inside the disk minus margin, and every pair keeps the
    /// clearance rule. `PlacementError::Failure` may be retried with fresh
    /// randomness; `PlacementError::Invariant` is a defect.
    pub fn place(&self, symbols: &[SymbolId], rng: &mut DeckRng) -> Result<Vec<Placement>, PlacementError> {
        let placements = self.strategy.layout(symbols, &self.disk, rng)?;

        if placements.len() != symbols.len() {
            return Err(PlacementError::Invariant(format!(
                "{} placements returned for {} symbols",
                placements.len(),
                symbols.len()
            )));
        }
        verify_layout(&placements, &self.disk)
            .map_err(|violation| PlacementError::Invariant(violation.to_string()))?;

        debug!(symbols = symbols.len(), "layout accepted");
        Ok(placements)
    }
}

impl std::fmt::Debug for PlacementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementEngine")
            .field("disk", &self.disk)
            .finish_non_exhaustive()
    }
}
