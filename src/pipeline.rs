//! End-to-end deck generation.
//!
//! `run` performs every step in order and stops at the first error:
//!
//! 1. validate the configuration
//! 2. load the symbol images and check there are enough of them
//! 3. build and verify the deck
//! 4. create the output directories
//! 5. lay out every card, then write every card image
//!
//! Configuration and supply errors are raised before anything touches the
//! output directory.

use std::path::PathBuf;

use tracing::info;

use crate::core::{DeckConfig, DeckError};
use crate::design::generate;
use crate::orchestrator::CardOrchestrator;
use crate::render::{PngCardWriter, SymbolLibrary};

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub cards: usize,
    pub symbols: usize,
    pub card_dir: PathBuf,
}

/// Create the output directory and its `cards` subdirectory.
pub fn create_output_dir(config: &DeckConfig) -> Result<(), DeckError> {
    let card_dir = config.card_dir();
    std::fs::create_dir_all(&card_dir).map_err(|e| DeckError::io(&card_dir, e))
}

/// Generate a full deck of card images.
pub fn run(config: &DeckConfig) -> Result<RunSummary, DeckError> {
    config.validate()?;
    let required = config.num_cards();
    info!(
        symbols_per_card = config.symbols_per_card,
        cards = required,
        diameter_px = config.card_diameter_px(),
        strategy = ?config.strategy,
        "generating deck"
    );

    info!(dir = %config.images_dir.display(), "loading images");
    let library = SymbolLibrary::load_dir(&config.images_dir)?
        .ensure_supply(required, config.allow_image_reuse)?;

    let deck = generate(config.symbols_per_card);
    deck.verify()
        .map_err(|violation| DeckError::InternalInvariant(violation.to_string()))?;
    info!(cards = deck.len(), symbols = deck.symbol_count(), "deck designed");

    create_output_dir(config)?;

    let orchestrator = CardOrchestrator::from_config(config, &deck, &library);
    let mut writer = PngCardWriter::from_config(config);
    let cards = orchestrator.run(&mut writer)?;

    info!(cards, dir = %writer.card_dir().display(), "cards written");
    Ok(RunSummary {
        cards,
        symbols: deck.symbol_count(),
        card_dir: writer.card_dir().to_path_buf(),
    })
}
