//! Error taxonomy for deck generation.
//!
//! - `ConfigError`: rejected configuration, detected before any work starts
//! - `SupplyError`: not enough distinct symbol images
//! - `PlacementFailure`: one layout attempt could not seat every symbol
//! - `PlacementError`: what a placement strategy returns
//! - `DeckError`: top-level error surfaced by the orchestrator and pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// `symbols_per_card - 1` is not a supported plane order.
    #[error("symbols per card must be a prime number + 1 (got {0})")]
    InvalidSymbolsPerCard(usize),

    /// Resolution must be positive.
    #[error("dpi must be positive")]
    InvalidDpi,

    /// Card diameter must be a positive, finite length.
    #[error("card diameter must be positive (got {0} cm)")]
    InvalidDiameter(f64),

    /// The margin leaves no room on the card.
    #[error("margin of {margin_px}px leaves no room on a {diameter_px}px card")]
    MarginTooLarge { margin_px: u32, diameter_px: u32 },

    /// A retry budget of zero can never succeed.
    #[error("{0} must be at least 1")]
    ZeroRetries(&'static str),
}

/// Fewer distinct symbol images than the deck needs.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{required} unique symbol images are required ({available} available)")]
pub struct SupplyError {
    pub required: usize,
    pub available: usize,
}

/// A single layout attempt left symbols unplaced.
///
/// Recoverable: the caller may retry the whole card with fresh randomness.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("could not place all symbols on the card ({placed} of {total} placed)")]
pub struct PlacementFailure {
    pub placed: usize,
    pub total: usize,
}

/// Outcome of a failed placement strategy.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlacementError {
    /// Retry budget exhausted; the card may be regenerated.
    #[error(transparent)]
    Failure(#[from] PlacementFailure),

    /// The strategy broke its own guarantees. Not recoverable.
    #[error("placement invariant violated: {0}")]
    Invariant(String),
}

/// Top-level deck generation error.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Supply(#[from] SupplyError),

    /// A card could not be laid out within the outer retry budget.
    #[error(
        "card {card_index}: could not place all symbols after {attempts} attempts \
         ({placed} of {total} placed on the last attempt); \
         consider increasing the number of retries"
    )]
    Placement {
        card_index: usize,
        placed: usize,
        total: usize,
        attempts: u32,
    },

    /// A programming or library defect.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeckError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckError::Io {
            path: path.into(),
            source,
        }
    }
}
