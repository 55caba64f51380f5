//! Deck generation configuration.
//!
//! `DeckConfig` carries everything a run needs: where symbol images come
//! from, where cards go, deck size, physical card size and the placement
//! budgets. Derived values (`num_cards`, `card_diameter_px`) are computed,
//! never stored, so they cannot drift out of sync.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::prime::is_supported_order;

pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_SYMBOLS_PER_CARD: usize = 8;
pub const DEFAULT_CARD_DIAMETER_CM: f64 = 10.0;
pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_MAX_PLACEMENT_RETRIES: u32 = 1000;
pub const DEFAULT_MAX_CARD_ATTEMPTS: u32 = 10;
pub const DEFAULT_MARGIN_PX: u32 = 5;
pub const DEFAULT_SEED: u64 = 42;

const CM_PER_INCH: f64 = 2.54;

/// Number of cards (and of distinct symbols) in a deck with `k` symbols per card.
///
/// `k² - k + 1`, the size of a projective plane of order `k - 1`.
#[must_use]
pub const fn num_cards(symbols_per_card: usize) -> usize {
    symbols_per_card * symbols_per_card - symbols_per_card + 1
}

/// How symbols are laid out on a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum PlacementStrategy {
    /// Circle packing: non-overlap by construction, no retries needed.
    #[default]
    Packing,
    /// Rejection sampling of random positions under a retry budget.
    Rejection,
}

/// Complete run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Directory containing the symbol images.
    pub images_dir: PathBuf,

    /// Directory receiving the generated cards.
    pub output_dir: PathBuf,

    /// Symbols per card (`k`). `k - 1` must be 1 or prime.
    pub symbols_per_card: usize,

    /// Physical card diameter.
    pub card_diameter_cm: f64,

    /// Output resolution in dots per inch.
    pub dpi: u32,

    /// Candidate positions tried per symbol (rejection strategy).
    pub max_placement_retries: u32,

    /// Whole-card layout attempts before a card is reported as failed.
    pub max_card_attempts: u32,

    /// Clearance between symbols and the card edge, in pixels.
    pub margin_px: u32,

    /// Layout strategy.
    pub strategy: PlacementStrategy,

    /// Seed for every random choice made during layout.
    pub seed: u64,

    /// Pad an insufficient image supply by reusing images.
    ///
    /// Off by default: reuse breaks the one-image-per-symbol guarantee.
    pub allow_image_reuse: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            symbols_per_card: DEFAULT_SYMBOLS_PER_CARD,
            card_diameter_cm: DEFAULT_CARD_DIAMETER_CM,
            dpi: DEFAULT_DPI,
            max_placement_retries: DEFAULT_MAX_PLACEMENT_RETRIES,
            max_card_attempts: DEFAULT_MAX_CARD_ATTEMPTS,
            margin_px: DEFAULT_MARGIN_PX,
            strategy: PlacementStrategy::default(),
            seed: DEFAULT_SEED,
            allow_image_reuse: false,
        }
    }
}

impl DeckConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image and output directories.
    #[must_use]
    pub fn with_dirs(mut self, images_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        self.images_dir = images_dir.into();
        self.output_dir = output_dir.into();
        self
    }

    /// Set symbols per card.
    #[must_use]
    pub fn with_symbols_per_card(mut self, k: usize) -> Self {
        self.symbols_per_card = k;
        self
    }

    /// Set the physical card diameter.
    #[must_use]
    pub fn with_card_diameter_cm(mut self, cm: f64) -> Self {
        self.card_diameter_cm = cm;
        self
    }

    /// Set the output resolution.
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the per-symbol retry budget.
    #[must_use]
    pub fn with_max_placement_retries(mut self, retries: u32) -> Self {
        self.max_placement_retries = retries;
        self
    }

    /// Set the whole-card attempt budget.
    #[must_use]
    pub fn with_max_card_attempts(mut self, attempts: u32) -> Self {
        self.max_card_attempts = attempts;
        self
    }

    /// Set the edge margin.
    #[must_use]
    pub fn with_margin_px(mut self, margin: u32) -> Self {
        self.margin_px = margin;
        self
    }

    /// Set the layout strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Opt in to padding the image supply by reuse.
    #[must_use]
    pub fn with_image_reuse(mut self, allow: bool) -> Self {
        self.allow_image_reuse = allow;
        self
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn num_cards(&self) -> usize {
        num_cards(self.symbols_per_card)
    }

    /// Card diameter in pixels at the configured resolution.
    #[must_use]
    pub fn card_diameter_px(&self) -> u32 {
        (self.card_diameter_cm / CM_PER_INCH * f64::from(self.dpi)).round() as u32
    }

    /// Directory receiving the individual card images.
    #[must_use]
    pub fn card_dir(&self) -> PathBuf {
        self.output_dir.join("cards")
    }

    /// Check every precondition of a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols_per_card < 2 || !is_supported_order(self.symbols_per_card - 1) {
            return Err(ConfigError::InvalidSymbolsPerCard(self.symbols_per_card));
        }
        if self.dpi == 0 {
            return Err(ConfigError::InvalidDpi);
        }
        if !(self.card_diameter_cm.is_finite() && self.card_diameter_cm > 0.0) {
            return Err(ConfigError::InvalidDiameter(self.card_diameter_cm));
        }
        let diameter_px = self.card_diameter_px();
        if u64::from(self.margin_px) * 2 >= u64::from(diameter_px) {
            return Err(ConfigError::MarginTooLarge {
                margin_px: self.margin_px,
                diameter_px,
            });
        }
        if self.max_placement_retries == 0 {
            return Err(ConfigError::ZeroRetries("max_placement_retries"));
        }
        if self.max_card_attempts == 0 {
            return Err(ConfigError::ZeroRetries("max_card_attempts"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::default();
        assert_eq!(config.symbols_per_card, 8);
        assert_eq!(config.num_cards(), 57);
        assert_eq!(config.strategy, PlacementStrategy::Packing);
        assert!(!config.allow_image_reuse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_num_cards() {
        assert_eq!(num_cards(2), 3);
        assert_eq!(num_cards(3), 7);
        assert_eq!(num_cards(4), 13);
        assert_eq!(num_cards(8), 57);
    }

    #[test]
    fn test_card_diameter_px() {
        let config = DeckConfig::default();
        // 10 / 2.54 * 300 = 1181.1
        assert_eq!(config.card_diameter_px(), 1181);

        let config = DeckConfig::default().with_card_diameter_cm(8.0);
        // 8 / 2.54 * 300 = 944.88
        assert_eq!(config.card_diameter_px(), 945);
    }

    #[test]
    fn test_card_dir() {
        let config = DeckConfig::default().with_dirs("imgs", "out");
        assert_eq!(config.card_dir(), PathBuf::from("out").join("cards"));
    }

    #[test]
    fn test_rejects_non_prime_order() {
        let config = DeckConfig::default().with_symbols_per_card(9);
        assert_eq!(config.validate(), Err(ConfigError::InvalidSymbolsPerCard(9)));

        let config = DeckConfig::default().with_symbols_per_card(1);
        assert_eq!(config.validate(), Err(ConfigError::InvalidSymbolsPerCard(1)));
    }

    #[test]
    fn test_accepts_trivial_order() {
        let config = DeckConfig::default().with_symbols_per_card(2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            DeckConfig::default().with_dpi(0).validate(),
            Err(ConfigError::InvalidDpi)
        );
        assert!(matches!(
            DeckConfig::default().with_card_diameter_cm(-1.0).validate(),
            Err(ConfigError::InvalidDiameter(_))
        ));
        assert!(matches!(
            DeckConfig::default().with_margin_px(600).validate(),
            Err(ConfigError::MarginTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_budgets() {
        assert_eq!(
            DeckConfig::default().with_max_placement_retries(0).validate(),
            Err(ConfigError::ZeroRetries("max_placement_retries"))
        );
        assert_eq!(
            DeckConfig::default().with_max_card_attempts(0).validate(),
            Err(ConfigError::ZeroRetries("max_card_attempts"))
        );
    }

    #[test]
    fn test_config_serde() {
        let config = DeckConfig::default()
            .with_strategy(PlacementStrategy::Rejection)
            .with_seed(7);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DeckConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }
}
