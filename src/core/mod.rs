//! Core types: symbol ids, RNG, configuration, errors.
//!
//! Everything here is independent of how decks are designed or laid out.

pub mod config;
pub mod error;
pub mod prime;
pub mod rng;
pub mod symbol;

pub use config::{num_cards, DeckConfig, PlacementStrategy};
pub use error::{ConfigError, DeckError, PlacementError, PlacementFailure, SupplyError};
pub use prime::{is_prime, is_supported_order};
pub use rng::DeckRng;
pub use symbol::SymbolId;
