//! Combinatorial deck design.
//!
//! ## Key Types
//!
//! - `Card`: the symbols printed on one card
//! - `Deck`: every card of a design, in a stable order
//! - `generate`: builds the deck from a projective plane
//!
//! The design is a pure function of symbols-per-card: no randomness,
//! no I/O.

pub mod card;
pub mod deck;
pub mod generator;

pub use card::Card;
pub use deck::{Deck, DesignViolation};
pub use generator::generate;
