//! The deck: every card of a design, plus verification of its invariants.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::Card;
use crate::core::{num_cards, SymbolId};

/// A broken deck invariant, reported by [`Deck::verify`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DesignViolation {
    #[error("expected {expected} cards, found {actual}")]
    CardCount { expected: usize, actual: usize },

    #[error("card {card} has {actual} symbols, expected {expected}")]
    CardSize {
        card: usize,
        expected: usize,
        actual: usize,
    },

    #[error("card {card} lists {symbol} more than once")]
    DuplicateSymbol { card: usize, symbol: SymbolId },

    #[error("cards {a} and {b} share {shared} symbols, expected exactly 1")]
    Intersection { a: usize, b: usize, shared: usize },

    #[error("{symbol} appears on {actual} cards, expected {expected}")]
    Frequency {
        symbol: SymbolId,
        expected: usize,
        actual: usize,
    },
}

/// Ordered sequence of cards with `k` symbols each.
///
/// Immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    symbols_per_card: usize,
    cards: Vec<Card>,
}

impl Deck {
    pub(crate) fn from_cards(symbols_per_card: usize, cards: Vec<Card>) -> Self {
        Self {
            symbols_per_card,
            cards,
        }
    }

    /// Symbols per card (`k`).
    #[must_use]
    pub fn symbols_per_card(&self) -> usize {
        self.symbols_per_card
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a card by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// All cards in deck order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards each symbol appears on.
    #[must_use]
    pub fn occurrences(&self) -> FxHashMap<SymbolId, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            for &symbol in card.symbols() {
                *counts.entry(symbol).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Number of distinct symbols used by the deck.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.occurrences().len()
    }

    /// Largest symbol id in the deck, or `None` for an empty deck.
    #[must_use]
    pub fn max_symbol(&self) -> Option<SymbolId> {
        self.cards.iter().flat_map(|c| c.symbols().iter().copied()).max()
    }

    /// Check every combinatorial invariant of the deck.
    ///
    /// - `k² - k + 1` cards
    /// - `k` distinct symbols per card
    /// - every pair of cards shares exactly one symbol
    /// - every symbol is on exactly `k` cards
    pub fn verify(&self) -> Result<(), DesignViolation> {
        let k = self.symbols_per_card;
        let expected = num_cards(k);
        if self.cards.len() != expected {
            return Err(DesignViolation::CardCount {
                expected,
                actual: self.cards.len(),
            });
        }

        let mut sets: Vec<FxHashSet<SymbolId>> = Vec::with_capacity(self.cards.len());
        for (index, card) in self.cards.iter().enumerate() {
            if card.len() != k {
                return Err(DesignViolation::CardSize {
                    card: index,
                    expected: k,
                    actual: card.len(),
                });
            }
            let mut set = FxHashSet::default();
            for &symbol in card.symbols() {
                if !set.insert(symbol) {
                    return Err(DesignViolation::DuplicateSymbol { card: index, symbol });
                }
            }
            sets.push(set);
        }

        for a in 0..sets.len() {
            for b in (a + 1)..sets.len() {
                let shared = sets[a].intersection(&sets[b]).count();
                if shared != 1 {
                    return Err(DesignViolation::Intersection { a, b, shared });
                }
            }
        }

        let mut occurrences: Vec<_> = self.occurrences().into_iter().collect();
        occurrences.sort_unstable();
        for (symbol, actual) in occurrences {
            if actual != k {
                return Err(DesignViolation::Frequency {
                    symbol,
                    expected: k,
                    actual,
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
