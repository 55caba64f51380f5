//! A single card: the set of symbols printed on it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::SymbolId;

/// Symbols of one card.
///
/// Stored inline for the common deck sizes. Order is not semantically
/// meaningful but is kept stable so layouts are reproducible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    symbols: SmallVec<[SymbolId; 8]>,
}

impl Card {
    /// Create a card from its symbols.
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = SymbolId>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    /// Symbols on this card.
    #[must_use]
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the card has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check whether a symbol is on this card.
    #[must_use]
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Symbols this card shares with another.
    pub fn common_symbols<'a>(&'a self, other: &'a Card) -> impl Iterator<Item = SymbolId> + 'a {
        self.symbols.iter().copied().filter(move |s| other.contains(*s))
    }

    /// Append a symbol.
    pub(crate) fn push(&mut self, symbol: SymbolId) {
        self.symbols.push(symbol);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.symbols.iter().map(|s| s.raw().to_string()).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(ids: &[u32]) -> Card {
        Card::new(ids.iter().copied().map(SymbolId::new))
    }

    #[test]
    fn test_common_symbols() {
        let a = card(&[1, 2, 5]);
        let b = card(&[3, 4, 5]);

        let shared: Vec<_> = a.common_symbols(&b).collect();
        assert_eq!(shared, vec![SymbolId::new(5)]);
    }

    #[test]
    fn test_contains_and_len() {
        let c = card(&[1, 2, 3]);
        assert_eq!(c.len(), 3);
        assert!(c.contains(SymbolId::new(2)));
        assert!(!c.contains(SymbolId::new(4)));
        assert!(!c.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(card(&[1, 4, 7]).to_string(), "[1, 4, 7]");
    }
}
