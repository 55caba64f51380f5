//! Symbol identification.
//!
//! Every symbol in a deck's universe has a unique, positive `SymbolId`.
//! Ids are 1-based so that id `i` resolves to the `i`-th symbol image.
//!
//! ```
//! use dobble_gen::core::SymbolId;
//!
//! let id = SymbolId::new(3);
//! assert_eq!(id.raw(), 3);
//! assert_eq!(id.checked_index(), Some(2));
//! assert_eq!(format!("{}", id), "Symbol(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a symbol within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Zero-based position of this symbol in an image supply.
    ///
    /// Returns `None` for the invalid id `0`.
    #[must_use]
    pub const fn checked_index(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_id() {
        let id = SymbolId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Symbol(7)");
    }

    #[test]
    fn test_index_is_one_based() {
        assert_eq!(SymbolId::new(1).checked_index(), Some(0));
        assert_eq!(SymbolId::new(13).checked_index(), Some(12));
        assert_eq!(SymbolId::new(0).checked_index(), None);
    }

    #[test]
    fn test_ordering() {
        let mut ids = vec![SymbolId::new(3), SymbolId::new(1), SymbolId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![SymbolId::new(1), SymbolId::new(2), SymbolId::new(3)]);
    }
}
