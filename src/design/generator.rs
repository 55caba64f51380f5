//! Projective plane deck construction.
//!
//! For plane order `n = k - 1` the deck is built directly from an affine
//! grid of `n²` points plus `n + 1` points at infinity:
//!
//! 1. Affine point `(row, col)` is symbol `(col + 1) + row·n`, so the
//!    grid uses symbols `1..=n²`.
//! 2. Slope table `a` (for `a` in `0..n`) holds the lines
//!    `{ (a·col + b) mod n, col }` for every intercept `b`. Table `0` is
//!    the base table of grid rows; the others are its affine shifts.
//! 3. The vertical table holds the grid columns.
//! 4. Every line of table `t` gets the point at infinity `n² + 1 + t`.
//! 5. The final card is the line at infinity: all `n + 1` such points.
//!
//! Cards are emitted table by table, row by row, then the final card.
//! Two lines in the same table meet only at their shared point at infinity;
//! lines in different tables meet in exactly one grid point because `n`
//! is prime. Nothing here checks primality; callers must.

use tracing::debug;

use super::card::Card;
use super::deck::Deck;
use crate::core::{num_cards, SymbolId};

/// Build the deck for `symbols_per_card` symbols per card.
///
/// Precondition: `symbols_per_card - 1` is 1 or prime
/// (see [`crate::core::is_supported_order`]). Other orders return a deck
/// of the right shape whose cards do not all pairwise intersect once.
/// `symbols_per_card < 2` yields an empty deck.
///
/// ```
/// use dobble_gen::design::generate;
///
/// let deck = generate(3);
/// assert_eq!(deck.len(), 7);
/// assert!(deck.verify().is_ok());
/// ```
#[must_use]
pub fn generate(symbols_per_card: usize) -> Deck {
    if symbols_per_card < 2 {
        return Deck::from_cards(symbols_per_card, Vec::new());
    }

    let n = symbols_per_card - 1;
    let total = num_cards(symbols_per_card);
    let point = |row: usize, col: usize| symbol((col + 1) + row * n);
    let at_infinity = |table: usize| symbol(total - n + table);

    let mut cards = Vec::with_capacity(total);

    for slope in 0..n {
        for intercept in 0..n {
            let mut card = Card::new((0..n).map(|col| point((slope * col + intercept) % n, col)));
            card.push(at_infinity(slope));
            cards.push(card);
        }
    }

    for col in 0..n {
        let mut card = Card::new((0..n).map(|row| point(row, col)));
        card.push(at_infinity(n));
        cards.push(card);
    }

    cards.push(Card::new((0..=n).map(at_infinity)));

    debug!(symbols_per_card, cards = cards.len(), "deck generated");
    Deck::from_cards(symbols_per_card, cards)
}

fn symbol(id: usize) -> SymbolId {
    SymbolId::new(id as u32)
}
