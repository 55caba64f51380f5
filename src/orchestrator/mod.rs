//! Card orchestration: deck in, one artifact per card out.
//!
//! For every card the orchestrator lays out its symbols with the placement
//! engine (retrying the whole card with fresh randomness when a layout
//! attempt fails), resolves symbol ids to images and hands both to a
//! [`CardSink`].
//!
//! ## Failure policy
//!
//! Every card is laid out before anything is emitted. If any card exhausts
//! its attempt budget the run aborts with that card's index, so a failed
//! run never leaves a partial deck behind.
//!
//! Each card draws from its own RNG stream (`DeckRng::for_card`), so
//! `layout_card` gives the same result whatever order cards are processed
//! in, and can be called from several threads at once.

use tracing::{debug, info, warn};

use crate::core::{DeckConfig, DeckError, DeckRng, PlacementError, PlacementFailure};
use crate::design::Deck;
use crate::placement::{Placement, PlacementEngine};
use crate::render::{SymbolImage, SymbolLibrary};

/// Consumer of laid-out cards (typically a rasterizer).
pub trait CardSink {
    /// Produce the artifact for one card.
    ///
    /// `images[i]` is the image of `placements[i].symbol`.
    fn emit(
        &mut self,
        card_index: usize,
        placements: &[Placement],
        images: &[&SymbolImage],
    ) -> Result<(), DeckError>;
}

/// A successful layout of one card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    pub card_index: usize,
    pub placements: Vec<Placement>,
    /// Attempts used, starting at 1.
    pub attempts: u32,
}

/// Drives layout and rendering of a whole deck.
#[derive(Debug)]
pub struct CardOrchestrator<'a> {
    deck: &'a Deck,
    library: &'a SymbolLibrary,
    engine: PlacementEngine,
    rng: DeckRng,
    max_card_attempts: u32,
}

impl<'a> CardOrchestrator<'a> {
    pub fn new(
        deck: &'a Deck,
        library: &'a SymbolLibrary,
        engine: PlacementEngine,
        seed: u64,
        max_card_attempts: u32,
    ) -> Self {
        Self {
            deck,
            library,
            engine,
            rng: DeckRng::new(seed),
            max_card_attempts: max_card_attempts.max(1),
        }
    }

    pub fn from_config(config: &DeckConfig, deck: &'a Deck, library: &'a SymbolLibrary) -> Self {
        Self::new(
            deck,
            library,
            PlacementEngine::from_config(config),
            config.seed,
            config.max_card_attempts,
        )
    }

    /// Lay out one card, retrying with fresh randomness on failure.
    pub fn layout_card(&self, card_index: usize) -> Result<CardLayout, DeckError> {
        let card = self.deck.get(card_index).ok_or_else(|| {
            DeckError::InternalInvariant(format!(
                "card {} requested from a deck of {}",
                card_index,
                self.deck.len()
            ))
        })?;

        let mut rng = self.rng.for_card(card_index);
        let mut last = PlacementFailure {
            placed: 0,
            total: card.len(),
        };

        for attempt in 1..=self.max_card_attempts {
            match self.engine.place(card.symbols(), &mut rng) {
                Ok(placements) => {
                    return Ok(CardLayout {
                        card_index,
                        placements,
                        attempts: attempt,
                    });
                }
                Err(PlacementError::Failure(failure)) => {
                    debug!(
                        card = card_index,
                        attempt,
                        placed = failure.placed,
                        total = failure.total,
                        "layout attempt failed"
                    );
                    last = failure;
                }
                Err(PlacementError::Invariant(msg)) => {
                    return Err(DeckError::InternalInvariant(format!("card {}: {}", card_index, msg)));
                }
            }
        }

        warn!(card = card_index, attempts = self.max_card_attempts, "giving up on card");
        Err(DeckError::Placement {
            card_index,
            placed: last.placed,
            total: last.total,
            attempts: self.max_card_attempts,
        })
    }

    /// Lay out every card, stopping at the first failure.
    pub fn layout_all(&self) -> Result<Vec<CardLayout>, DeckError> {
        (0..self.deck.len()).map(|i| self.layout_card(i)).collect()
    }

    /// Images for a layout, in placement order.
    pub fn resolve(&self, layout: &CardLayout) -> Result<Vec<&'a SymbolImage>, DeckError> {
        layout
            .placements
            .iter()
            .map(|p| {
                self.library.resolve(p.symbol).ok_or_else(|| {
                    DeckError::InternalInvariant(format!(
                        "no image for {} ({} images loaded)",
                        p.symbol,
                        self.library.len()
                    ))
                })
            })
            .collect()
    }

    /// Lay out the whole deck, then emit every card.
    ///
    /// Returns the number of cards emitted.
    pub fn run(&self, sink: &mut impl CardSink) -> Result<usize, DeckError> {
        let layouts = self.layout_all()?;
        let retried = layouts.iter().filter(|l| l.attempts > 1).count();
        info!(cards = layouts.len(), retried, "all cards laid out");

        for layout in &layouts {
            let images = self.resolve(layout)?;
            sink.emit(layout.card_index, &layout.placements, &images)?;
        }
        Ok(layouts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::generate;
    use crate::placement::RejectionParams;
    use image::{Rgba, RgbaImage};

    #[derive(Default)]
    struct Recorder {
        emitted: Vec<(usize, usize)>,
    }

    impl CardSink for Recorder {
        fn emit(
            &mut self,
            card_index: usize,
            placements: &[Placement],
            images: &[&SymbolImage],
        ) -> Result<(), DeckError> {
            assert_eq!(placements.len(), images.len());
            self.emitted.push((card_index, placements.len()));
            Ok(())
        }
    }

    fn library(n: usize) -> SymbolLibrary {
        SymbolLibrary::new(
            (0..n)
                .map(|i| {
                    SymbolImage::from_rgba(
                        format!("s{}", i),
                        RgbaImage::from_pixel(4, 4, Rgba([i as u8, 0, 0, 255])),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_layout_is_order_independent() {
        let deck = generate(4);
        let lib = library(13);
        let orchestrator = CardOrchestrator::new(&deck, &lib, PlacementEngine::new(600, 5), 7, 3);

        let forward: Vec<_> = (0..deck.len()).map(|i| orchestrator.layout_card(i).unwrap()).collect();
        let backward: Vec<_> = (0..deck.len())
            .rev()
            .map(|i| orchestrator.layout_card(i).unwrap())
            .collect();

        for (a, b) in forward.iter().zip(backward.iter().rev()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parallel_layout_matches_sequential() {
        let deck = generate(8);
        let lib = library(57);
        let orchestrator = CardOrchestrator::new(&deck, &lib, PlacementEngine::new(1181, 5), 42, 3);

        let sequential: Vec<_> = (0..deck.len())
            .map(|i| orchestrator.layout_card(i).unwrap())
            .collect();

        let indices: Vec<usize> = (0..deck.len()).collect();
        let mut parallel: Vec<CardLayout> = std::thread::scope(|scope| {
            let handles: Vec<_> = indices
                .chunks(8)
                .map(|chunk| {
                    let orchestrator = &orchestrator;
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|&i| orchestrator.layout_card(i).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        parallel.sort_by_key(|layout| layout.card_index);

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_run_emits_every_card() {
        let deck = generate(3);
        let lib = library(7);
        let orchestrator = CardOrchestrator::new(&deck, &lib, PlacementEngine::new(400, 5), 1, 3);
        let mut sink = Recorder::default();

        let count = orchestrator.run(&mut sink).unwrap();

        assert_eq!(count, 7);
        assert_eq!(sink.emitted.len(), 7);
        assert!(sink.emitted.iter().enumerate().all(|(i, &(idx, n))| i == idx && n == 3));
    }

    #[test]
    fn test_exhausted_card_reports_index() {
        let deck = generate(8);
        let lib = library(57);
        let params = RejectionParams::default().without_center().with_size(0.45, 0.45);
        let engine = PlacementEngine::rejection(200, 5, 1, params);
        let orchestrator = CardOrchestrator::new(&deck, &lib, engine, 3, 2);

        match orchestrator.layout_card(5) {
            Err(DeckError::Placement {
                card_index,
                total,
                attempts,
                placed,
            }) => {
                assert_eq!(card_index, 5);
                assert_eq!(total, 8);
                assert_eq!(attempts, 2);
                assert!(placed < 8);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_failed_run_emits_nothing() {
        let deck = generate(8);
        let lib = library(57);
        let params = RejectionParams::default().without_center().with_size(0.45, 0.45);
        let engine = PlacementEngine::rejection(200, 5, 1, params);
        let orchestrator = CardOrchestrator::new(&deck, &lib, engine, 3, 1);
        let mut sink = Recorder::default();

        assert!(orchestrator.run(&mut sink).is_err());
        assert!(sink.emitted.is_empty());
    }

    #[test]
    fn test_missing_image_is_an_invariant_error() {
        let deck = generate(3);
        let lib = library(2);
        let orchestrator = CardOrchestrator::new(&deck, &lib, PlacementEngine::new(400, 5), 1, 1);

        let layout = orchestrator.layout_card(6).unwrap();
        assert!(matches!(
            orchestrator.resolve(&layout),
            Err(DeckError::InternalInvariant(_))
        ));
    }

    #[test]
    fn test_out_of_range_card() {
        let deck = generate(3);
        let lib = library(7);
        let orchestrator = CardOrchestrator::new(&deck, &lib, PlacementEngine::new(400, 5), 1, 1);

        assert!(matches!(
            orchestrator.layout_card(7),
            Err(DeckError::InternalInvariant(_))
        ));
    }
}
