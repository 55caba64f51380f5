//! Layout strategies.
//!
//! Strategies are trait-based so the engine can swap them:
//! - `PackedLayout`: circle packing, non-overlapping by construction
//! - `RejectionLayout`: random positions accepted under a retry budget

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::{CardDisk, Circle, Placement};
use super::pack::pack;
use crate::core::{DeckRng, PlacementError, PlacementFailure, SymbolId};

/// Relative weights symbols are drawn from for packed layouts.
pub const SIZE_PALETTE: [u32; 4] = [1, 2, 3, 4];

/// Radius reduction applied to packed circles so neighbours keep clearance.
pub const PACKED_SHRINK: f64 = 0.9;

/// Policy for laying out one card's symbols.
pub trait LayoutStrategy: Send + Sync {
    /// Place every symbol on the disk.
    ///
    /// Either all symbols are placed or an error is returned; partial
    /// layouts never escape.
    fn layout(
        &self,
        symbols: &[SymbolId],
        disk: &CardDisk,
        rng: &mut DeckRng,
    ) -> Result<Vec<Placement>, PlacementError>;
}

/// Random rotation in degrees.
fn rotation(rng: &mut DeckRng) -> f64 {
    rng.gen_uniform(0.0, 360.0)
}

// =============================================================================
// Packed layout
// =============================================================================

/// Circle-packing layout.
///
/// Each symbol gets a random weight from [`SIZE_PALETTE`]. Weights are sorted
/// largest first and packed into the unit circle, which is then mapped onto
/// the card. Symbols are assigned to slots by an independent shuffle, so
/// size order and symbol order are unrelated.
#[derive(Clone, Debug, Default)]
pub struct PackedLayout;

impl LayoutStrategy for PackedLayout {
    fn layout(
        &self,
        symbols: &[SymbolId],
        disk: &CardDisk,
        rng: &mut DeckRng,
    ) -> Result<Vec<Placement>, PlacementError> {
        let mut weights: Vec<u32> = symbols
            .iter()
            .map(|_| rng.choose(&SIZE_PALETTE).copied().unwrap_or(1))
            .collect();
        weights.sort_unstable_by(|a, b| b.cmp(a));

        let radii: Vec<f64> = weights.iter().map(|&w| f64::from(w).sqrt()).collect();
        let slots = pack(&radii, rng);
        if slots.len() < symbols.len() {
            return Err(PlacementError::Invariant(format!(
                "packing returned {} slots for {} symbols",
                slots.len(),
                symbols.len()
            )));
        }

        let mut order = symbols.to_vec();
        rng.shuffle(&mut order);

        let span = disk.diameter - 2.0 * disk.margin;
        let placements = order
            .into_iter()
            .zip(slots)
            .map(|(symbol, slot)| Placement {
                symbol,
                x: disk.margin + (slot.x + 1.0) / 2.0 * span,
                y: disk.margin + (slot.y + 1.0) / 2.0 * span,
                radius: slot.r * span / 2.0 * PACKED_SHRINK,
                rotation: rotation(rng),
            })
            .collect();
        Ok(placements)
    }
}

// =============================================================================
// Rejection layout
// =============================================================================

/// Size parameters for rejection sampling, as fractions of the card diameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectionParams {
    /// Probability of reserving the card centre for one symbol.
    pub center_probability: f64,
    /// Diameter range of the centre symbol.
    pub center_size: (f64, f64),
    /// Diameter range of every other symbol.
    pub size: (f64, f64),
}

impl Default for RejectionParams {
    fn default() -> Self {
        Self {
            center_probability: 0.6,
            center_size: (0.18, 0.22),
            size: (0.15, 0.25),
        }
    }
}

impl RejectionParams {
    /// Never reserve the centre.
    #[must_use]
    pub fn without_center(mut self) -> Self {
        self.center_probability = 0.0;
        self
    }

    /// Set the diameter range of non-centre symbols.
    #[must_use]
    pub fn with_size(mut self, low: f64, high: f64) -> Self {
        self.size = (low, high);
        self
    }
}

/// Rejection-sampling layout.
///
/// Optionally seats one symbol at the exact centre, then tries up to
/// `max_retries` uniformly random positions per remaining symbol, keeping
/// the first one that clears every symbol already placed.
#[derive(Clone, Debug)]
pub struct RejectionLayout {
    pub max_retries: u32,
    pub params: RejectionParams,
}

impl RejectionLayout {
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            params: RejectionParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: RejectionParams) -> Self {
        self.params = params;
        self
    }
}

impl LayoutStrategy for RejectionLayout {
    fn layout(
        &self,
        symbols: &[SymbolId],
        disk: &CardDisk,
        rng: &mut DeckRng,
    ) -> Result<Vec<Placement>, PlacementError> {
        let mut order = symbols.to_vec();
        rng.shuffle(&mut order);

        let center = disk.center();
        let usable = disk.usable_radius();
        let mut placed: Vec<Placement> = Vec::with_capacity(order.len());
        let mut remaining = order.as_slice();

        if let Some((&symbol, rest)) = order.split_last() {
            if rng.gen_bool(self.params.center_probability) {
                let (low, high) = self.params.center_size;
                let radius = (disk.diameter * rng.gen_uniform(low, high) / 2.0).min(usable);
                placed.push(Placement {
                    symbol,
                    x: center,
                    y: center,
                    radius,
                    rotation: rotation(rng),
                });
                remaining = rest;
            }
        }

        let mut unplaced = 0;
        for &symbol in remaining {
            let (low, high) = self.params.size;
            let radius = disk.diameter * rng.gen_uniform(low, high) / 2.0;
            let max_distance = usable - radius;

            let mut seated = None;
            if max_distance >= 0.0 {
                for _ in 0..self.max_retries {
                    let angle = rng.gen_uniform(0.0, TAU);
                    let distance = rng.gen_uniform(0.0, max_distance);
                    let candidate = Circle::new(
                        center + distance * angle.cos(),
                        center + distance * angle.sin(),
                        radius,
                    );
                    if placed.iter().all(|p| p.circle().clears(&candidate)) {
                        seated = Some(candidate);
                        break;
                    }
                }
            }

            match seated {
                Some(c) => placed.push(Placement {
                    symbol,
                    x: c.x,
                    y: c.y,
                    radius: c.r,
                    rotation: rotation(rng),
                }),
                None => {
                    trace!(%symbol, radius, "no free position found");
                    unplaced += 1;
                }
            }
        }

        if unplaced > 0 {
            return Err(PlacementFailure {
                placed: placed.len(),
                total: symbols.len(),
            }
            .into());
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::geometry::verify_layout;

    fn symbols(n: u32) -> Vec<SymbolId> {
        (1..=n).map(SymbolId::new).collect()
    }

    #[test]
    fn test_packed_layout_places_every_symbol() {
        let disk = CardDisk::new(1181, 5);
        let mut rng = DeckRng::new(42);
        let ids = symbols(8);

        let placements = PackedLayout.layout(&ids, &disk, &mut rng).unwrap();

        assert_eq!(placements.len(), 8);
        let mut seen: Vec<_> = placements.iter().map(|p| p.symbol).collect();
        seen.sort();
        assert_eq!(seen, ids);
        assert!(verify_layout(&placements, &disk).is_ok());
    }

    #[test]
    fn test_packed_single_symbol_is_centered() {
        let disk = CardDisk::new(200, 10);
        let mut rng = DeckRng::new(1);

        let placements = PackedLayout.layout(&symbols(1), &disk, &mut rng).unwrap();

        let p = placements[0];
        assert!((p.x - 100.0).abs() < 1e-6);
        assert!((p.y - 100.0).abs() < 1e-6);
        assert!((p.radius - 90.0 * PACKED_SHRINK).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_range() {
        let disk = CardDisk::new(1000, 5);
        let mut rng = DeckRng::new(3);

        for _ in 0..20 {
            let placements = PackedLayout.layout(&symbols(6), &disk, &mut rng).unwrap();
            assert!(placements.iter().all(|p| (0.0..360.0).contains(&p.rotation)));
        }
    }

    #[test]
    fn test_rejection_rotation_range() {
        let disk = CardDisk::new(1181, 5);
        let params = RejectionParams {
            center_probability: 0.5,
            ..RejectionParams::default()
        };
        let layout = RejectionLayout::new(1000).with_params(params);

        let mut checked = 0;
        for seed in 0..30 {
            let mut rng = DeckRng::new(seed);
            if let Ok(placements) = layout.layout(&symbols(4), &disk, &mut rng) {
                assert!(placements.iter().all(|p| (0.0..360.0).contains(&p.rotation)));
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_nan_center_probability_never_reserves_center() {
        let disk = CardDisk::new(1000, 5);
        let params = RejectionParams {
            center_probability: f64::NAN,
            ..RejectionParams::default()
        };
        let layout = RejectionLayout::new(1000).with_params(params);
        let mut rng = DeckRng::new(2);

        let placements = layout.layout(&symbols(1), &disk, &mut rng).unwrap();

        assert_eq!(placements.len(), 1);
        assert!((0.0..360.0).contains(&placements[0].rotation));
    }

    #[test]
    fn test_rejection_layout_is_valid_when_it_succeeds() {
        let disk = CardDisk::new(1181, 5);
        let layout = RejectionLayout::new(1000);

        let mut successes = 0;
        for seed in 0..20 {
            let mut rng = DeckRng::new(seed);
            if let Ok(placements) = layout.layout(&symbols(6), &disk, &mut rng) {
                assert_eq!(placements.len(), 6);
                assert!(verify_layout(&placements, &disk).is_ok());
                successes += 1;
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn test_rejection_center_symbol() {
        let disk = CardDisk::new(1000, 5);
        let params = RejectionParams {
            center_probability: 1.0,
            ..RejectionParams::default()
        };
        let layout = RejectionLayout::new(1000).with_params(params);
        let mut rng = DeckRng::new(11);

        let placements = layout.layout(&symbols(1), &disk, &mut rng).unwrap();

        assert_eq!(placements[0].x, 500.0);
        assert_eq!(placements[0].y, 500.0);
        assert!((90.0..=110.0).contains(&placements[0].radius));
    }

    #[test]
    fn test_rejection_reports_failure() {
        let disk = CardDisk::new(200, 5);
        let params = RejectionParams::default().without_center().with_size(0.45, 0.45);
        let layout = RejectionLayout::new(1).with_params(params);
        let mut rng = DeckRng::new(5);

        let err = layout.layout(&symbols(8), &disk, &mut rng).unwrap_err();

        match err {
            PlacementError::Failure(f) => {
                assert_eq!(f.total, 8);
                assert!(f.placed < 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_symbol_too_large_for_card_is_unplaced() {
        let disk = CardDisk::new(100, 5);
        let params = RejectionParams::default().without_center().with_size(0.95, 0.95);
        let layout = RejectionLayout::new(100).with_params(params);
        let mut rng = DeckRng::new(0);

        let err = layout.layout(&symbols(1), &disk, &mut rng).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Failure(PlacementFailure { placed: 0, total: 1 })
        );
    }
}
