//! Circles, the card disk, and the clearance rule.

use thiserror::Error;

use crate::core::SymbolId;

/// Minimum centre distance as a multiple of the summed radii.
pub const CLEARANCE_FACTOR: f64 = 1.05;

/// Relative slack for floating point comparisons.
const EPSILON: f64 = 1e-9;

/// A circle in some 2D coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    #[must_use]
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    /// Distance between the centres of two circles.
    #[must_use]
    pub fn distance(&self, other: &Circle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether two circles keep the required clearance from each other.
    ///
    /// `distance >= (r1 + r2) * CLEARANCE_FACTOR`
    #[must_use]
    pub fn clears(&self, other: &Circle) -> bool {
        self.distance(other) >= (self.r + other.r) * CLEARANCE_FACTOR
    }
}

/// The circular card, in pixels, with its edge margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardDisk {
    pub diameter: f64,
    pub margin: f64,
}

impl CardDisk {
    #[must_use]
    pub fn new(diameter_px: u32, margin_px: u32) -> Self {
        Self {
            diameter: f64::from(diameter_px),
            margin: f64::from(margin_px),
        }
    }

    /// Centre coordinate (same for x and y).
    #[must_use]
    pub fn center(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Radius of the area symbols may occupy.
    #[must_use]
    pub fn usable_radius(&self) -> f64 {
        self.diameter / 2.0 - self.margin
    }

    /// Whether a circle lies fully inside the usable area.
    #[must_use]
    pub fn contains(&self, circle: &Circle) -> bool {
        let c = self.center();
        let reach = (circle.x - c).hypot(circle.y - c) + circle.r;
        reach <= self.usable_radius() + EPSILON * self.diameter
    }
}

/// One symbol instance on one card.
///
/// A pure transform descriptor: the renderer scales and rotates the
/// symbol image when it draws it. Rotation never affects collisions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub symbol: SymbolId,
    /// Centre x in pixels.
    pub x: f64,
    /// Centre y in pixels.
    pub y: f64,
    /// Radius in pixels.
    pub radius: f64,
    /// Rotation in degrees, `[0, 360)`.
    pub rotation: f64,
}

impl Placement {
    /// Collision footprint.
    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

/// A broken layout rule, reported by [`verify_layout`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutViolation {
    #[error("{0} is not fully inside the card")]
    OutsideCard(SymbolId),

    #[error("{0} and {1} are closer than the required clearance")]
    TooClose(SymbolId, SymbolId),

    #[error("{0} has a non-positive or non-finite radius")]
    BadRadius(SymbolId),
}

/// Check that every placement is inside the disk and clears every other.
pub fn verify_layout(placements: &[Placement], disk: &CardDisk) -> Result<(), LayoutViolation> {
    for p in placements {
        if !(p.radius.is_finite() && p.radius > 0.0) {
            return Err(LayoutViolation::BadRadius(p.symbol));
        }
        if !disk.contains(&p.circle()) {
            return Err(LayoutViolation::OutsideCard(p.symbol));
        }
    }
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            let required = (a.radius + b.radius) * CLEARANCE_FACTOR;
            if a.circle().distance(&b.circle()) < required * (1.0 - EPSILON) {
                return Err(LayoutViolation::TooClose(a.symbol, b.symbol));
            }
        }
    }
    Ok(())
}
