//! Symbol placement on a circular card.
//!
//! ## Key Types
//!
//! - `PlacementEngine`: lays out one card and checks the result
//! - `LayoutStrategy`: `PackedLayout` (circle packing) or `RejectionLayout`
//!   (random positions under a retry budget)
//! - `Placement`: position, radius and rotation of one symbol
//! - `CardDisk`: card diameter and edge margin in pixels
//!
//! Every accepted layout keeps all symbols inside the disk minus margin and
//! keeps `distance >= (r1 + r2) * 1.05` between any two symbols.

pub mod engine;
pub mod geometry;
pub mod pack;
pub mod strategy;

pub use engine::PlacementEngine;
pub use geometry::{verify_layout, CardDisk, Circle, LayoutViolation, Placement, CLEARANCE_FACTOR};
pub use pack::pack;
pub use strategy::{LayoutStrategy, PackedLayout, RejectionLayout, RejectionParams};
