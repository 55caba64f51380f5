//! PNG compositor for laid-out cards.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use super::symbol_image::SymbolImage;
use crate::core::{DeckConfig, DeckError};
use crate::orchestrator::CardSink;
use crate::placement::Placement;

const CARD_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CARD_BORDER: Rgba<u8> = Rgba([50, 50, 50, 255]);

/// Draws each card and saves it as `card_NN.png`.
#[derive(Clone, Debug)]
pub struct PngCardWriter {
    card_dir: PathBuf,
    diameter_px: u32,
}

impl PngCardWriter {
    #[must_use]
    pub fn new(card_dir: impl Into<PathBuf>, diameter_px: u32) -> Self {
        Self {
            card_dir: card_dir.into(),
            diameter_px,
        }
    }

    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.card_dir(), config.card_diameter_px())
    }

    /// Directory cards are written to.
    #[must_use]
    pub fn card_dir(&self) -> &Path {
        &self.card_dir
    }

    /// File a card is written to (1-based, zero padded).
    #[must_use]
    pub fn card_path(&self, card_index: usize) -> PathBuf {
        self.card_dir.join(format!("card_{:02}.png", card_index + 1))
    }

    /// Draw a card: blank disk, then every symbol scaled and rotated.
    #[must_use]
    pub fn compose(&self, placements: &[Placement], images: &[&SymbolImage]) -> RgbaImage {
        let mut canvas = blank_card(self.diameter_px);

        for (placement, image) in placements.iter().zip(images) {
            let size = (placement.radius * 2.0).round().max(1.0) as u32;
            let scaled = imageops::resize(image.pixels(), size, size, FilterType::Lanczos3);
            let rotated = rotate_about_center(&scaled, placement.rotation);
            let left = (placement.x - f64::from(size) / 2.0).round() as i64;
            let top = (placement.y - f64::from(size) / 2.0).round() as i64;
            imageops::overlay(&mut canvas, &rotated, left, top);
        }
        canvas
    }
}

impl CardSink for PngCardWriter {
    fn emit(
        &mut self,
        card_index: usize,
        placements: &[Placement],
        images: &[&SymbolImage],
    ) -> Result<(), DeckError> {
        let path = self.card_path(card_index);
        self.compose(placements, images)
            .save(&path)
            .map_err(|source| DeckError::Image {
                path: path.clone(),
                source,
            })?;
        debug!(card = card_index, path = %path.display(), "card written");
        Ok(())
    }
}

/// Transparent square with a white disk and a thin dark outline.
fn blank_card(diameter: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(diameter, diameter);
    let border = f64::from((diameter / 200).max(2));
    let center = f64::from(diameter) / 2.0;
    let outer = center - border / 2.0;

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let d = (f64::from(x) + 0.5 - center).hypot(f64::from(y) + 0.5 - center);
        if d <= outer - border {
            *pixel = CARD_FILL;
        } else if d <= outer {
            *pixel = CARD_BORDER;
        }
    }
    canvas
}

/// Rotate counter-clockwise by `degrees` about the centre, keeping the size.
///
/// Nearest-neighbour sampling; uncovered pixels are transparent.
fn rotate_about_center(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let (w, h) = src.dimensions();
    let (sin, cos) = degrees.to_radians().sin_cos();
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;

    RgbaImage::from_fn(w, h, |x, y| {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        let sx = (dx * cos - dy * sin + cx).floor();
        let sy = (dx * sin + dy * cos + cy).floor();
        if sx >= 0.0 && sy >= 0.0 && sx < f64::from(w) && sy < f64::from(h) {
            *src.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
