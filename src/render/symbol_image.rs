//! Symbol images and the library that supplies them.
//!
//! A `SymbolImage` is decoded once, masked to a circle and then never
//! modified: renderers scale and rotate copies, so one image can be drawn on
//! many cards at once.

use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::core::{DeckError, SupplyError, SymbolId};

/// File extensions recognised as symbol images.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Immutable, circularly masked symbol image.
#[derive(Clone, Debug)]
pub struct SymbolImage {
    name: String,
    pixels: Arc<RgbaImage>,
}

impl SymbolImage {
    /// Decode an image file and mask it to a circle.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let decoded = image::open(path).map_err(|source| DeckError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_rgba(name, decoded.to_rgba8()))
    }

    /// Mask an in-memory image to a circle.
    #[must_use]
    pub fn from_rgba(name: impl Into<String>, mut pixels: RgbaImage) -> Self {
        crop_circle(&mut pixels);
        Self {
            name: name.into(),
            pixels: Arc::new(pixels),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Make everything outside the inscribed ellipse transparent.
fn crop_circle(img: &mut RgbaImage) {
    let rx = f64::from(img.width()) / 2.0;
    let ry = f64::from(img.height()) / 2.0;
    if rx == 0.0 || ry == 0.0 {
        return;
    }
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = (f64::from(x) + 0.5 - rx) / rx;
        let dy = (f64::from(y) + 0.5 - ry) / ry;
        if dx * dx + dy * dy > 1.0 {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
}

/// The pool of symbol images, indexed by symbol id.
///
/// Symbol `i` resolves to the `i`-th image (1-based).
#[derive(Clone, Debug, Default)]
pub struct SymbolLibrary {
    images: Vec<SymbolImage>,
}

impl SymbolLibrary {
    /// Create a library from images already in memory.
    #[must_use]
    pub fn new(images: Vec<SymbolImage>) -> Self {
        Self { images }
    }

    /// Load every image in a directory, in file name order.
    ///
    /// Files that fail to decode are logged and skipped.
    pub fn load_dir(dir: &Path) -> Result<Self, DeckError> {
        let entries = std::fs::read_dir(dir).map_err(|e| DeckError::io(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| DeckError::io(dir, e))?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            match SymbolImage::load(path) {
                Ok(image) => images.push(image),
                Err(err) => warn!(%err, "skipping unreadable image"),
            }
        }

        debug!(dir = %dir.display(), loaded = images.len(), "symbol images loaded");
        Ok(Self::new(images))
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image for a symbol.
    #[must_use]
    pub fn resolve(&self, symbol: SymbolId) -> Option<&SymbolImage> {
        symbol.checked_index().and_then(|i| self.images.get(i))
    }

    /// Ensure at least `required` images are available.
    ///
    /// Fails by default. With `allow_reuse`, a non-empty library is padded
    /// by cycling through its own images, and a warning is logged.
    pub fn ensure_supply(mut self, required: usize, allow_reuse: bool) -> Result<Self, SupplyError> {
        let available = self.images.len();
        if available >= required {
            return Ok(self);
        }
        if !allow_reuse || available == 0 {
            return Err(SupplyError { required, available });
        }

        warn!(required, available, "reusing symbol images to complete the deck");
        for i in 0..(required - available) {
            let image = self.images[i % available].clone();
            self.images.push(image);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(name: &str, size: u32) -> SymbolImage {
        SymbolImage::from_rgba(name, RgbaImage::from_pixel(size, size, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_crop_circle() {
        let image = solid("red", 10);

        assert_eq!(image.pixels().get_pixel(0, 0)[3], 0);
        assert_eq!(image.pixels().get_pixel(9, 9)[3], 0);
        assert_eq!(image.pixels().get_pixel(5, 5)[3], 255);
        assert_eq!(image.pixels().get_pixel(5, 0)[3], 255);
    }

    #[test]
    fn test_resolve_is_one_based() {
        let library = SymbolLibrary::new(vec![solid("a", 4), solid("b", 4)]);

        assert_eq!(library.resolve(SymbolId::new(1)).map(|i| i.name()), Some("a"));
        assert_eq!(library.resolve(SymbolId::new(2)).map(|i| i.name()), Some("b"));
        assert!(library.resolve(SymbolId::new(0)).is_none());
        assert!(library.resolve(SymbolId::new(3)).is_none());
    }

    #[test]
    fn test_insufficient_supply_is_fatal_by_default() {
        let library = SymbolLibrary::new(vec![solid("a", 4)]);

        let err = library.ensure_supply(3, false).unwrap_err();
        assert_eq!(err, SupplyError { required: 3, available: 1 });
    }

    #[test]
    fn test_reuse_pads_cyclically() {
        let library = SymbolLibrary::new(vec![solid("a", 4), solid("b", 4)]);

        let padded = library.ensure_supply(5, true).unwrap();

        assert_eq!(padded.len(), 5);
        let names: Vec<_> = (1..=5)
            .map(|i| padded.resolve(SymbolId::new(i)).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn test_reuse_cannot_pad_empty_library() {
        let err = SymbolLibrary::default().ensure_supply(3, true).unwrap_err();
        assert_eq!(err.available, 0);
    }

    #[test]
    fn test_extension_filter() {
        assert!(has_image_extension(Path::new("cat.PNG")));
        assert!(has_image_extension(Path::new("dog.jpeg")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("README")));
    }
}
