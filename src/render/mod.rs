//! Symbol images in, card images out.
//!
//! - `SymbolImage`: immutable, circularly masked symbol
//! - `SymbolLibrary`: directory-loaded pool, indexed by symbol id
//! - `PngCardWriter`: composites a laid-out card and saves it

pub mod symbol_image;
pub mod writer;

pub use symbol_image::{SymbolImage, SymbolLibrary, IMAGE_EXTENSIONS};
pub use writer::PngCardWriter;
