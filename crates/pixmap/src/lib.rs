//! Raw RGB pixmap I/O and the tile geometry that maps pixels to clustering vectors.

pub mod error;
pub mod geometry;
pub mod pixmap;
pub mod dump;
pub mod fixtures;

pub use error::{PixmapError, Result};
pub use geometry::TileGeometry;
pub use pixmap::{load_vectors, store_raw, store_vectors};
