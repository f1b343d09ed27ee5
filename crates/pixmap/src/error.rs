use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixmapError {
    #[error("Tile and image dimensions must be non-zero")]
    ZeroDimension,
    #[error("Image {width}x{height} is not divisible into {tile_width}x{tile_height} tiles")]
    Indivisible {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },
    #[error("Pixmap {path} is too short: expected {expected} bytes, found {found}")]
    ShortImage {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("Shape mismatch: {0}")]
    Shape(String),
    #[error("Label {label} at tile {index} outside codebook of size {k}")]
    LabelOutOfRange { index: usize, label: u32, k: usize },
    #[error("Failed to {op} {path}: {source}")]
    File {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PixmapError {
    pub fn file(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        PixmapError::File {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PixmapError>;
