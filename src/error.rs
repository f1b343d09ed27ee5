// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VqError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Image {width}x{height} is not divisible into {tile_width}x{tile_height} tiles")]
    IndivisibleDimensions {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },
    #[error("Codebook size {0} outside [1, 65536]")]
    CodebookSizeOutOfRange(u32),
    #[error("Codebook size {0} is not a power of two; labels at or above 2^floor(log2(k)) cannot be stored")]
    NonPowerOfTwoCodebook(u32),
    #[error("Header field {field} = {value} does not fit in 16 bits")]
    FieldOverflow { field: &'static str, value: u64 },
    #[error("Cannot cluster an empty vector set")]
    EmptyVectorSet,
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Label {label} at position {index} is outside the codebook of size {k}")]
    LabelOutOfRange { index: usize, label: u32, k: u32 },
    #[error("Failed to {op} {path}: {source}")]
    File {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Corrupt compressed data: {0}")]
    Format(#[from] FormatError),
}

/// Malformed or truncated compressed data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unknown format tag 0x{0:02x}")]
    UnknownTag(u8),
    #[error("Truncated header: expected {expected} bytes, found {found}")]
    TruncatedHeader { expected: usize, found: usize },
    #[error("Malformed header: {0}")]
    MalformedHeader(String),
    #[error("Truncated codebook: expected {expected} bytes, found {found}")]
    TruncatedCodebook { expected: usize, found: usize },
    #[error("Short read inside label word {word}: {found} of 2 bytes")]
    PartialLabelWord { word: usize, found: usize },
    #[error("Label stream ended at a word boundary: expected {expected} words, found {found}")]
    MissingLabelWords { expected: usize, found: usize },
    #[error("Decoded label {label} at position {index} exceeds codebook of size {k}")]
    LabelOutOfRange { index: usize, label: u32, k: u32 },
}

impl VqError {
    /// Wraps an I/O failure on `path`.
    pub fn file(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        VqError::File {
            op,
            path: path.into(),
            source,
        }
    }

    /// True when the input bytes were readable but not a valid compressed stream.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, VqError::Format(_))
    }
}

pub type Result<T> = std::result::Result<T, VqError>;
