// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and compression settings.

use crate::error::{Result, VqError};

/// Leading byte of every compressed file.
pub const FORMAT_TAG: u8 = b'J';

/// Size in bytes of the fixed header (tag + seven u16 fields).
pub const HEADER_SIZE: usize = 1 + 7 * 2;

/// Width in bits of one packed label word.
pub const WORD_BITS: u32 = 16;

/// Largest supported codebook.
pub const MAX_CODEBOOK_SIZE: u32 = 1 << WORD_BITS;

/// Channels per pixel (RGB).
pub const CHANNELS: usize = 3;

/// Lloyd iterations used when the caller does not choose.
pub const DEFAULT_MAX_ITERS: usize = 10;

/// Seed for centroid sampling when the caller does not choose.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Settings for one compress request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressConfig {
    pub k: u32,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub max_iters: usize,
    pub seed: u64,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            k: 16,
            width: 0,
            height: 0,
            tile_width: 1,
            tile_height: 1,
            max_iters: DEFAULT_MAX_ITERS,
            seed: DEFAULT_SEED,
        }
    }
}

impl CompressConfig {
    /// Rejects every setting that would fail later in clustering or encoding.
    pub fn validate(&self) -> Result<()> {
        check_geometry(self.width, self.height, self.tile_width, self.tile_height)?;
        check_codebook_size(self.k)?;
        Ok(())
    }

    /// Number of values in one tile vector.
    pub fn tile_len(&self) -> usize {
        self.tile_width as usize * self.tile_height as usize * CHANNELS
    }

    /// Number of tiles in the image.
    pub fn vector_count(&self) -> usize {
        (self.width / self.tile_width) as usize * (self.height / self.tile_height) as usize
    }
}

/// Image and tile sizes must be non-zero, divisible, and fit the u16 header fields.
pub fn check_geometry(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Result<()> {
    if width == 0 || height == 0 || tile_width == 0 || tile_height == 0 {
        return Err(VqError::InvalidConfig(format!(
            "dimensions must be non-zero (image {}x{}, tile {}x{})",
            width, height, tile_width, tile_height
        )));
    }
    if width % tile_width != 0 || height % tile_height != 0 {
        return Err(VqError::IndivisibleDimensions {
            width,
            height,
            tile_width,
            tile_height,
        });
    }
    let tile_bytes = tile_width as u64 * tile_height as u64 * CHANNELS as u64;
    for (field, value) in [
        ("width", width as u64),
        ("height", height as u64),
        ("tile_width", tile_width as u64),
        ("tile_height", tile_height as u64),
        ("tile_byte_size", tile_bytes),
    ] {
        if value > u16::MAX as u64 {
            return Err(VqError::FieldOverflow { field, value });
        }
    }
    Ok(())
}

/// `k` must lie in `[1, 65536]` and be a power of two.
///
/// Labels are stored with `floor(log2(k))` bits, so any other `k` would alias the
/// upper centroid indices onto lower ones.
pub fn check_codebook_size(k: u32) -> Result<()> {
    if k == 0 || k > MAX_CODEBOOK_SIZE {
        return Err(VqError::CodebookSizeOutOfRange(k));
    }
    if !k.is_power_of_two() {
        return Err(VqError::NonPowerOfTwoCodebook(k));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(k: u32, w: u32, h: u32, tw: u32, th: u32) -> CompressConfig {
        CompressConfig {
            k,
            width: w,
            height: h,
            tile_width: tw,
            tile_height: th,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let c = cfg(16, 64, 32, 4, 2);
        c.validate().unwrap();
        assert_eq!(c.tile_len(), 24);
        assert_eq!(c.vector_count(), 16 * 16);
    }

    #[test]
    fn test_indivisible_dimensions() {
        let err = cfg(16, 65, 32, 4, 2).validate().unwrap_err();
        assert!(matches!(err, VqError::IndivisibleDimensions { width: 65, .. }));
    }

    #[test]
    fn test_codebook_bounds() {
        assert!(matches!(check_codebook_size(0), Err(VqError::CodebookSizeOutOfRange(0))));
        assert!(matches!(
            check_codebook_size(MAX_CODEBOOK_SIZE * 2),
            Err(VqError::CodebookSizeOutOfRange(_))
        ));
        check_codebook_size(1).unwrap();
        check_codebook_size(MAX_CODEBOOK_SIZE).unwrap();
    }

    #[test]
    fn test_non_power_of_two_rejected() {
        let err = cfg(10, 8, 8, 1, 1).validate().unwrap_err();
        assert!(matches!(err, VqError::NonPowerOfTwoCodebook(10)));
    }

    #[test]
    fn test_header_field_overflow() {
        let err = cfg(4, 70000, 2, 1, 1).validate().unwrap_err();
        assert!(matches!(err, VqError::FieldOverflow { field: "width", .. }));
    }
}
