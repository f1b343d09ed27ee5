use crate::error::{PixmapError, Result};
use vqpix_kernel::config::CHANNELS;

/// Partition of a `width x height` image into `tile_width x tile_height` tiles.
///
/// Tiles are numbered row-major across the image; inside a tile, pixels are also
/// taken row-major, three channel bytes each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileGeometry {
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Result<Self> {
        if width == 0 || height == 0 || tile_width == 0 || tile_height == 0 {
            return Err(PixmapError::ZeroDimension);
        }
        if width % tile_width != 0 || height % tile_height != 0 {
            return Err(PixmapError::Indivisible {
                width,
                height,
                tile_width,
                tile_height,
            });
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
        })
    }

    pub fn tiles_per_row(&self) -> usize {
        (self.width / self.tile_width) as usize
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_per_row() * (self.height / self.tile_height) as usize
    }

    /// Values in one tile vector.
    pub fn tile_len(&self) -> usize {
        self.tile_width as usize * self.tile_height as usize * CHANNELS
    }

    /// Bytes in the whole pixmap.
    pub fn image_len(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS
    }

    /// Pixel indices (not byte offsets) covered by `tile`, in vector order.
    pub fn pixel_indices(&self, tile: usize) -> impl Iterator<Item = usize> + '_ {
        let row = tile / self.tiles_per_row();
        let col = tile % self.tiles_per_row();
        let w = self.width as usize;
        let tw = self.tile_width as usize;
        let origin = row * self.tile_height as usize * w + col * tw;
        (0..self.tile_height as usize).flat_map(move |dy| (0..tw).map(move |dx| origin + dy * w + dx))
    }
}
