use crate::error::{PixmapError, Result};
use crate::geometry::TileGeometry;

use std::fs;
use std::path::{Path, PathBuf};

pub struct TestImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Image whose tiles use at most `colours` distinct flat colours, so a codebook of that
/// size reproduces it exactly.
pub fn flat_tiles(geometry: &TileGeometry, colours: usize) -> Vec<u8> {
    let palette: Vec<[u8; 3]> = (0..colours.max(1))
        .map(|c| {
            let c = c as u32;
            [(c * 67 % 256) as u8, (c * 131 % 256) as u8, (c * 29 % 256) as u8]
        })
        .collect();

    let mut pixels = vec![0u8; geometry.image_len()];
    for tile in 0..geometry.tile_count() {
        let colour = palette[(tile * 5 + tile / 3) % palette.len()];
        for p in geometry.pixel_indices(tile) {
            pixels[p * 3..p * 3 + 3].copy_from_slice(&colour);
        }
    }
    pixels
}

/// Smooth diagonal gradient; exercises lossy clustering.
pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) * 255 / (width + height).max(1)) as u8;
            pixels.extend_from_slice(&[r, g, b]);
        }
    }
    pixels
}

pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, pixels: Vec<u8>) -> Result<TestImage> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| PixmapError::file("create", dir, e))?;
    }
    let path = dir.join(name);
    fs::write(&path, &pixels).map_err(|e| PixmapError::file("write", &path, e))?;
    Ok(TestImage {
        path,
        width,
        height,
        pixels,
    })
}
