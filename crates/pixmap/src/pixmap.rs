use crate::error::{PixmapError, Result};
use crate::geometry::TileGeometry;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use vqpix_kernel::codec::encode::channel_byte;
use vqpix_kernel::config::CHANNELS;
use vqpix_kernel::types::Label;
use vqpix_kernel::Matrix;

/// Splits a raw row-major RGB buffer into one vector per tile.
pub fn vectors_from_pixels(pixels: &[u8], geometry: &TileGeometry) -> Result<Matrix> {
    if pixels.len() < geometry.image_len() {
        return Err(PixmapError::Shape(format!(
            "pixel buffer holds {} bytes, image needs {}",
            pixels.len(),
            geometry.image_len()
        )));
    }
    let mut data = Vec::with_capacity(geometry.tile_count() * geometry.tile_len());
    for tile in 0..geometry.tile_count() {
        for p in geometry.pixel_indices(tile) {
            data.extend(pixels[p * CHANNELS..(p + 1) * CHANNELS].iter().map(|&b| f64::from(b)));
        }
    }
    Matrix::from_vec(data, geometry.tile_len()).map_err(|e| PixmapError::Shape(e.to_string()))
}

/// Lays tiles back out into a row-major RGB buffer. `tile_at(i)` yields the vector
/// for tile `i`; values are truncated to bytes.
pub fn pixels_from_tiles<'a, F>(geometry: &TileGeometry, tile_at: F) -> Vec<u8>
where
    F: Fn(usize) -> &'a [f64],
{
    let mut pixels = vec![0u8; geometry.image_len()];
    for tile in 0..geometry.tile_count() {
        let values = tile_at(tile);
        for (j, p) in geometry.pixel_indices(tile).enumerate() {
            for c in 0..CHANNELS {
                pixels[p * CHANNELS + c] = channel_byte(values[j * CHANNELS + c]);
            }
        }
    }
    pixels
}

/// Loads a raw pixmap and returns its tile vectors.
pub fn load_vectors(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
) -> Result<Matrix> {
    let geometry = TileGeometry::new(width, height, tile_width, tile_height)?;
    let path = path.as_ref();
    let pixels = fs::read(path).map_err(|e| PixmapError::file("read", path, e))?;
    if pixels.len() < geometry.image_len() {
        return Err(PixmapError::ShortImage {
            path: path.to_path_buf(),
            expected: geometry.image_len(),
            found: pixels.len(),
        });
    }
    if pixels.len() > geometry.image_len() {
        tracing::warn!(
            path = %path.display(),
            extra = pixels.len() - geometry.image_len(),
            "pixmap larger than {}x{}, ignoring the rest",
            width,
            height
        );
    }
    let vectors = vectors_from_pixels(&pixels, &geometry)?;
    tracing::debug!(path = %path.display(), tiles = vectors.rows(), dim = vectors.cols(), "loaded pixmap");
    Ok(vectors)
}

/// Writes the image reconstructed from a codebook and per-tile labels.
pub fn store_vectors(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    codebook: &Matrix,
    labels: &[Label],
) -> Result<()> {
    let geometry = TileGeometry::new(width, height, tile_width, tile_height)?;
    if codebook.cols() != geometry.tile_len() {
        return Err(PixmapError::Shape(format!(
            "codebook tiles hold {} values, geometry needs {}",
            codebook.cols(),
            geometry.tile_len()
        )));
    }
    if labels.len() != geometry.tile_count() {
        return Err(PixmapError::Shape(format!(
            "{} labels for {} tiles",
            labels.len(),
            geometry.tile_count()
        )));
    }
    let k = codebook.rows();
    if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l as usize >= k) {
        return Err(PixmapError::LabelOutOfRange { index, label, k });
    }

    let pixels = pixels_from_tiles(&geometry, |tile| codebook.row(labels[tile] as usize));
    write_pixels(path.as_ref(), &pixels)
}

/// Writes tile vectors straight back out, without a codebook.
pub fn store_raw(
    path: impl AsRef<Path>,
    vectors: &Matrix,
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
) -> Result<()> {
    let geometry = TileGeometry::new(width, height, tile_width, tile_height)?;
    if vectors.rows() != geometry.tile_count() || vectors.cols() != geometry.tile_len() {
        return Err(PixmapError::Shape(format!(
            "{}x{} vectors, geometry needs {}x{}",
            vectors.rows(),
            vectors.cols(),
            geometry.tile_count(),
            geometry.tile_len()
        )));
    }
    let pixels = pixels_from_tiles(&geometry, |tile| vectors.row(tile));
    write_pixels(path.as_ref(), &pixels)
}

fn write_pixels(path: &Path, pixels: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| PixmapError::file("create", path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(pixels)
        .and_then(|_| writer.flush())
        .map_err(|e| PixmapError::file("write", path, e))?;
    tracing::debug!(path = %path.display(), bytes = pixels.len(), "wrote pixmap");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_follow_tile_order() {
        // 2x2 image, pixel p has channels (p, p + 10, p + 20)
        let pixels: Vec<u8> = (0..4u8).flat_map(|p| [p, p + 10, p + 20]).collect();
        let g = TileGeometry::new(2, 2, 2, 1).unwrap();
        let v = vectors_from_pixels(&pixels, &g).unwrap();
        assert_eq!(v.rows(), 2);
        assert_eq!(v.row(0), &[0.0, 10.0, 20.0, 1.0, 11.0, 21.0]);
        assert_eq!(v.row(1), &[2.0, 12.0, 22.0, 3.0, 13.0, 23.0]);
    }

    #[test]
    fn test_tiles_reassemble_to_same_pixels() {
        let pixels: Vec<u8> = (0..6 * 4 * 3).map(|i| (i * 5 % 256) as u8).collect();
        let g = TileGeometry::new(6, 4, 3, 2).unwrap();
        let v = vectors_from_pixels(&pixels, &g).unwrap();
        assert_eq!(pixels_from_tiles(&g, |t| v.row(t)), pixels);
    }

    #[test]
    fn test_label_outside_codebook() {
        let dir = tempfile::tempdir().unwrap();
        let codebook = Matrix::zeros(2, 3);
        let err = store_vectors(dir.path().join("o.rgb"), 2, 1, 1, 1, &codebook, &[0, 5]).unwrap_err();
        assert!(matches!(err, PixmapError::LabelOutOfRange { index: 1, label: 5, k: 2 }));
    }
}
