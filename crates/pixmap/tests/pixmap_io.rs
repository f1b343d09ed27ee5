use tempfile::tempdir;
use vqpix_kernel::Matrix;
use vqpix_pixmap::{fixtures, load_vectors, store_raw, store_vectors, PixmapError, TileGeometry};

#[test]
fn test_raw_round_trip_is_lossless() {
    let dir = tempdir().unwrap();
    let image = fixtures::write_image(dir.path(), "in.rgb", 12, 8, fixtures::gradient(12, 8)).unwrap();

    let vectors = load_vectors(&image.path, 12, 8, 3, 2).unwrap();
    assert_eq!(vectors.rows(), 4 * 4);
    assert_eq!(vectors.cols(), 3 * 2 * 3);

    let out = dir.path().join("out.rgb");
    store_raw(&out, &vectors, 12, 8, 3, 2).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), image.pixels);
}

#[test]
fn test_store_from_codebook() {
    let dir = tempdir().unwrap();
    // 2x2 image of 1x2 tiles: left column red, right column blue
    let codebook = Matrix::from_rows(&[
        [255.0, 0.0, 0.0, 255.0, 0.0, 0.0],
        [0.0, 0.0, 255.0, 0.0, 0.0, 255.0],
    ])
    .unwrap();
    let out = dir.path().join("out.rgb");
    store_vectors(&out, 2, 2, 1, 2, &codebook, &[0, 1]).unwrap();
    assert_eq!(
        std::fs::read(&out).unwrap(),
        vec![255, 0, 0, 0, 0, 255, 255, 0, 0, 0, 0, 255]
    );
}

#[test]
fn test_flat_tiles_fixture_has_few_distinct_tiles() {
    let g = TileGeometry::new(16, 16, 4, 4).unwrap();
    let pixels = fixtures::flat_tiles(&g, 4);
    let vectors = vqpix_pixmap::pixmap::vectors_from_pixels(&pixels, &g).unwrap();
    let mut distinct: Vec<&[f64]> = Vec::new();
    for row in vectors.iter_rows() {
        if !distinct.contains(&row) {
            distinct.push(row);
        }
    }
    assert!(distinct.len() <= 4);
}

#[test]
fn test_short_pixmap() {
    let dir = tempdir().unwrap();
    let image = fixtures::write_image(dir.path(), "short.rgb", 4, 4, vec![0u8; 20]).unwrap();
    let err = load_vectors(&image.path, 4, 4, 1, 1).unwrap_err();
    assert!(matches!(err, PixmapError::ShortImage { expected: 48, found: 20, .. }));
}

#[test]
fn test_missing_pixmap_names_path() {
    let dir = tempdir().unwrap();
    let err = load_vectors(dir.path().join("nope.rgb"), 4, 4, 1, 1).unwrap_err();
    assert!(matches!(err, PixmapError::File { op: "read", .. }));
    assert!(err.to_string().contains("nope.rgb"));
}

#[test]
fn test_indivisible_geometry_rejected_everywhere() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.rgb");
    assert!(matches!(
        load_vectors(&path, 5, 4, 2, 2),
        Err(PixmapError::Indivisible { .. })
    ));
    assert!(matches!(
        store_vectors(&path, 5, 4, 2, 2, &Matrix::zeros(1, 12), &[]),
        Err(PixmapError::Indivisible { .. })
    ));
    assert!(matches!(
        store_raw(&path, &Matrix::zeros(1, 12), 4, 5, 2, 2),
        Err(PixmapError::Indivisible { .. })
    ));
}
