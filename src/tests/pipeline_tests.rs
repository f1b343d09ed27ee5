use crate::cluster::run;
use crate::codec::{decode_slice, Compressed, Header};
use crate::config::CompressConfig;
use crate::types::matrix::Matrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 1x1 tiles of four flat colours, repeated.
fn palette_vectors(count: usize) -> Matrix {
    let colours = [[255.0, 0.0, 0.0], [0.0, 255.0, 0.0], [0.0, 0.0, 255.0], [40.0, 40.0, 40.0]];
    let rows: Vec<[f64; 3]> = (0..count).map(|i| colours[(i * 7) % 4]).collect();
    Matrix::from_rows(&rows).unwrap()
}

#[test]
fn test_cluster_then_encode_round_trip() {
    let cfg = CompressConfig {
        k: 4,
        width: 8,
        height: 8,
        tile_width: 1,
        tile_height: 1,
        ..Default::default()
    };
    cfg.validate().unwrap();

    let vectors = palette_vectors(cfg.vector_count());
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let result = run(&vectors, cfg.k as usize, cfg.max_iters, &mut rng).unwrap();

    let header = Header::new(cfg.width, cfg.height, cfg.tile_width, cfg.tile_height, cfg.k).unwrap();
    let compressed = Compressed::from_cluster(header, result.clone()).unwrap();
    let decoded = decode_slice(&compressed.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded.labels, result.labels);
    for (c, centroid) in result.codebook.iter_rows().enumerate() {
        let stored = decoded.codebook.row(c);
        for (&s, &v) in stored.iter().zip(centroid) {
            assert_eq!(s, v.trunc());
        }
    }
}

#[test]
fn test_from_cluster_rejects_shape_mismatch() {
    let vectors = palette_vectors(16);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let result = run(&vectors, 4, 10, &mut rng).unwrap();

    // header claims 8x8 = 64 tiles but only 16 labels exist
    let header = Header::new(8, 8, 1, 1, 4).unwrap();
    assert!(Compressed::from_cluster(header, result).is_err());
}
