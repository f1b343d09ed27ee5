// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Lloyd's k-means over tile vectors.
//!
//! [`run`] is the one-shot entry point. [`Lloyds`] drives the same algorithm one
//! iteration at a time for callers that want to observe or stop between iterations.

pub mod lloyds;

pub use lloyds::Lloyds;

use crate::error::Result;
use crate::types::matrix::Matrix;
use crate::types::Label;
use rand::Rng;

/// Codebook and assignments produced by one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterResult {
    /// `k` centroids, one per row.
    pub codebook: Matrix,
    /// Centroid index for every input vector, in input order.
    pub labels: Vec<Label>,
    /// Sum of squared distances from each vector to its centroid. Lower is better.
    pub inertia: f64,
    /// Lloyd iterations actually performed.
    pub iterations: usize,
    /// True when the last iteration changed no label.
    pub converged: bool,
}

/// Clusters `vectors` into `k` centroids with at most `max_iters` Lloyd iterations.
///
/// Initial centroids are sampled with replacement from `vectors` using `rng`, so the
/// result is reproducible for a seeded generator.
pub fn run<R: Rng + ?Sized>(
    vectors: &Matrix,
    k: usize,
    max_iters: usize,
    rng: &mut R,
) -> Result<ClusterResult> {
    let engine = Lloyds::new(vectors, k, rng)?;
    Ok(engine.run(max_iters))
}
