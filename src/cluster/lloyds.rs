// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

use super::ClusterResult;
use crate::error::{Result, VqError};
use crate::types::matrix::{l2_sq, Matrix};
use crate::types::Label;
use rand::Rng;

/// Working state of one Lloyd's run.
///
/// Owns its centroid, label and distance buffers. The input vectors are only borrowed
/// and never aliased: centroids start as copies and are recomputed as means.
pub struct Lloyds<'a> {
    vectors: &'a Matrix,
    centroids: Matrix,
    labels: Vec<Label>,
    min_dist: Vec<f64>,
    iterations: usize,
    converged: bool,
}

impl<'a> Lloyds<'a> {
    /// Samples `k` initial centroids uniformly with replacement and assigns labels.
    pub fn new<R: Rng + ?Sized>(vectors: &'a Matrix, k: usize, rng: &mut R) -> Result<Self> {
        if k == 0 {
            return Err(VqError::InvalidConfig("k must be at least 1".to_string()));
        }
        let m = vectors.rows();
        if m == 0 {
            return Err(VqError::EmptyVectorSet);
        }

        let mut centroids = Matrix::zeros(k, vectors.cols());
        for c in 0..k {
            let r = rng.gen_range(0..m);
            centroids.row_mut(c).copy_from_slice(vectors.row(r));
        }

        Ok(Self::init(vectors, centroids))
    }

    /// Starts from caller-chosen centroids instead of random samples.
    pub fn with_centroids(vectors: &'a Matrix, centroids: Matrix) -> Result<Self> {
        if centroids.rows() == 0 {
            return Err(VqError::InvalidConfig("k must be at least 1".to_string()));
        }
        if vectors.rows() == 0 {
            return Err(VqError::EmptyVectorSet);
        }
        if centroids.cols() != vectors.cols() {
            return Err(VqError::DimensionMismatch {
                expected: vectors.cols(),
                found: centroids.cols(),
            });
        }
        Ok(Self::init(vectors, centroids))
    }

    fn init(vectors: &'a Matrix, centroids: Matrix) -> Self {
        let m = vectors.rows();
        let mut engine = Self {
            vectors,
            centroids,
            labels: vec![0; m],
            min_dist: vec![f64::MAX; m],
            iterations: 0,
            converged: false,
        };
        engine.assign();
        engine
    }

    /// Runs until convergence or `max_iters` iterations, whichever comes first.
    pub fn run(mut self, max_iters: usize) -> ClusterResult {
        while !self.converged && self.iterations < max_iters {
            self.step();
        }
        self.finish()
    }

    /// One Lloyd iteration: recompute every centroid, then reassign every vector.
    ///
    /// The update phase completes before any label is read back. Returns whether any
    /// label changed.
    pub fn step(&mut self) -> bool {
        self.update_centroids();
        let changed = self.update_labels();
        self.iterations += 1;
        self.converged = !changed;
        tracing::debug!(
            iteration = self.iterations,
            changed,
            inertia = self.inertia(),
            "lloyd iteration"
        );
        changed
    }

    /// Sets each centroid to the mean of its members. A centroid without members
    /// becomes the zero vector.
    pub(crate) fn update_centroids(&mut self) {
        let k = self.centroids.rows();
        let mut counts = vec![0usize; k];

        self.centroids.fill_zero();
        for (row, &label) in self.vectors.iter_rows().zip(&self.labels) {
            let c = label as usize;
            counts[c] += 1;
            for (acc, &x) in self.centroids.row_mut(c).iter_mut().zip(row) {
                *acc += x;
            }
        }

        for (c, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let denom = count as f64;
            for v in self.centroids.row_mut(c).iter_mut() {
                *v /= denom;
            }
        }
    }

    /// Reassigns every vector to its nearest centroid. Returns true when at least one
    /// vector's new label differs from its previous one.
    pub(crate) fn update_labels(&mut self) -> bool {
        let mut changed = false;
        for i in 0..self.labels.len() {
            let previous = self.labels[i];
            self.min_dist[i] = f64::MAX;
            self.nearest(i);
            changed |= self.labels[i] != previous;
        }
        changed
    }

    fn assign(&mut self) {
        for i in 0..self.labels.len() {
            self.nearest(i);
        }
    }

    // Ties keep the lowest centroid index: only a strictly smaller distance wins.
    fn nearest(&mut self, i: usize) {
        let x = self.vectors.row(i);
        for (c, centroid) in self.centroids.iter_rows().enumerate() {
            let d = l2_sq(x, centroid);
            if d < self.min_dist[i] {
                self.min_dist[i] = d;
                self.labels[i] = c as Label;
            }
        }
    }

    /// Sum of squared distances from each vector to its current centroid.
    pub fn inertia(&self) -> f64 {
        self.vectors
            .iter_rows()
            .zip(&self.labels)
            .map(|(x, &l)| l2_sq(x, self.centroids.row(l as usize)))
            .sum()
    }

    pub fn centroids(&self) -> &Matrix {
        &self.centroids
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Hands back owned copies of the codebook and labels.
    pub fn finish(self) -> ClusterResult {
        let inertia = self.inertia();
        tracing::info!(
            k = self.centroids.rows(),
            vectors = self.labels.len(),
            iterations = self.iterations,
            converged = self.converged,
            inertia,
            "clustering finished"
        );
        ClusterResult {
            codebook: self.centroids,
            labels: self.labels,
            inertia,
            iterations: self.iterations,
            converged: self.converged,
        }
    }
}
