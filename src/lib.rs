// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! vqpix-kernel: tile vector quantization. Lloyd's k-means over image tiles and the
//! packed binary codec for the resulting codebook and label stream.

pub mod config;
pub mod error;
pub mod types;
pub mod cluster;
pub mod codec;

#[cfg(test)]
pub mod tests;

pub use cluster::{run, ClusterResult, Lloyds};
pub use codec::{Compressed, Header};
pub use config::CompressConfig;
pub use error::{FormatError, Result, VqError};
pub use types::matrix::Matrix;
