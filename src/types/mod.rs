// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod matrix;

/// Index of a centroid in the codebook.
pub type Label = u32;
