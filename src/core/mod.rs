// mod.rs - Core logic module

pub mod costs;
pub mod distance;
pub mod error;
pub mod matrix;

// Re-export main types for convenience
pub use costs::{SubstitutionCostTable, AMINO_ACIDS, PRESETS};
pub use distance::{
    build_distance_matrix, compute_distance_matrix, weighted_edit_distance, BatchOptions,
    CancelToken, DistanceEngine,
};
pub use error::{DistanceError, Result};
pub use matrix::{DistanceMatrix, MatrixStats};
