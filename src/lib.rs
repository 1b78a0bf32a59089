// lib.rs - aadist library root

//! # aadist - Weighted edit-distance matrices for amino-acid sequences
//!
//! Computes pairwise dissimilarities between short sequences (CDR3 junctions,
//! peptides) using an edit distance whose substitution costs come from a
//! symbol-pair table, and assembles them into a symmetric matrix ready for
//! hierarchical clustering.
//!
//! ## Features
//!
//! - **Weighted Wagner-Fischer**: unit insertions/deletions, table-driven substitutions
//! - **Parallel assembly**: rayon over rows of the upper triangle, deterministic output
//! - **Cost tables**: square or long-format TSV/CSV files, or built-in presets
//! - **Matrix cache**: LZ4-compressed, fingerprinted against its inputs
//! - **Multiple formats**: TSV, CSV, PHYLIP, NEXUS and condensed output
//!
//! ## Basic Usage
//!
//! ```rust
//! use aadist::prelude::*;
//!
//! let table = SubstitutionCostTable::from_preset("unit")?;
//! let d = weighted_edit_distance("CASSLGQAYEQYF", "CASSLGQGYEQYF", &table)?;
//! assert_eq!(d, 1.0);
//!
//! let matrix = build_distance_matrix(&["CASSF", "CASF", "CAWF"], &table)?;
//! assert_eq!(matrix.condensed(), vec![1.0, 2.0, 1.0]);
//! # Ok::<(), aadist::DistanceError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cache::{load_if_valid, save_matrix_cache, MatrixCache};
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{build_distance_matrix, compute_distance_matrix, weighted_edit_distance};
    pub use crate::core::{BatchOptions, CancelToken, DistanceEngine, DistanceError};
    pub use crate::core::{DistanceMatrix, SubstitutionCostTable};
    pub use crate::data::{load_cost_table, CostFormat, SequenceSet};
    pub use crate::output::write_matrix;
}

// Re-export main types at the root level for convenience
pub use crate::core::{DistanceEngine, DistanceError, DistanceMatrix, SubstitutionCostTable};
pub use crate::data::SequenceSet;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "aadist v{} - Weighted edit-distance matrices for amino-acid sequences",
        VERSION
    )
}
