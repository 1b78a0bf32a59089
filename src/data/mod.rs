// mod.rs - Data structures module

pub mod loaders;
pub mod sequence;

// Re-export main types for convenience
pub use loaders::{load_cost_table, CostFormat};
pub use sequence::{LengthStats, SequenceSet};
