// error.rs - Error types for the distance core

use thiserror::Error;

/// Errors raised by cost lookups and distance computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// A symbol outside the cost table's alphabet
    #[error("symbol '{symbol}' is not in the cost table alphabet{}", in_sequence(.sequence))]
    UnknownSymbol {
        symbol: char,
        sequence: Option<String>,
    },

    /// The cost table could not be constructed
    #[error("invalid cost table: {0}")]
    InvalidTable(String),

    /// Labels and sequences differ in length
    #[error("{labels} labels supplied for {sequences} sequences")]
    LabelMismatch { labels: usize, sequences: usize },

    /// The batch was cancelled before every pair was evaluated
    #[error("distance matrix computation cancelled")]
    Cancelled,
}

impl DistanceError {
    /// True for lookup failures (symbol outside the alphabet)
    pub fn is_lookup(&self) -> bool {
        matches!(self, DistanceError::UnknownSymbol { .. })
    }
}

fn in_sequence(sequence: &Option<String>) -> String {
    match sequence {
        Some(s) => format!(" (sequence \"{}\")", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, DistanceError>;
