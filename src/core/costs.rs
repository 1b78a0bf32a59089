// costs.rs - Substitution cost table

use std::collections::HashMap;
use std::fmt::Write as _;

use sha2::{Digest, Sha256};

use crate::core::error::{DistanceError, Result};

/// The 20 standard amino-acid residue codes
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Names accepted by [`SubstitutionCostTable::from_preset`]
pub const PRESETS: &[&str] = &["unit", "levenshtein"];

/// Pairwise substitution penalties over a fixed alphabet.
///
/// Costs are stored row-major in a flat vector indexed by symbol position, so a lookup
/// by encoded index is a single multiply-add. The table is never mutated after
/// construction and can be shared freely across worker threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionCostTable {
    alphabet: Vec<char>,
    index: HashMap<char, usize>,
    costs: Vec<f64>,
}

impl SubstitutionCostTable {
    /// Build a table from a square matrix whose rows and columns follow `alphabet`
    pub fn new(alphabet: Vec<char>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(DistanceError::InvalidTable("alphabet is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(alphabet.len());
        for (i, &symbol) in alphabet.iter().enumerate() {
            if index.insert(symbol, i).is_some() {
                return Err(DistanceError::InvalidTable(format!(
                    "duplicate symbol '{}' in alphabet",
                    symbol
                )));
            }
        }

        let n = alphabet.len();
        if rows.len() != n {
            return Err(DistanceError::InvalidTable(format!(
                "expected {} rows, found {}",
                n,
                rows.len()
            )));
        }

        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(DistanceError::InvalidTable(format!(
                    "row '{}' has {} columns, expected {}",
                    alphabet[i],
                    row.len(),
                    n
                )));
            }
            for (j, cost) in row.into_iter().enumerate() {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(DistanceError::InvalidTable(format!(
                        "cost({}, {}) = {} is not a non-negative finite number",
                        alphabet[i], alphabet[j], cost
                    )));
                }
                costs.push(cost);
            }
        }

        Ok(Self {
            alphabet,
            index,
            costs,
        })
    }

    /// Every distinct pair costs `mismatch_cost`, the diagonal costs 0
    pub fn uniform(alphabet: &str, mismatch_cost: f64) -> Result<Self> {
        let symbols: Vec<char> = alphabet.chars().collect();
        let n = symbols.len();
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { mismatch_cost })
                    .collect()
            })
            .collect();
        Self::new(symbols, rows)
    }

    /// Build a table from long-format `(from, to, cost)` entries.
    ///
    /// The alphabet is every symbol mentioned, in order of first appearance. All
    /// off-diagonal pairs must be present; a missing diagonal entry defaults to 0.
    pub fn from_pairs<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, char, f64)>,
    {
        let mut alphabet = Vec::new();
        let mut seen = HashMap::new();
        let mut pairs: HashMap<(char, char), f64> = HashMap::new();

        for (a, b, cost) in entries {
            for symbol in [a, b] {
                if !seen.contains_key(&symbol) {
                    seen.insert(symbol, alphabet.len());
                    alphabet.push(symbol);
                }
            }
            if let Some(previous) = pairs.insert((a, b), cost) {
                if previous != cost {
                    return Err(DistanceError::InvalidTable(format!(
                        "conflicting costs for ({}, {}): {} and {}",
                        a, b, previous, cost
                    )));
                }
            }
        }

        let mut rows = Vec::with_capacity(alphabet.len());
        for &a in &alphabet {
            let mut row = Vec::with_capacity(alphabet.len());
            for &b in &alphabet {
                match pairs.get(&(a, b)) {
                    Some(&cost) => row.push(cost),
                    None if a == b => row.push(0.0),
                    None => {
                        return Err(DistanceError::InvalidTable(format!(
                            "missing cost for pair ({}, {})",
                            a, b
                        )))
                    }
                }
            }
            rows.push(row);
        }

        Self::new(alphabet, rows)
    }

    /// Create a table from a preset name
    pub fn from_preset(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "unit" | "levenshtein" => Self::uniform(AMINO_ACIDS, 1.0),
            _ => Err(DistanceError::InvalidTable(format!(
                "unknown preset '{}'. Use: {}",
                name,
                PRESETS.join(", ")
            ))),
        }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Substitution cost of replacing `a` with `b`
    pub fn cost(&self, a: char, b: char) -> Result<f64> {
        let i = self.lookup(a)?;
        let j = self.lookup(b)?;
        Ok(self.cost_by_index(i, j))
    }

    /// Cost by alphabet position. Panics if either index is out of range.
    #[inline]
    pub fn cost_by_index(&self, i: usize, j: usize) -> f64 {
        self.costs[i * self.alphabet.len() + j]
    }

    /// Map every symbol of `sequence` to its alphabet position
    pub fn encode(&self, sequence: &str) -> Result<Vec<usize>> {
        sequence
            .chars()
            .map(|symbol| {
                self.index_of(symbol)
                    .ok_or_else(|| DistanceError::UnknownSymbol {
                        symbol,
                        sequence: Some(sequence.to_string()),
                    })
            })
            .collect()
    }

    /// True when cost(a, b) == cost(b, a) for every pair
    pub fn is_symmetric(&self) -> bool {
        let n = self.alphabet.len();
        (0..n).all(|i| (i + 1..n).all(|j| self.cost_by_index(i, j) == self.cost_by_index(j, i)))
    }

    /// SHA-256 over the alphabet and the exact bit patterns of every cost
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.alphabet.len() as u64).to_le_bytes());
        for &symbol in &self.alphabet {
            hasher.update((symbol as u32).to_le_bytes());
        }
        for cost in &self.costs {
            hasher.update(cost.to_bits().to_le_bytes());
        }

        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{:02x}", byte);
        }
        hex
    }

    fn lookup(&self, symbol: char) -> Result<usize> {
        self.index_of(symbol)
            .ok_or(DistanceError::UnknownSymbol {
                symbol,
                sequence: None,
            })
    }
}
