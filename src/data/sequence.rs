// sequence.rs - Ordered, labelled sequence lists

use std::collections::HashSet;
use std::path::Path;

/// Length summary of a sequence list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Ordered sequences with one label each. Duplicates are kept in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceSet {
    pub labels: Vec<String>,
    pub sequences: Vec<String>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use every sequence as its own label
    pub fn from_sequences<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sequences: Vec<String> = sequences.into_iter().map(Into::into).collect();
        Self {
            labels: sequences.clone(),
            sequences,
        }
    }

    /// Load from FASTA (`.fasta`, `.fa`, `.faa`, `.fas`) or a delimited table
    pub fn from_file(
        path: &Path,
        sequence_column: &str,
        label_column: Option<&str>,
    ) -> Result<Self, String> {
        println!("📊 Loading sequences: {}", path.display());

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let set = match extension.as_str() {
            "fasta" | "fa" | "faa" | "fas" => Self::from_fasta(path)?,
            _ => Self::from_delimited(
                path,
                super::loaders::delimiter_for(path),
                sequence_column,
                label_column,
            )?,
        };

        println!("✅ Loaded {} sequences ({} unique)", set.len(), set.unique_count());
        Ok(set)
    }

    pub fn push(&mut self, label: String, sequence: String) {
        self.labels.push(label);
        self.sequences.push(sequence);
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn unique_count(&self) -> usize {
        self.sequences.iter().collect::<HashSet<_>>().len()
    }

    /// Lengths are counted in symbols, not bytes
    pub fn length_stats(&self) -> Option<LengthStats> {
        if self.sequences.is_empty() {
            return None;
        }
        let lengths: Vec<usize> = self.sequences.iter().map(|s| s.chars().count()).collect();
        let total: usize = lengths.iter().sum();
        Some(LengthStats {
            min: lengths.iter().copied().min().unwrap_or(0),
            max: lengths.iter().copied().max().unwrap_or(0),
            mean: total as f64 / lengths.len() as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequences_keeps_duplicates() {
        let set = SequenceSet::from_sequences(["CASS", "CAW", "CASS"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.unique_count(), 2);
        assert_eq!(set.labels, set.sequences);
    }

    #[test]
    fn test_length_stats() {
        let mut set = SequenceSet::new();
        assert!(set.length_stats().is_none());

        set.push("a".to_string(), "CASSF".to_string());
        set.push("b".to_string(), "".to_string());
        set.push("c".to_string(), "CAW".to_string());
        let stats = set.length_stats().unwrap();
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 5);
        assert!((stats.mean - 8.0 / 3.0).abs() < 1e-12);
    }
}
