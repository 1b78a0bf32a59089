// mod.rs - LZ4-compressed cache for computed distance matrices

use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{DistanceMatrix, SubstitutionCostTable};

pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub version: String,
    pub created: String,
    pub sequence_fingerprint: String,
    pub table_fingerprint: String,
    pub sequence_count: usize,
    pub alphabet: String,
    pub user_note: Option<String>,
    pub format_version: u32,
}

/// A cached matrix together with the fingerprints of the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCache {
    pub metadata: CacheMetadata,
    pub matrix: DistanceMatrix,
}

impl MatrixCache {
    /// True when the cache was computed from exactly these inputs
    pub fn matches<S: AsRef<str>>(&self, sequences: &[S], table: &SubstitutionCostTable) -> bool {
        self.metadata.format_version == CACHE_FORMAT_VERSION
            && self.metadata.sequence_count == sequences.len()
            && self.metadata.sequence_fingerprint == sequence_fingerprint(sequences)
            && self.metadata.table_fingerprint == table.fingerprint()
    }
}

/// SHA-256 over the ordered, length-prefixed sequences
pub fn sequence_fingerprint<S: AsRef<str>>(sequences: &[S]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((sequences.len() as u64).to_le_bytes());
    for sequence in sequences {
        let bytes = sequence.as_ref().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

/// Save a matrix with fingerprints of its inputs
pub fn save_matrix_cache<S: AsRef<str>>(
    cache_path: &Path,
    matrix: &DistanceMatrix,
    sequences: &[S],
    table: &SubstitutionCostTable,
    user_note: Option<&str>,
) -> Result<(), String> {
    println!("💾 Saving matrix cache to {}...", cache_path.display());
    let start = Instant::now();

    let cache = MatrixCache {
        metadata: CacheMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            sequence_fingerprint: sequence_fingerprint(sequences),
            table_fingerprint: table.fingerprint(),
            sequence_count: sequences.len(),
            alphabet: table.alphabet().iter().collect(),
            user_note: user_note.map(str::to_string),
            format_version: CACHE_FORMAT_VERSION,
        },
        matrix: matrix.clone(),
    };

    let data = serde_json::to_vec(&cache)
        .map_err(|e| format!("Failed to serialize cache: {}", e))?;
    let compressed = lz4_flex::compress_prepend_size(&data);

    if let Some(parent) = cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create cache directory '{}': {}", parent.display(), e)
            })?;
        }
    }
    std::fs::write(cache_path, &compressed)
        .map_err(|e| format!("Failed to write cache file: {}", e))?;

    println!(
        "✅ Cache saved in {:.2}s ({} sequences, {} KB)",
        start.elapsed().as_secs_f64(),
        sequences.len(),
        compressed.len() / 1024
    );
    Ok(())
}

/// Read and decompress a cache file without checking its inputs
pub fn load_matrix_cache(cache_path: &Path) -> Result<MatrixCache, String> {
    let compressed =
        std::fs::read(cache_path).map_err(|e| format!("Failed to read cache file: {}", e))?;
    let decompressed = lz4_flex::decompress_size_prepended(&compressed)
        .map_err(|e| format!("Failed to decompress cache: {}", e))?;
    let cache: MatrixCache = serde_json::from_slice(&decompressed)
        .map_err(|e| format!("Failed to parse cache: {}", e))?;

    cache
        .matrix
        .check_shape()
        .map_err(|e| format!("Malformed cache: {}", e))?;
    if cache.metadata.sequence_count != cache.matrix.len() {
        return Err(format!(
            "Malformed cache: metadata lists {} sequences but the matrix has {}",
            cache.metadata.sequence_count,
            cache.matrix.len()
        ));
    }
    Ok(cache)
}

/// Load the cached matrix if it was computed from these exact inputs.
///
/// The matrix comes back carrying `labels`, not the labels it was saved with.
/// Returns `Ok(None)` for a stale cache; unreadable files are errors.
pub fn load_if_valid<S: AsRef<str>>(
    cache_path: &Path,
    labels: &[String],
    sequences: &[S],
    table: &SubstitutionCostTable,
) -> Result<Option<DistanceMatrix>, String> {
    println!("📂 Loading matrix cache from {}...", cache_path.display());
    let cache = load_matrix_cache(cache_path)?;

    if !cache.matches(sequences, table) {
        println!(
            "ℹ️  Cache was computed from different inputs ({} sequences, created {}), recomputing",
            cache.metadata.sequence_count, cache.metadata.created
        );
        return Ok(None);
    }

    if let Some(note) = &cache.metadata.user_note {
        println!("📝 User note: {}", note);
    }
    cache.matrix.with_labels(labels.to_vec()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_distance_matrix;

    fn temp_cache(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("aadist-cache-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_sequence_fingerprint_is_order_sensitive() {
        let a = sequence_fingerprint(&["CASS", "CAW"]);
        let b = sequence_fingerprint(&["CAW", "CASS"]);
        let c = sequence_fingerprint(&["CASSCAW"]);
        let d = sequence_fingerprint(&["CASS", "CAW"]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, d);
    }

    #[test]
    fn test_save_and_reuse() {
        let table = SubstitutionCostTable::from_preset("unit").unwrap();
        let seqs = vec!["CASSLGQAYEQYF", "CASSLGQGYEQYF", "CAWSVGTGNTIYF"];
        let matrix = build_distance_matrix(&seqs, &table).unwrap();
        let path = temp_cache("reuse.lz4");

        save_matrix_cache(&path, &matrix, &seqs, &table, Some("test run")).unwrap();

        let labels: Vec<String> = seqs.iter().map(|s| s.to_string()).collect();
        let cached = load_if_valid(&path, &labels, &seqs, &table).unwrap();
        assert_eq!(cached, Some(matrix));

        let raw = load_matrix_cache(&path).unwrap();
        assert_eq!(raw.metadata.user_note.as_deref(), Some("test run"));
        assert_eq!(raw.metadata.sequence_count, 3);
    }

    #[test]
    fn test_stale_cache_is_ignored() {
        let table = SubstitutionCostTable::from_preset("unit").unwrap();
        let seqs = vec!["CASS", "CAW"];
        let matrix = build_distance_matrix(&seqs, &table).unwrap();
        let path = temp_cache("stale.lz4");
        save_matrix_cache(&path, &matrix, &seqs, &table, None).unwrap();

        let labels = vec!["CASS".to_string(), "CAW".to_string()];
        let other_seqs = vec!["CASS", "CAY"];
        assert_eq!(load_if_valid(&path, &labels, &other_seqs, &table).unwrap(), None);

        let other_table = SubstitutionCostTable::uniform(crate::core::AMINO_ACIDS, 2.0).unwrap();
        assert_eq!(load_if_valid(&path, &labels, &seqs, &other_table).unwrap(), None);
    }

    #[test]
    fn test_corrupt_cache_is_error() {
        let path = temp_cache("corrupt.lz4");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not a cache").unwrap();
        let table = SubstitutionCostTable::from_preset("unit").unwrap();
        assert!(load_if_valid(&path, &["CASS".to_string()], &["CASS"], &table).is_err());
    }

    #[test]
    fn test_reused_matrix_takes_current_labels() {
        let table = SubstitutionCostTable::from_preset("unit").unwrap();
        let seqs = vec!["CASS", "CAW"];
        let matrix = build_distance_matrix(&seqs, &table)
            .unwrap()
            .with_labels(vec!["clone1".into(), "clone2".into()])
            .unwrap();
        let path = temp_cache("relabel.lz4");
        save_matrix_cache(&path, &matrix, &seqs, &table, None).unwrap();

        let labels = vec!["CASS".to_string(), "CAW".to_string()];
        let cached = load_if_valid(&path, &labels, &seqs, &table).unwrap().unwrap();
        assert_eq!(cached.labels(), ["CASS", "CAW"]);
        assert_eq!(cached.get(0, 1), matrix.get(0, 1));
    }

    fn write_raw_cache(name: &str, json: &str) -> std::path::PathBuf {
        let path = temp_cache(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, lz4_flex::compress_prepend_size(json.as_bytes())).unwrap();
        path
    }

    fn raw_cache_json(sequence_count: usize, labels: &str, values: &str) -> String {
        format!(
            r#"{{"metadata":{{"version":"0.1.0","created":"2026-01-01T00:00:00Z","sequence_fingerprint":"x","table_fingerprint":"y","sequence_count":{},"alphabet":"AB","user_note":null,"format_version":1}},"matrix":{{"labels":{},"values":{}}}}}"#,
            sequence_count, labels, values
        )
    }

    #[test]
    fn test_malformed_matrix_is_error() {
        let short = write_raw_cache(
            "short.lz4",
            &raw_cache_json(2, r#"["a","b"]"#, "[0.0,1.0,1.0]"),
        );
        let err = load_matrix_cache(&short).unwrap_err();
        assert!(err.contains("Malformed cache"), "{}", err);

        let miscounted = write_raw_cache(
            "miscounted.lz4",
            &raw_cache_json(3, r#"["a","b"]"#, "[0.0,1.0,1.0,0.0]"),
        );
        let err = load_matrix_cache(&miscounted).unwrap_err();
        assert!(err.contains("3 sequences"), "{}", err);

        let ok = write_raw_cache(
            "well-formed.lz4",
            &raw_cache_json(2, r#"["a","b"]"#, "[0.0,1.0,1.0,0.0]"),
        );
        assert!(load_matrix_cache(&ok).unwrap().matrix.is_symmetric());
    }
}
