// mod.rs - File loaders for sequence lists and cost tables

pub mod costs;
pub mod delimited;
pub mod fasta;

use std::path::Path;

pub use costs::{load_cost_table, CostFormat};

/// Comma for `.csv`, tab for everything else
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    }
}

#[cfg(test)]
pub(crate) fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("aadist-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_for() {
        assert_eq!(delimiter_for(Path::new("seqs.csv")), b',');
        assert_eq!(delimiter_for(Path::new("seqs.CSV")), b',');
        assert_eq!(delimiter_for(Path::new("seqs.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("seqs")), b'\t');
    }
}
