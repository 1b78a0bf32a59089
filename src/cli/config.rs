// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub sequences: Option<String>,
    pub sequence_column: Option<String>,
    pub label_column: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,

    // Substitution costs
    pub costs: Option<String>,
    pub cost_format: Option<String>,
    pub preset: Option<String>,

    // Performance
    pub threads: Option<usize>,
    pub no_progress: Option<bool>,
    pub cache_file: Option<String>,
    pub cache_note: Option<String>,

    // Flags
    pub force_recompute: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# aadist.toml - Configuration file for aadist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Sequence list (.tsv/.csv with a header row, or FASTA)
sequences = "/path/to/clones.tsv"

# Column holding the sequences (delimited input only)
sequence_column = "cdr3_aa"

# Column holding labels; omit to label rows by the sequence itself
# label_column = "clone_id"

# Output distance matrix file
output = "distances.tsv"

# Output format: tsv, csv, phylip, nexus, condensed
format = "tsv"

# =============================================================================
# SUBSTITUTION COSTS
# =============================================================================

# Cost table file (.tsv or .csv); takes the place of a preset
costs = "/path/to/costs.tsv"

# Cost table layout: square (symbols as header and first column) or long (from, to, cost)
cost_format = "square"

# Built-in table used when no cost file is given: unit
# preset = "unit"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
threads = 8

# Hide the progress bar
no_progress = false

# Cache file for reusing a computed matrix (.lz4 extension)
cache_file = "distances.lz4"

# User note to save with the cache for future reference
cache_note = "My analysis run"

# =============================================================================
# FLAGS
# =============================================================================

# Ignore an existing cache and recompute
force_recompute = false

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}
