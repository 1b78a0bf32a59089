// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.sequences.is_none() {
            self.sequences = config.sequences;
        }
        if self.label_column.is_none() {
            self.label_column = config.label_column;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Only override defaults, not explicit CLI values
        if let Some(column) = config.sequence_column {
            if self.sequence_column == "sequence" {
                self.sequence_column = column;
            }
        }
        if let Some(format) = config.format {
            if self.format == "tsv" {
                self.format = format;
            }
        }

        // Substitution costs
        if self.costs.is_none() {
            self.costs = config.costs;
        }
        if let Some(cost_format) = config.cost_format {
            if self.cost_format == "square" {
                self.cost_format = cost_format;
            }
        }
        if self.preset.is_none() {
            self.preset = config.preset;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }
        if self.cache_file.is_none() {
            self.cache_file = config.cache_file;
        }
        if self.cache_note.is_none() {
            self.cache_note = config.cache_note;
        }

        // Flags (config only sets what the CLI left off)
        if !self.no_progress && config.no_progress.unwrap_or(false) {
            self.no_progress = true;
        }
        if !self.force_recompute && config.force_recompute.unwrap_or(false) {
            self.force_recompute = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Args {
        Args {
            sequence_column: "sequence".to_string(),
            cost_format: "square".to_string(),
            format: "tsv".to_string(),
            ..Args::default()
        }
    }

    #[test]
    fn test_config_fills_unset_values() {
        let config = Config {
            sequences: Some("clones.tsv".to_string()),
            sequence_column: Some("cdr3_aa".to_string()),
            format: Some("phylip".to_string()),
            threads: Some(4),
            dry_run: Some(true),
            ..Config::default()
        };
        let args = defaults().merge_with_config(config);
        assert_eq!(args.sequences.as_deref(), Some("clones.tsv"));
        assert_eq!(args.sequence_column, "cdr3_aa");
        assert_eq!(args.format, "phylip");
        assert_eq!(args.threads, Some(4));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_values_win() {
        let mut args = defaults();
        args.sequences = Some("cli.fasta".to_string());
        args.format = "nexus".to_string();
        args.threads = Some(1);

        let config = Config {
            sequences: Some("config.tsv".to_string()),
            format: Some("csv".to_string()),
            threads: Some(16),
            ..Config::default()
        };
        let args = args.merge_with_config(config);
        assert_eq!(args.sequences.as_deref(), Some("cli.fasta"));
        assert_eq!(args.format, "nexus");
        assert_eq!(args.threads, Some(1));
    }
}
