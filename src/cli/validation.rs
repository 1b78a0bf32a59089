// validation.rs - Input validation utilities

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::args::Args;
use crate::core::{SubstitutionCostTable, PRESETS};
use crate::data::{load_cost_table, CostFormat};
use crate::output::FORMATS;

/// Where the substitution costs come from
#[derive(Debug, Clone, PartialEq)]
pub enum CostSource {
    File { path: PathBuf, format: CostFormat },
    Preset(String),
}

impl CostSource {
    pub fn load(&self) -> Result<SubstitutionCostTable, String> {
        match self {
            CostSource::File { path, format } => load_cost_table(path, *format),
            CostSource::Preset(name) => {
                println!("🧮 Using built-in cost table: {}", name);
                SubstitutionCostTable::from_preset(name).map_err(|e| e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub sequences_path: PathBuf,
    pub output_format: String,
    pub cost_source: CostSource,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let sequences = args.sequences.as_ref().ok_or("--sequences is required")?;
    let sequences_path = PathBuf::from(sequences);
    if !sequences_path.exists() {
        return Err(format!("Sequence file not found: {}", sequences));
    }

    if !args.dry_run && args.output.is_none() {
        return Err("--output is required (unless --dry-run)".to_string());
    }

    let output_format = args.format.to_lowercase();
    if !FORMATS.contains(&output_format.as_str()) {
        return Err(format!(
            "Invalid output format '{}'. Available: {}",
            args.format,
            FORMATS.join(", ")
        ));
    }

    let cost_source = match (&args.costs, &args.preset) {
        (Some(_), Some(_)) => {
            return Err("--costs and --preset are mutually exclusive".to_string());
        }
        (Some(path), None) => {
            let format = CostFormat::from_str(&args.cost_format)?;
            if !Path::new(path).exists() {
                return Err(format!("Cost table not found: {}", path));
            }
            CostSource::File {
                path: PathBuf::from(path),
                format,
            }
        }
        (None, preset) => {
            let name = preset.clone().unwrap_or_else(|| "unit".to_string());
            if !PRESETS.contains(&name.to_lowercase().as_str()) {
                return Err(format!(
                    "Invalid preset '{}'. Available: {}",
                    name,
                    PRESETS.join(", ")
                ));
            }
            CostSource::Preset(name)
        }
    };

    if args.cache_file.is_none() {
        if args.force_recompute {
            return Err("--force-recompute requires --cache-file".to_string());
        }
        if args.cache_note.is_some() {
            return Err("--cache-note requires --cache-file".to_string());
        }
    }

    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }

    Ok(ValidationResult {
        sequences_path,
        output_format,
        cost_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loaders::write_temp;

    fn base_args() -> Args {
        Args {
            sequences: Some(
                write_temp("validate.tsv", "sequence\nCASS\n")
                    .display()
                    .to_string(),
            ),
            sequence_column: "sequence".to_string(),
            cost_format: "square".to_string(),
            format: "tsv".to_string(),
            output: Some("out.tsv".to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn test_defaults_to_unit_preset() {
        let result = validate_args(&base_args()).unwrap();
        assert_eq!(result.cost_source, CostSource::Preset("unit".to_string()));
        assert_eq!(result.output_format, "tsv");
    }

    #[test]
    fn test_costs_and_preset_conflict() {
        let mut args = base_args();
        args.costs = Some("costs.tsv".to_string());
        args.preset = Some("unit".to_string());
        assert!(validate_args(&args).unwrap_err().contains("mutually exclusive"));
    }

    #[test]
    fn test_cost_file_source() {
        let costs = write_temp("validate_costs.tsv", "\tA\tB\nA\t0\t1\nB\t1\t0\n");
        let mut args = base_args();
        args.costs = Some(costs.display().to_string());
        args.cost_format = "long".to_string();
        let result = validate_args(&args).unwrap();
        assert_eq!(
            result.cost_source,
            CostSource::File {
                path: costs,
                format: CostFormat::Long
            }
        );
    }

    #[test]
    fn test_rejections() {
        let mut args = base_args();
        args.format = "xlsx".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.preset = Some("blosum99".to_string());
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.force_recompute = true;
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.threads = Some(0);
        assert!(validate_args(&args).is_err());

        let mut args = base_args();
        args.output = None;
        assert!(validate_args(&args).is_err());
        args.dry_run = true;
        assert!(validate_args(&args).is_ok());

        let mut args = base_args();
        args.sequences = Some("/nonexistent/seqs.tsv".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_preset_loads() {
        let table = CostSource::Preset("unit".to_string()).load().unwrap();
        assert_eq!(table.len(), 20);
    }
}
