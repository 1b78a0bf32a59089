// main.rs - CLI entry point

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use aadist::cache::{load_if_valid, save_matrix_cache};
use aadist::cli::Config;
use aadist::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    println!("🚀 aadist v{}", env!("CARGO_PKG_VERSION"));

    let validation_result = validate_args(&args)?;

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    let sequences = SequenceSet::from_file(
        &validation_result.sequences_path,
        &args.sequence_column,
        args.label_column.as_deref(),
    )?;
    let table = validation_result.cost_source.load()?;

    // Report every sequence the alphabet cannot cover before any pair is computed
    let uncovered: Vec<String> = sequences
        .labels
        .iter()
        .zip(&sequences.sequences)
        .filter_map(|(label, seq)| table.encode(seq).err().map(|e| format!("{}: {}", label, e)))
        .collect();

    if args.dry_run {
        print_dry_run_summary(&sequences, &table, &uncovered);
        return if uncovered.is_empty() {
            println!("✅ Dry run completed successfully");
            Ok(())
        } else {
            Err(format!(
                "{} sequences contain symbols outside the cost table alphabet",
                uncovered.len()
            ))
        };
    }

    if let Some(first) = uncovered.first() {
        return Err(format!(
            "{} sequences contain symbols outside the cost table alphabet (first: {})",
            uncovered.len(),
            first
        ));
    }

    // Try to reuse a cached matrix first
    let cached = match args.cache_file.as_deref() {
        Some(cache_path) if Path::new(cache_path).exists() && !args.force_recompute => {
            load_if_valid(
                Path::new(cache_path),
                &sequences.labels,
                &sequences.sequences,
                &table,
            )?
        }
        _ => None,
    };

    let matrix = match cached {
        Some(matrix) => {
            println!("🎯 Reusing cached matrix ({} sequences)", matrix.len());
            matrix
        }
        None => {
            let options = BatchOptions {
                show_progress: !args.no_progress,
                cancel: None,
            };
            let table = Arc::new(table);
            let engine = DistanceEngine::with_options(table, options);
            let matrix = engine
                .distance_matrix(sequences.labels.clone(), &sequences.sequences)
                .map_err(|e| e.to_string())?;

            if let Some(cache_path) = args.cache_file.as_deref() {
                if let Err(e) = save_matrix_cache(
                    Path::new(cache_path),
                    &matrix,
                    &sequences.sequences,
                    engine.table(),
                    args.cache_note.as_deref(),
                ) {
                    eprintln!("⚠️  Warning: Failed to save cache: {}", e);
                }
            }
            matrix
        }
    };

    if let Some(stats) = matrix.stats() {
        println!(
            "📈 Distances over {} pairs: min {}, max {}, mean {:.3}",
            stats.pairs, stats.min, stats.max, stats.mean
        );
    }

    let output_path = args.output.as_deref().ok_or("--output is required")?;
    write_matrix(
        output_path,
        &validation_result.output_format,
        &matrix,
        &command_line,
    )?;

    println!(
        "\n⏱️  Total execution time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_dry_run_summary(sequences: &SequenceSet, table: &SubstitutionCostTable, uncovered: &[String]) {
    println!("\n📊 === INPUT SUMMARY ===");
    println!(
        "  • Sequences: {} ({} unique)",
        sequences.len(),
        sequences.unique_count()
    );
    if let Some(stats) = sequences.length_stats() {
        println!(
            "  • Length: min {}, max {}, mean {:.1}",
            stats.min, stats.max, stats.mean
        );
    }
    println!(
        "  • Alphabet: {} symbols ({})",
        table.len(),
        if table.is_symmetric() { "symmetric costs" } else { "asymmetric costs" }
    );
    let n = sequences.len();
    println!("  • Pairs to compute: {}", n * n.saturating_sub(1) / 2);

    if !uncovered.is_empty() {
        eprintln!("⚠️  {} sequences cannot be scored:", uncovered.len());
        for line in uncovered.iter().take(10) {
            eprintln!("   - {}", line);
        }
        if uncovered.len() > 10 {
            eprintln!("   ... and {} more", uncovered.len() - 10);
        }
    }
}
