// inspector.rs - Matrix cache inspector

use std::path::Path;

use argh::FromArgs;
use aadist::cache::load_matrix_cache;

#[derive(FromArgs)]
/// aadist-inspect - Show the metadata and contents summary of a matrix cache
struct InspectArgs {
    /// cache file written with --cache-file
    #[argh(positional)]
    cache: String,

    /// number of labels to list (default: 5)
    #[argh(option, default = "5")]
    show: usize,
}

fn main() {
    let args: InspectArgs = argh::from_env();
    if let Err(e) = run_inspector(&args) {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_inspector(args: &InspectArgs) -> Result<(), String> {
    println!("🔍 aadist Cache Inspector");
    println!("==========================");

    let path = Path::new(&args.cache);
    let compressed_size = std::fs::metadata(path)
        .map_err(|e| format!("Failed to stat cache file: {}", e))?
        .len();
    let cache = load_matrix_cache(path)?;
    let metadata = &cache.metadata;

    println!("=== METADATA ===");
    println!("Version: {}", metadata.version);
    println!("Created: {}", metadata.created);
    println!("Format version: {}", metadata.format_version);
    println!("Sequences: {}", metadata.sequence_count);
    println!("Alphabet: {} ({} symbols)", metadata.alphabet, metadata.alphabet.chars().count());
    println!("Sequence fingerprint: {}", metadata.sequence_fingerprint);
    println!("Cost table fingerprint: {}", metadata.table_fingerprint);
    if let Some(note) = &metadata.user_note {
        println!("User note: {}", note);
    }

    println!();
    println!("=== STORAGE INFO ===");
    println!("Compressed size: {} KB", compressed_size / 1024);

    let matrix = &cache.matrix;
    println!();
    println!("=== MATRIX ===");
    println!("Dimensions: {} × {}", matrix.len(), matrix.len());
    println!(
        "Symmetric with zero diagonal: {}",
        if matrix.is_symmetric() { "yes" } else { "NO" }
    );
    match matrix.stats() {
        Some(stats) => println!(
            "Pairs: {}  min: {}  max: {}  mean: {:.3}",
            stats.pairs, stats.min, stats.max, stats.mean
        ),
        None => println!("Pairs: 0"),
    }

    if args.show > 0 && !matrix.is_empty() {
        println!();
        println!("=== FIRST {} LABELS ===", args.show.min(matrix.len()));
        for label in matrix.labels().iter().take(args.show) {
            println!("{}", label);
        }
        if matrix.len() > args.show {
            println!("... and {} more", matrix.len() - args.show);
        }
    }

    if metadata.sequence_count != matrix.len() {
        println!();
        println!(
            "⚠️  WARNING: metadata lists {} sequences but the matrix has {} rows",
            metadata.sequence_count,
            matrix.len()
        );
    }
    Ok(())
}
