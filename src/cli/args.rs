// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug, Default)]
/// aadist - Weighted edit-distance matrices for amino-acid sequences
pub struct Args {
    /// sequence list: .tsv/.csv with a header row, or FASTA (.fasta, .fa, .faa)
    #[argh(option)]
    pub sequences: Option<String>,

    /// column holding the sequences in a delimited file (default: sequence)
    #[argh(option, default = "String::from(\"sequence\")")]
    pub sequence_column: String,

    /// column holding row/column labels (default: the sequence itself)
    #[argh(option)]
    pub label_column: Option<String>,

    /// substitution cost table (.tsv or .csv)
    #[argh(option)]
    pub costs: Option<String>,

    /// cost table layout: square, long (default: square)
    #[argh(option, default = "String::from(\"square\")")]
    pub cost_format: String,

    /// built-in cost table when --costs is not given: unit (default: unit)
    #[argh(option)]
    pub preset: Option<String>,

    /// output distance matrix file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, phylip, nexus, condensed (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// hide the progress bar
    #[argh(switch)]
    pub no_progress: bool,

    /// cache file for reusing a computed matrix (.lz4 extension)
    #[argh(option)]
    pub cache_file: Option<String>,

    /// user note to save with the cache for future reference
    #[argh(option)]
    pub cache_note: Option<String>,

    /// ignore an existing cache and recompute
    #[argh(switch)]
    pub force_recompute: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
