// distance.rs - Weighted edit distance and batch matrix assembly

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::core::costs::SubstitutionCostTable;
use crate::core::error::{DistanceError, Result};
use crate::core::matrix::DistanceMatrix;

/// Best-effort cancellation flag shared between the caller and the batch workers
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for batch matrix computation
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Print a banner, a progress bar and the elapsed time
    pub show_progress: bool,
    pub cancel: Option<CancelToken>,
}

impl BatchOptions {
    pub fn with_progress() -> Self {
        Self {
            show_progress: true,
            cancel: None,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.is_cancelled())
    }
}

/// Minimum total cost to transform `s` into `t`.
///
/// Insertions and deletions cost 1; substituting `a` for a different `b` costs
/// `table.cost(a, b)`. Every symbol of both sequences must belong to the table's
/// alphabet, even where the alignment would never substitute it.
pub fn weighted_edit_distance(s: &str, t: &str, table: &SubstitutionCostTable) -> Result<f64> {
    let s = table.encode(s)?;
    let t = table.encode(t)?;
    Ok(encoded_distance(&s, &t, table))
}

/// Wagner-Fischer over encoded sequences, keeping two rows of the DP table
pub(crate) fn encoded_distance(s: &[usize], t: &[usize], table: &SubstitutionCostTable) -> f64 {
    if s.is_empty() {
        return t.len() as f64;
    }
    if t.is_empty() {
        return s.len() as f64;
    }

    let mut prev: Vec<f64> = (0..=t.len()).map(|j| j as f64).collect();
    let mut curr = vec![0.0; t.len() + 1];

    for (i, &a) in s.iter().enumerate() {
        curr[0] = (i + 1) as f64;
        for (j, &b) in t.iter().enumerate() {
            let substitution_cost = if a == b {
                0.0
            } else {
                table.cost_by_index(a, b)
            };
            let deletion = prev[j + 1] + 1.0;
            let insertion = curr[j] + 1.0;
            let substitution = prev[j] + substitution_cost;
            curr[j + 1] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[t.len()]
}

/// Full dissimilarity matrix labelled by the sequences themselves
pub fn build_distance_matrix<S>(sequences: &[S], table: &SubstitutionCostTable) -> Result<DistanceMatrix>
where
    S: AsRef<str> + Sync,
{
    let labels = sequences.iter().map(|s| s.as_ref().to_string()).collect();
    compute_distance_matrix(labels, sequences, table, &BatchOptions::default())
}

/// Full dissimilarity matrix with explicit labels.
///
/// Cell (i, j) for i < j holds `weighted_edit_distance(sequences[i], sequences[j])`
/// and is mirrored into (j, i). Each row of the upper triangle is computed by one
/// rayon task into its own buffer; the buffers are scattered into the matrix after
/// all tasks have joined. Any failure discards the whole batch.
pub fn compute_distance_matrix<S>(
    labels: Vec<String>,
    sequences: &[S],
    table: &SubstitutionCostTable,
    options: &BatchOptions,
) -> Result<DistanceMatrix>
where
    S: AsRef<str> + Sync,
{
    if labels.len() != sequences.len() {
        return Err(DistanceError::LabelMismatch {
            labels: labels.len(),
            sequences: sequences.len(),
        });
    }

    // No pairs to compare, so symbols are never looked up
    if sequences.len() < 2 {
        return Ok(DistanceMatrix::zeros(labels));
    }

    // Sequential so the first offending sequence is the one reported
    let encoded: Vec<Vec<usize>> = sequences
        .iter()
        .map(|s| table.encode(s.as_ref()))
        .collect::<Result<_>>()?;
    let n = encoded.len();

    let start = Instant::now();
    let total_comparisons = n * (n - 1) / 2;
    let pb = if options.show_progress {
        println!(
            "🔄 Computing distance matrix ({} × {} = {} comparisons)...",
            n, n, total_comparisons
        );
        let pb = ProgressBar::new(total_comparisons as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let update_interval = std::cmp::max(1, total_comparisons / 100);
    let progress_counter = AtomicUsize::new(0);

    let upper_rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut row = Vec::with_capacity(n - i - 1);
            for j in i + 1..n {
                if options.is_cancelled() {
                    return Err(DistanceError::Cancelled);
                }
                row.push(encoded_distance(&encoded[i], &encoded[j], table));

                let count = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                if count % update_interval == 0 {
                    pb.set_position(count as u64);
                }
            }
            Ok(row)
        })
        .collect::<Result<_>>()
        .inspect_err(|_| pb.abandon())?;

    pb.finish_and_clear();
    if options.show_progress {
        println!(
            "✅ Distance matrix computed in {:.2}s",
            start.elapsed().as_secs_f64()
        );
    }

    Ok(DistanceMatrix::from_upper_rows(labels, upper_rows))
}

/// Distance engine holding a shared, read-only cost table
#[derive(Debug, Clone)]
pub struct DistanceEngine {
    table: Arc<SubstitutionCostTable>,
    options: BatchOptions,
}

impl DistanceEngine {
    pub fn new(table: Arc<SubstitutionCostTable>) -> Self {
        Self {
            table,
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(table: Arc<SubstitutionCostTable>, options: BatchOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &SubstitutionCostTable {
        &self.table
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn distance(&self, s: &str, t: &str) -> Result<f64> {
        weighted_edit_distance(s, t, &self.table)
    }

    pub fn distance_matrix<S>(&self, labels: Vec<String>, sequences: &[S]) -> Result<DistanceMatrix>
    where
        S: AsRef<str> + Sync,
    {
        compute_distance_matrix(labels, sequences, &self.table, &self.options)
    }
}
