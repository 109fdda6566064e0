use crate::cli::counters::BatchCounters;
use crate::kmers::codec::SymbolCodec;
use crate::kmers::counting::{count_kmers, CountVector, K, N_KMERS};
use crate::kmers::error::{KmerError, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a batch does when one sequence cannot be counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Zero the failing row, record the error and keep going.
    #[default]
    Collect,
    /// Stop at the first failing sequence and return its error.
    /// Rows counted before the failure keep their results.
    FailFast,
}

/// Outcome of a batch that ran to completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub counters: BatchCounters,
    /// `(sequence index, error)`, ordered by index
    pub failures: Vec<(usize, KmerError)>,
}

impl BatchReport {
    /// True when every sequence was counted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, index: usize, seq_len: usize, outcome: Result<()>) {
        self.counters.total += 1;
        match outcome {
            Ok(()) => {
                self.counters.counted += 1;
                self.counters.windows += (seq_len + 1 - K) as u64;
            }
            Err(e) => {
                match e {
                    KmerError::SequenceTooShort { .. } => self.counters.too_short += 1,
                    KmerError::InvalidSymbol { .. } => self.counters.invalid_symbol += 1,
                    // Not produced by counting a single row
                    KmerError::LengthMismatch { .. }
                    | KmerError::DuplicateSymbol { .. }
                    | KmerError::Sequence { .. } => {}
                }
                self.failures.push((index, e));
            }
        }
    }
}

impl std::ops::AddAssign for BatchReport {
    fn add_assign(&mut self, other: Self) {
        self.counters += other.counters;
        self.failures.extend(other.failures);
    }
}

fn check_lengths(sequences: usize, vectors: usize) -> Result<()> {
    if sequences != vectors {
        return Err(KmerError::LengthMismatch { sequences, vectors });
    }
    Ok(())
}

/// Reset `row`, count `seq` into it and leave it zeroed on failure.
#[inline]
fn count_row(row: &mut CountVector, seq: &[u8], codec: &SymbolCodec) -> Result<()> {
    row.fill(0);
    let outcome = count_kmers(row, seq, codec);
    if outcome.is_err() {
        row.fill(0);
    }
    outcome
}

fn first_failure(mut failures: Vec<(usize, KmerError)>) -> KmerError {
    failures.sort_unstable_by_key(|(index, _)| *index);
    let (index, source) = failures.swap_remove(0);
    KmerError::Sequence {
        index,
        source: Box::new(source),
    }
}

/// Fill `matrix[i]` with the 4-mer counts of `sequences[i]`.
///
/// Every row is zeroed before it is counted, so the same matrix storage can
/// be reused across batches. Rows are processed in input order.
///
/// Returns `LengthMismatch` without touching `matrix` when the two slices
/// differ in length.
pub fn count_matrix<S: AsRef<[u8]>>(
    sequences: &[S],
    matrix: &mut [CountVector],
    codec: &SymbolCodec,
    policy: FailurePolicy,
) -> Result<BatchReport> {
    check_lengths(sequences.len(), matrix.len())?;

    let mut report = BatchReport::default();
    for (index, (seq, row)) in sequences.iter().zip(matrix.iter_mut()).enumerate() {
        let seq = seq.as_ref();
        match (policy, count_row(row, seq, codec)) {
            (FailurePolicy::FailFast, Err(source)) => {
                return Err(KmerError::Sequence {
                    index,
                    source: Box::new(source),
                })
            }
            (_, outcome) => report.record(index, seq.len(), outcome),
        }
    }

    Ok(report)
}

/// Parallel [`count_matrix`] on the current rayon pool.
///
/// Each row is owned by exactly one worker; `codec` is only read.
/// With `FailFast`, workers skip rows above the lowest failing index seen so
/// far. Every row below the first failing sequence is still counted, so the
/// returned error and those rows match [`count_matrix`]. Rows above it may or
/// may not have been counted.
pub fn par_count_matrix<S: AsRef<[u8]> + Sync>(
    sequences: &[S],
    matrix: &mut [CountVector],
    codec: &SymbolCodec,
    policy: FailurePolicy,
) -> Result<BatchReport> {
    check_lengths(sequences.len(), matrix.len())?;

    let first_failed = AtomicUsize::new(usize::MAX);
    let mut report = sequences
        .par_iter()
        .zip(matrix.par_iter_mut())
        .enumerate()
        .map(|(index, (seq, row))| {
            let mut report = BatchReport::default();
            if policy == FailurePolicy::FailFast && index > first_failed.load(Ordering::Relaxed) {
                return report;
            }
            let seq = seq.as_ref();
            let outcome = count_row(row, seq, codec);
            if outcome.is_err() && policy == FailurePolicy::FailFast {
                first_failed.fetch_min(index, Ordering::Relaxed);
            }
            report.record(index, seq.len(), outcome);
            report
        })
        .reduce(BatchReport::default, |mut a, b| {
            a += b;
            a
        });

    if policy == FailurePolicy::FailFast && !report.failures.is_empty() {
        return Err(first_failure(report.failures));
    }
    report.failures.sort_unstable_by_key(|(index, _)| *index);
    Ok(report)
}

/// Allocating wrapper around [`count_matrix`].
pub fn count_batch<S: AsRef<[u8]>>(
    sequences: &[S],
    codec: &SymbolCodec,
    policy: FailurePolicy,
) -> Result<(Vec<CountVector>, BatchReport)> {
    let mut matrix: Vec<CountVector> = vec![[0; N_KMERS]; sequences.len()];
    let report = count_matrix(sequences, &mut matrix, codec, policy)?;
    Ok((matrix, report))
}

/// Allocating wrapper around [`par_count_matrix`].
pub fn par_count_batch<S: AsRef<[u8]> + Sync>(
    sequences: &[S],
    codec: &SymbolCodec,
    policy: FailurePolicy,
) -> Result<(Vec<CountVector>, BatchReport)> {
    let mut matrix: Vec<CountVector> = vec![[0; N_KMERS]; sequences.len()];
    let report = par_count_matrix(sequences, &mut matrix, codec, policy)?;
    Ok((matrix, report))
}
