use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::time::Instant;
use tetramer::cli::counters::BatchCounters;
use tetramer::cli::io::read_sequences;
use tetramer::cli::opts::{InputArgs, RunArgs};
use tetramer::cli::synth::random_sequences;
use tetramer::kmers::batch::{count_matrix, par_count_matrix, BatchReport, FailurePolicy};
use tetramer::kmers::codec::SymbolCodec;
use tetramer::kmers::counting::{CountVector, N_KMERS};
use tetramer::kmers::error::KmerError;
use tetramer::kmers::motifs::top_motifs;

/// Command-line options for the 4-mer histogram tool
#[derive(Parser)]
#[command(
    name = "tetramer",
    about = "Count 4-mers in a batch of DNA sequences",
    long_about = "Count 4-mers in a batch of DNA sequences.

Every sequence gets a 256-bin histogram indexed by its 2-bit packed 4-mers.
Without --input, a synthetic batch of uniform random A/C/G/T sequences is counted.

EXAMPLES:
    // Synthetic batch of 1000 x 25,000 bp on 8 threads
    $ tetramer --n-sequences 1000 --seq-len 25000 --seed 1 --n-threads 8

    // Sequences from a file, one per line
    $ tetramer --input <path/to/sequences.txt> --top 20
    ",
    version = "0.1.0"
)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn run() -> Result<()> {
    let start_time = Instant::now();
    let opt = Cli::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.run.n_threads as usize)
        .build_global()
        .context("building Rayon thread pool")?;

    let load_time = Instant::now();
    let sequences = if let Some(path) = &opt.input.input {
        info!("Start: Reading sequences from {:?}", path);
        read_sequences(path)?
    } else {
        info!(
            "Start: Generating {} synthetic sequences of length {}",
            opt.input.n_sequences, opt.input.seq_len
        );
        random_sequences(
            opt.input.n_sequences as usize,
            opt.input.seq_len as usize,
            opt.input.seed,
        )
    };
    println!("Loaded {} sequences in {:.2?}", sequences.len(), load_time.elapsed());

    // Built once, shared read-only by every counting call
    let codec = SymbolCodec::new();
    let policy = if opt.run.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Collect
    };

    let mut matrix: Vec<CountVector> = vec![[0; N_KMERS]; sequences.len()];
    let mut report = BatchReport::default();

    for repeat in 0..opt.run.repeats {
        info!("Start: Counting (run {}/{})", repeat + 1, opt.run.repeats);
        let count_time = Instant::now();
        report = count_with_progress(&sequences, &mut matrix, &codec, policy, opt.run.n_threads)
            .context("counting k-mers")?;
        println!("Counted batch in {:.2?}", count_time.elapsed());
    }

    print_summary(&report.counters);
    for (index, err) in report.failures.iter().take(10) {
        warn!("Sequence {} was not counted: {}", index, err);
    }
    if report.failures.len() > 10 {
        warn!("... and {} more failures", report.failures.len() - 10);
    }

    if opt.run.top > 0 {
        println!("Top {} motifs:", opt.run.top);
        for (motif, count) in top_motifs(&matrix, &codec, opt.run.top as usize) {
            println!("  {}\t{}", motif, count);
        }
    }

    println!("Elapsed time: {:.2?}", start_time.elapsed());
    Ok(())
}

/// Count the batch in chunks so the progress bar moves while rows are filled.
fn count_with_progress(
    sequences: &[Vec<u8>],
    matrix: &mut [CountVector],
    codec: &SymbolCodec,
    policy: FailurePolicy,
    n_threads: u64,
) -> Result<BatchReport, KmerError> {
    let pb = ProgressBar::new(sequences.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("       {bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let chunk_size = (sequences.len() / 100).max(n_threads as usize).max(1);
    let mut report = BatchReport::default();

    for (chunk_idx, (seqs, rows)) in sequences
        .chunks(chunk_size)
        .zip(matrix.chunks_mut(chunk_size))
        .enumerate()
    {
        let offset = chunk_idx * chunk_size;
        let chunk_report = if n_threads > 1 {
            par_count_matrix(seqs, rows, codec, policy)
        } else {
            count_matrix(seqs, rows, codec, policy)
        }
        .map_err(|e| match e {
            KmerError::Sequence { index, source } => KmerError::Sequence {
                index: index + offset,
                source,
            },
            e => e,
        })?;

        report.counters += chunk_report.counters;
        report.failures.extend(
            chunk_report
                .failures
                .into_iter()
                .map(|(index, e)| (index + offset, e)),
        );
        pb.inc(seqs.len() as u64);
    }

    pb.finish_with_message("| Finished counting");
    Ok(report)
}

fn print_summary(counters: &BatchCounters) {
    println!("Sequences: {}", counters.total);
    println!("  Counted: {}", counters.counted);
    println!("  Too short: {}", counters.too_short);
    println!("  Invalid symbols: {}", counters.invalid_symbol);
    println!("Windows counted: {}", counters.windows);
}
