use clap::{value_parser, Args};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Text file with one sequence per line [path]
    ///
    /// Blank lines and lines starting with '#' are skipped.
    /// When omitted, a synthetic batch is generated instead.
    #[clap(short = 'i', long, value_parser, help_heading = "Input")]
    pub input: Option<PathBuf>,

    /// Number of synthetic sequences [integer]
    #[clap(long, default_value = "1000", value_parser = value_parser!(u64).range(1..), conflicts_with = "input", help_heading = "Synthetic input")]
    pub n_sequences: u64,

    /// Length of each synthetic sequence (min. 4) [integer]
    #[clap(long, default_value = "25000", value_parser = value_parser!(u64).range(4..), conflicts_with = "input", help_heading = "Synthetic input")]
    pub seq_len: u64,

    /// Random seed for reproducible synthetic sequences [integer]
    #[clap(long, conflicts_with = "input", help_heading = "Synthetic input")]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Number of threads to use [integer]
    #[clap(short = 't', long, default_value = "1", value_parser = value_parser!(u64).range(1..), help_heading = "Core")]
    pub n_threads: u64,

    /// Abort on the first sequence that cannot be counted [flag]
    ///
    /// By default the failing sequence's counts are zeroed, the error is
    /// reported, and the remaining sequences are still counted.
    #[clap(long, help_heading = "Core")]
    pub fail_fast: bool,

    /// Count the batch this many times into the same matrix [integer]
    #[clap(long, default_value = "1", value_parser = value_parser!(u64).range(1..), help_heading = "Core")]
    pub repeats: u64,

    /// Number of most frequent motifs to print [integer]
    #[clap(long, default_value = "10", value_parser = value_parser!(u16).range(0..=256), help_heading = "Output")]
    pub top: u16,
}
