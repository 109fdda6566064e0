pub mod cli;
pub mod kmers;
