pub mod counters;
pub mod io;
pub mod opts;
pub mod synth;

/// Integer type of every histogram bin
pub type BigCount = u64;
