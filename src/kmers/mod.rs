pub mod batch;
pub mod codec;
pub mod counting;
pub mod error;
pub mod motifs;
