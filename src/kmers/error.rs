#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KmerError {
    #[error("invalid symbol {byte:#04x} ({:?}) at position {position}", as_char(.byte))]
    InvalidSymbol { position: usize, byte: u8 },

    #[error("sequence of length {len} is shorter than k = 4")]
    SequenceTooShort { len: usize },

    #[error("got {sequences} sequences but {vectors} count vectors")]
    LengthMismatch { sequences: usize, vectors: usize },

    #[error("symbol {byte:#04x} ({:?}) is assigned more than one code", as_char(.byte))]
    DuplicateSymbol { byte: u8 },

    #[error("counting sequence {index} failed")]
    Sequence {
        index: usize,
        #[source]
        source: Box<KmerError>,
    },
}

pub type Result<T> = std::result::Result<T, KmerError>;

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}
