use crate::cli::BigCount;
use crate::kmers::codec::{SymbolCodec, INVALID};
use crate::kmers::error::{KmerError, Result};

/// k-mer length
pub const K: usize = 4;
/// Number of distinct 4-mer indices (4^4)
pub const N_KMERS: usize = 256;
/// Keeps the 2-bit codes of the 4 most recent symbols
pub const KMER_MASK: u32 = 0xFF;

/// One histogram bin per 4-mer index.
pub type CountVector = [BigCount; N_KMERS];

/// A rolling 4-mer index packed at 2 bits per symbol.
///
/// The oldest symbol sits in the high bits and the newest in the low bits,
/// so every `roll` costs one shift, one or and one mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingKmer {
    index: u32,
}

impl RollingKmer {
    /// Seed from the codes of the first `K - 1` symbols.
    /// No full window exists yet, so nothing should be counted for the seed.
    #[inline(always)]
    pub fn seed(c0: u8, c1: u8, c2: u8) -> Self {
        RollingKmer {
            index: ((c0 as u32) << 4) | ((c1 as u32) << 2) | c2 as u32,
        }
    }

    /// Push the code of the next symbol and return the index of the window
    /// it completes.
    #[inline(always)]
    pub fn roll(&mut self, code: u8) -> u8 {
        self.index = ((self.index << 2) | code as u32) & KMER_MASK;
        self.index as u8
    }

    /// Current packed value.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index as u8
    }
}

#[inline(always)]
fn lookup(codec: &SymbolCodec, seq: &[u8], position: usize) -> Result<u8> {
    let byte = seq[position];
    match codec.raw(byte) {
        INVALID => Err(KmerError::InvalidSymbol { position, byte }),
        code => Ok(code),
    }
}

/// Add the 4-mer counts of `seq` to `counts`.
///
/// `counts` is not reset; callers that reuse a vector must zero it first.
///
/// A sequence shorter than 4 is rejected before anything is read. The first
/// byte outside the alphabet aborts counting with its position; windows
/// ending before that position have already been added to `counts`.
pub fn count_kmers(counts: &mut CountVector, seq: &[u8], codec: &SymbolCodec) -> Result<()> {
    if seq.len() < K {
        return Err(KmerError::SequenceTooShort { len: seq.len() });
    }

    let mut kmer = RollingKmer::seed(
        lookup(codec, seq, 0)?,
        lookup(codec, seq, 1)?,
        lookup(codec, seq, 2)?,
    );

    for (offset, &byte) in seq[K - 1..].iter().enumerate() {
        let code = codec.raw(byte);
        if code == INVALID {
            return Err(KmerError::InvalidSymbol {
                position: offset + K - 1,
                byte,
            });
        }
        counts[kmer.roll(code) as usize] += 1;
    }

    Ok(())
}

/// Count the 4-mers of `seq` into a freshly zeroed vector.
pub fn count_sequence(seq: &[u8], codec: &SymbolCodec) -> Result<CountVector> {
    let mut counts = [0; N_KMERS];
    count_kmers(&mut counts, seq, codec)?;
    Ok(counts)
}

/// Index of a single 4-mer, e.g. `ACGT` → 27.
/// Only the first 4 bytes of `kmer` are read.
pub fn kmer_index(kmer: &[u8], codec: &SymbolCodec) -> Result<u8> {
    if kmer.len() < K {
        return Err(KmerError::SequenceTooShort { len: kmer.len() });
    }
    let mut rolling = RollingKmer::seed(
        lookup(codec, kmer, 0)?,
        lookup(codec, kmer, 1)?,
        lookup(codec, kmer, 2)?,
    );
    Ok(rolling.roll(lookup(codec, kmer, 3)?))
}
