use crate::kmers::codec::BASES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n_sequences` uniform random sequences over A/C/G/T, each `seq_len` long.
///
/// A given `seed` always produces the same batch; `None` seeds from entropy.
pub fn random_sequences(n_sequences: usize, seq_len: usize, seed: Option<u64>) -> Vec<Vec<u8>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..n_sequences)
        .map(|_| {
            (0..seq_len)
                .map(|_| BASES[rng.gen_range(0..BASES.len())])
                .collect()
        })
        .collect()
}
