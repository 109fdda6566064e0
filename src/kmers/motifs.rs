use crate::cli::BigCount;
use crate::kmers::codec::SymbolCodec;
use crate::kmers::counting::{CountVector, K, N_KMERS};
use ndarray::{Array1, Array2, Axis};

/// Decode a 4-mer index to its motif, oldest symbol first.
pub fn decode_kmer(index: u8, codec: &SymbolCodec) -> String {
    let mut buf = [0u8; K];
    for (pos, slot) in buf.iter_mut().enumerate() {
        let shift = 2 * (K - 1 - pos);
        *slot = codec.symbol(index >> shift);
    }
    buf.iter().map(|&b| char::from(b)).collect()
}

/// Every motif in index order. With the canonical alphabet this is also
/// lexicographic order, since A < C < G < T.
pub fn all_motifs(codec: &SymbolCodec) -> Vec<String> {
    (0..N_KMERS).map(|i| decode_kmer(i as u8, codec)).collect()
}

/// View a count matrix as a sequences × motifs array.
pub fn count_matrix_to_array(matrix: &[CountVector]) -> Array2<BigCount> {
    let mut mat = Array2::<BigCount>::zeros((matrix.len(), N_KMERS));
    for (mut row, counts) in mat.axis_iter_mut(Axis(0)).zip(matrix) {
        row.assign(&Array1::from_iter(counts.iter().copied()));
    }
    mat
}

/// Column totals: per-motif counts summed over all sequences.
pub fn motif_totals(matrix: &[CountVector]) -> Array1<BigCount> {
    count_matrix_to_array(matrix).sum_axis(Axis(0))
}

/// The `n` most frequent motifs across the matrix, ties broken by index.
pub fn top_motifs(
    matrix: &[CountVector],
    codec: &SymbolCodec,
    n: usize,
) -> Vec<(String, BigCount)> {
    let totals = motif_totals(matrix);
    let mut order: Vec<usize> = (0..N_KMERS).collect();
    order.sort_by(|&a, &b| totals[b].cmp(&totals[a]).then(a.cmp(&b)));
    order
        .into_iter()
        .take(n)
        .map(|i| (decode_kmer(i as u8, codec), totals[i]))
        .collect()
}
