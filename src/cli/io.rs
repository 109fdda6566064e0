use anyhow::{bail, Context, Result};
use log::debug;
use std::path::Path;

/// Read one sequence per line.
///
/// Lines are trimmed; blank lines and `#` comments are skipped.
/// Symbols are kept as-is, so validation happens when counting.
pub fn read_sequences(path: &Path) -> Result<Vec<Vec<u8>>> {
    let text = std::fs::read_to_string(path)
        .context(format!("reading sequence file {:?}", path))?;
    let sequences: Vec<Vec<u8>> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.as_bytes().to_vec())
        .collect();
    if sequences.is_empty() {
        bail!("no sequences found in {:?}", path);
    }
    debug!("read {} sequences from {:?}", sequences.len(), path);
    Ok(sequences)
}
