use crate::kmers::error::{KmerError, Result};

/// Canonical alphabet in code order: A → 0, C → 1, G → 2, T → 3.
pub const BASES: [u8; 4] = *b"ACGT";

/// Table entry for every byte outside the alphabet.
pub const INVALID: u8 = u8::MAX;

/// Byte → 2-bit code lookup table.
///
/// Built once and shared by reference with every counting call.
/// The table is 256 bytes and `Copy`, so it can also be captured by value
/// or stored in a `static` (`new` is `const`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolCodec {
    table: [u8; 256],
    symbols: [u8; 4],
}

impl SymbolCodec {
    /// Codec for uppercase ASCII `A`, `C`, `G`, `T`.
    ///
    /// Matching is case-sensitive: lowercase bases and `N` map to [`INVALID`].
    pub const fn new() -> Self {
        let mut table = [INVALID; 256];
        let mut code = 0;
        while code < BASES.len() {
            table[BASES[code] as usize] = code as u8;
            code += 1;
        }
        SymbolCodec {
            table,
            symbols: BASES,
        }
    }

    /// Codec for another spelling of a 4-symbol alphabet.
    ///
    /// `symbols[i]` receives code `i`. Every byte must be distinct.
    pub fn with_symbols(symbols: [u8; 4]) -> Result<Self> {
        let mut table = [INVALID; 256];
        for (code, &byte) in symbols.iter().enumerate() {
            if table[byte as usize] != INVALID {
                return Err(KmerError::DuplicateSymbol { byte });
            }
            table[byte as usize] = code as u8;
        }
        Ok(SymbolCodec { table, symbols })
    }

    /// 2-bit code of `byte`, or `None` when it is not in the alphabet.
    #[inline]
    pub fn code(&self, byte: u8) -> Option<u8> {
        match self.table[byte as usize] {
            INVALID => None,
            code => Some(code),
        }
    }

    /// Raw table entry: a code in `0..4` or [`INVALID`].
    #[inline(always)]
    pub fn raw(&self, byte: u8) -> u8 {
        self.table[byte as usize]
    }

    #[inline]
    pub fn is_valid(&self, byte: u8) -> bool {
        self.table[byte as usize] != INVALID
    }

    /// Alphabet byte carrying `code`. Only the low two bits are used.
    #[inline]
    pub fn symbol(&self, code: u8) -> u8 {
        self.symbols[(code & 0b11) as usize]
    }

    /// The alphabet in code order.
    pub fn symbols(&self) -> [u8; 4] {
        self.symbols
    }
}

impl Default for SymbolCodec {
    fn default() -> Self {
        SymbolCodec::new()
    }
}
