//! Byte frequency analysis.

use crate::bitio::BitSource;
use crate::error::Result;
use crate::{ALPHABET_SIZE, BITS_PER_WORD, PSEUDO_EOF};

/// Number of distinct symbols: every byte value plus the sentinel.
pub const SYMBOL_COUNT: usize = ALPHABET_SIZE + 1;

/// Occurrence counts for symbols `0..=256`.
///
/// The sentinel's count is always exactly 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count every 8-bit word of `source` until it is exhausted.
    ///
    /// The source is left at end-of-stream; callers that need a second
    /// pass must [`BitSource::reset`] it.
    pub fn from_source<S: BitSource>(source: &mut S) -> Result<Self> {
        let mut counts = [0u64; SYMBOL_COUNT];
        while let Some(word) = source.read_bits(BITS_PER_WORD)? {
            counts[word as usize] += 1;
        }
        counts[PSEUDO_EOF as usize] = 1;
        Ok(Self { counts })
    }

    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &b in data {
            counts[b as usize] += 1;
        }
        counts[PSEUDO_EOF as usize] = 1;
        Self { counts }
    }

    /// Count for `symbol`; zero for anything outside `0..=256`.
    pub fn count(&self, symbol: u16) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// Symbols with a non-zero count, ascending, paired with their counts.
    pub fn symbols(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u16, c))
    }

    /// Sum of all counts, sentinel included.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
