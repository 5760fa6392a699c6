//! Error types for Huffman compression and decompression.

use thiserror::Error;

/// Error variants for compress/decompress operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The leading 32-bit field is not the tree-header magic.
    #[error("bad header magic: expected {expected:#010x}, found {found:#010x}", expected = crate::HUFF_TREE)]
    BadHeaderMagic {
        /// The value actually read.
        found: u32,
    },

    /// Input ended while header bits or a symbol field were still expected.
    #[error("stream truncated inside tree header")]
    HeaderTruncated,

    /// Input ended in the body before the end-of-stream symbol was decoded.
    #[error("stream truncated: no end-of-stream symbol")]
    MissingSentinel,

    /// The header decoded to something no compressor would have written.
    #[error("malformed tree header: {0}")]
    MalformedHeader(&'static str),

    /// A symbol reached the encoder without a code, e.g. because the input
    /// changed between the counting and encoding passes.
    #[error("symbol {0} has no code in the table")]
    UncodedSymbol(u16),

    /// An I/O error from the underlying bit source or sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
