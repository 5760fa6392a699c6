//! # Huffman Compression with a Tree Header
//!
//! *Lossless byte-stream compression with an optimal prefix code.*
//!
//! ## Intuition First
//!
//! Morse code gives `E` a single dot and `Q` four symbols. Frequent letters get
//! short codes, rare ones get long codes, and the average message shrinks.
//! Huffman coding does the same thing for bytes, and it does it optimally:
//! among all codes that assign a whole number of bits to each symbol, none has
//! a shorter expected length.
//!
//! ## The Problem
//!
//! A decoder has to know which code the encoder used. Shipping the frequency
//! table works but costs up to 257 counts. This crate instead ships the
//! *tree itself*, pre-order, one bit per node plus 9 bits per leaf, so the
//! header size scales with the number of distinct bytes actually present.
//!
//! The decoder also has to know where the data ends. Rather than storing a
//! length, a synthetic end-of-stream symbol ([`PSEUDO_EOF`], value 256) is
//! counted once and encoded after the last byte.
//!
//! ## Stream Layout
//!
//! ```text
//! [32 bits]  HUFF_TREE magic (0xface8201)
//! [header ]  pre-order tree: 0 = internal, 1 + 9-bit symbol = leaf
//! [body   ]  code of each input byte, in order
//! [eof    ]  code of PSEUDO_EOF, then zero padding to a byte boundary
//! ```
//!
//! ## Pipeline
//!
//! Compression: [`FrequencyTable`] → [`HuffmanTree`] → [`CodeTable`] →
//! [`header::write_header`] → [`transcode::encode_body`].
//!
//! Decompression: magic check → [`header::read_header`] →
//! [`transcode::decode_body`].
//!
//! ## Failure Modes
//!
//! 1. **Wrong format**: a stream not starting with [`HUFF_TREE`] is rejected
//!    before anything else is read ([`Error::BadHeaderMagic`]).
//! 2. **Truncation**: running out of bits in the header or before the
//!    end-of-stream code is an error, never silently short output.
//! 3. **Empty input**: the tree is a single sentinel leaf with an empty code.
//!    Both code generation and decoding handle a leaf root explicitly.
//!
//! ## Example
//!
//! ```
//! let packed = huff::compress_bytes(b"abracadabra")?;
//! assert_eq!(huff::decompress_bytes(&packed)?, b"abracadabra");
//! # Ok::<(), huff::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod codes;
pub mod config;
pub mod error;
pub mod freq;
pub mod header;
pub mod processor;
pub mod transcode;
pub mod tree;

pub use bitio::{BitReader, BitSink, BitSource, BitWriter};
pub use codes::CodeTable;
pub use config::{Config, Verbosity};
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use processor::{compress_bytes, decompress_bytes, HuffProcessor};
pub use tree::{HuffmanTree, Node};

/// Bits in one input word.
pub const BITS_PER_WORD: u32 = 8;

/// Width of the leading magic field.
pub const BITS_PER_INT: u32 = 32;

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 1 << BITS_PER_WORD;

/// Synthetic end-of-stream symbol.
pub const PSEUDO_EOF: u16 = ALPHABET_SIZE as u16;

/// Width of a leaf's symbol field in the header; fits `0..=PSEUDO_EOF`.
pub const SYMBOL_BITS: u32 = BITS_PER_WORD + 1;

/// Base format number.
pub const HUFF_NUMBER: u32 = 0xface_8200;

/// Magic for streams carrying a tree header.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;
