//! Tree header serialization.
//!
//! The tree is written pre-order: a `0` bit for an internal node followed by
//! its left then right subtree, or a `1` bit followed by the leaf's symbol in
//! [`SYMBOL_BITS`] bits. No length prefix is needed; the reader stops after
//! the last leaf of the right spine.
//!
//! ```text
//!        *            0
//!       / \           ├─ 0
//!      *   A          │  ├─ 1 <B:9>
//!     / \             │  └─ 1 <EOF:9>
//!    B  EOF           └─ 1 <A:9>
//! ```

use crate::bitio::{BitSink, BitSource};
use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, Node};
use crate::{PSEUDO_EOF, SYMBOL_BITS};

/// Deepest nesting a header may describe. A tree over 257 leaves is at most
/// 256 levels deep.
pub const MAX_DEPTH: usize = PSEUDO_EOF as usize;

/// Write `tree` to `sink` in pre-order.
pub fn write_header<W: BitSink>(tree: &HuffmanTree, sink: &mut W) -> Result<()> {
    write_node(tree.root(), sink)
}

fn write_node<W: BitSink>(node: &Node, sink: &mut W) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            sink.write_bits(1, 1)?;
            sink.write_bits(SYMBOL_BITS, u32::from(*symbol))?;
        }
        Node::Internal { left, right, .. } => {
            sink.write_bits(1, 0)?;
            write_node(left, sink)?;
            write_node(right, sink)?;
        }
    }
    Ok(())
}

/// Rebuild a tree from its pre-order encoding.
///
/// Reads exactly the bits [`write_header`] produced and nothing after them.
///
/// # Errors
/// - [`Error::HeaderTruncated`] if the source runs dry mid-header.
/// - [`Error::MalformedHeader`] for a symbol above 256 or nesting deeper
///   than [`MAX_DEPTH`].
pub fn read_header<R: BitSource>(source: &mut R) -> Result<HuffmanTree> {
    read_node(source, 0).map(HuffmanTree::from_root)
}

fn read_node<R: BitSource>(source: &mut R, depth: usize) -> Result<Node> {
    let bit = source.read_bits(1)?.ok_or(Error::HeaderTruncated)?;
    if bit == 0 {
        if depth >= MAX_DEPTH {
            return Err(Error::MalformedHeader("tree nested too deeply"));
        }
        let left = read_node(source, depth + 1)?;
        let right = read_node(source, depth + 1)?;
        Ok(Node::internal(left, right))
    } else {
        let symbol = source
            .read_bits(SYMBOL_BITS)?
            .ok_or(Error::HeaderTruncated)?;
        if symbol > u32::from(PSEUDO_EOF) {
            return Err(Error::MalformedHeader("leaf symbol out of range"));
        }
        Ok(Node::leaf(symbol as u16, 0))
    }
}
