//! Body encoding and decoding.
//!
//! The body is the concatenation of the code for every input byte, in
//! order, followed by the code for [`PSEUDO_EOF`]. Decoding walks the tree
//! one bit at a time and restarts at the root after each emitted byte.

use crate::bitio::{BitSink, BitSource, MAX_BITS};
use crate::codes::CodeTable;
use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, Node};
use crate::{BITS_PER_WORD, PSEUDO_EOF};

/// Write `path` as bit groups of at most 32 bits. Root-first, so the first
/// path element ends up most significant.
fn write_path<W: BitSink>(path: &[u8], sink: &mut W) -> Result<()> {
    for chunk in path.chunks(MAX_BITS as usize) {
        let value = chunk
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit & 1));
        sink.write_bits(chunk.len() as u32, value)?;
    }
    Ok(())
}

/// Encode every remaining byte of `source`, then the sentinel.
///
/// Returns the number of input bytes encoded. The source must be positioned
/// at the start of the data.
///
/// # Errors
/// [`Error::UncodedSymbol`] if a byte (or the sentinel) has no code, which
/// happens when the source differs from the data the table was built from.
pub fn encode_body<R: BitSource, W: BitSink>(
    codes: &CodeTable,
    source: &mut R,
    sink: &mut W,
) -> Result<u64> {
    let mut count = 0u64;
    while let Some(word) = source.read_bits(BITS_PER_WORD)? {
        let symbol = word as u16;
        let path = codes.get(symbol).ok_or(Error::UncodedSymbol(symbol))?;
        write_path(path, sink)?;
        count += 1;
    }
    let eof = codes
        .get(PSEUDO_EOF)
        .ok_or(Error::UncodedSymbol(PSEUDO_EOF))?;
    write_path(eof, sink)?;
    Ok(count)
}

/// Decode bytes from `source` into `sink` until the sentinel leaf.
///
/// Leaf-ness is checked before each bit is consumed, so a tree that is a
/// lone sentinel leaf decodes to nothing without reading. Bits after the
/// sentinel (byte padding) are left unread.
///
/// Returns the number of bytes written.
///
/// # Errors
/// - [`Error::MissingSentinel`] if the source ends before the sentinel.
/// - [`Error::MalformedHeader`] if the root is a leaf other than the
///   sentinel, which no bit sequence could terminate.
pub fn decode_body<R: BitSource, W: BitSink>(
    tree: &HuffmanTree,
    source: &mut R,
    sink: &mut W,
) -> Result<u64> {
    let root = tree.root();
    if let Node::Leaf { symbol, .. } = root {
        if *symbol == PSEUDO_EOF {
            return Ok(0);
        }
        return Err(Error::MalformedHeader("single-leaf tree without end-of-stream"));
    }

    let mut count = 0u64;
    let mut current = root;
    loop {
        match current {
            Node::Leaf { symbol, .. } => {
                if *symbol == PSEUDO_EOF {
                    return Ok(count);
                }
                sink.write_bits(BITS_PER_WORD, u32::from(*symbol))?;
                count += 1;
                current = root;
            }
            Node::Internal { left, right, .. } => {
                let bit = source.read_bits(1)?.ok_or(Error::MissingSentinel)?;
                current = if bit == 0 { left } else { right };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::{BitReader, BitWriter};
    use crate::freq::FrequencyTable;
    use std::io::Cursor;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    fn encode(data: &[u8], tree: &HuffmanTree) -> (Vec<u8>, u64) {
        let codes = CodeTable::from_tree(tree);
        let mut out: Vec<u8> = Vec::new();
        let mut w = BitWriter::new(&mut out);
        let mut r = BitReader::new(Cursor::new(data.to_vec()));
        assert_eq!(encode_body(&codes, &mut r, &mut w).unwrap(), data.len() as u64);
        let bits = w.bits_written();
        w.close().unwrap();
        drop(w);
        (out, bits)
    }

    fn decode(body: Vec<u8>, tree: &HuffmanTree) -> Result<Vec<u8>> {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut w = BitWriter::new(&mut out);
            decode_body(tree, &mut BitReader::new(Cursor::new(body)), &mut w)?;
            w.close()?;
        }
        Ok(out)
    }

    #[test]
    fn test_body_bits() {
        let data = [65, 65, 66, 65];
        let tree = tree_for(&data);
        let (body, bits) = encode(&data, &tree);
        // A=1 A=1 B=00 A=1 EOF=01
        assert_eq!(bits, 7);
        assert_eq!(body, vec![0b1100_1010]);
        assert_eq!(decode(body, &tree).unwrap(), data);
    }

    #[test]
    fn test_lone_sentinel_reads_nothing() {
        let tree = tree_for(&[]);
        let (body, bits) = encode(&[], &tree);
        assert_eq!(bits, 0);
        assert!(body.is_empty());
        assert_eq!(decode(body, &tree).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_lone_non_sentinel_leaf_rejected() {
        let tree = HuffmanTree::from_root(Node::leaf(b'x' as u16, 0));
        let err = decode(vec![0xff], &tree).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_truncated_body() {
        let data = b"a longer message so the body spans several bytes";
        let tree = tree_for(data);
        let (body, _) = encode(data, &tree);
        let cut = body[..body.len() - 2].to_vec();
        assert!(matches!(decode(cut, &tree), Err(Error::MissingSentinel)));
        assert!(matches!(decode(Vec::new(), &tree), Err(Error::MissingSentinel)));
    }

    #[test]
    fn test_byte_without_code_rejected() {
        let codes = CodeTable::from_tree(&tree_for(b"aaa"));
        let mut out: Vec<u8> = Vec::new();
        let mut w = BitWriter::new(&mut out);
        let mut r = BitReader::new(Cursor::new(b"ab".to_vec()));
        let err = encode_body(&codes, &mut r, &mut w).unwrap_err();
        assert!(matches!(err, Error::UncodedSymbol(s) if s == u16::from(b'b')));
    }

    #[test]
    fn test_long_codes_split_into_groups() {
        // A caterpillar tree: symbol k sits at depth k + 1, EOF at depth 40.
        let mut node = Node::leaf(PSEUDO_EOF, 0);
        for sym in (0..40u16).rev() {
            node = Node::internal(Node::leaf(sym, 0), node);
        }
        let tree = HuffmanTree::from_root(node);
        let codes = CodeTable::from_tree(&tree);
        assert_eq!(codes.get(PSEUDO_EOF).map(<[u8]>::len), Some(40));

        let data = [39, 0, 38, 39, 7];
        let (body, bits) = encode(&data, &tree);
        assert_eq!(bits, 40 + 1 + 39 + 40 + 8 + 40);
        assert_eq!(decode(body, &tree).unwrap(), data);
    }
}
