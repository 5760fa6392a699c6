//! Code table generation.

use std::fmt;

use crate::freq::SYMBOL_COUNT;
use crate::tree::{HuffmanTree, Node};

/// Symbol to root-to-leaf path, `0` for left and `1` for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Vec<u8>>>,
}

impl CodeTable {
    /// Walk `tree` depth-first and record the path to every leaf.
    ///
    /// A root that is itself a leaf gets the empty path.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        Self::build_codes(tree.root(), Vec::new(), &mut codes);
        Self { codes }
    }

    /// Extend `prefix` one bit per level and store it at each leaf's slot.
    fn build_codes(node: &Node, prefix: Vec<u8>, codes: &mut [Option<Vec<u8>>]) {
        match node {
            Node::Leaf { symbol, .. } => {
                if let Some(slot) = codes.get_mut(*symbol as usize) {
                    *slot = Some(prefix);
                }
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(0);
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(1);
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }

    /// Path for `symbol`, if it appears in the tree.
    pub fn get(&self, symbol: u16) -> Option<&[u8]> {
        self.codes.get(symbol as usize)?.as_deref()
    }

    /// All `(symbol, path)` pairs, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &[u8])> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, code)| code.as_deref().map(|c| (s as u16, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renders a path as a string of `0` and `1`.
pub struct BitPath<'a>(pub &'a [u8]);

impl fmt::Display for BitPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.0 {
            f.write_str(if bit == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;
    use crate::PSEUDO_EOF;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::from_tree(&HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data)))
    }

    #[test]
    fn test_paths_follow_tree() {
        let codes = table_for(&[65, 65, 66, 65]);
        assert_eq!(codes.get(65), Some(&[1u8][..]));
        assert_eq!(codes.get(66), Some(&[0u8, 0][..]));
        assert_eq!(codes.get(PSEUDO_EOF), Some(&[0u8, 1][..]));
        assert_eq!(codes.get(67), None);
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn test_single_leaf_has_empty_path() {
        let codes = table_for(&[]);
        assert_eq!(codes.get(PSEUDO_EOF), Some(&[0u8; 0][..]));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_table_is_idempotent() {
        let freqs = FrequencyTable::from_bytes(b"the quick brown fox");
        let tree = HuffmanTree::from_frequencies(&freqs);
        assert_eq!(CodeTable::from_tree(&tree), CodeTable::from_tree(&tree));
    }

    #[test]
    fn test_prefix_free() {
        let codes = table_for(b"she sells sea shells by the sea shore");
        let all: Vec<_> = codes.iter().collect();
        for (i, &(_, a)) in all.iter().enumerate() {
            assert!(!a.is_empty());
            for &(_, b) in &all[i + 1..] {
                assert!(!a.starts_with(b) && !b.starts_with(a));
            }
        }
    }

    #[test]
    fn test_bit_path_display() {
        assert_eq!(BitPath(&[1, 0, 1, 1]).to_string(), "1011");
        assert_eq!(BitPath(&[]).to_string(), "");
    }
}
