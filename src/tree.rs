//! Huffman tree construction.
//!
//! Leaves carry symbols, internal nodes carry nothing but two children and
//! the summed weight of their subtree. The tree is built bottom-up from a
//! [`FrequencyTable`] or top-down by the header reader.
//!
//! # Tie-breaking
//!
//! Nodes leave the priority queue ordered by `(weight, sequence)`. Leaves
//! take sequence numbers in ascending symbol order, and every merged node
//! takes the next unused number. The first node extracted in a merge
//! becomes the left child. This pins the tree, and therefore the output,
//! for a given input.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::freq::FrequencyTable;
use crate::PSEUDO_EOF;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol in `0..=256`.
    Leaf {
        /// The byte value, or [`PSEUDO_EOF`].
        symbol: u16,
        /// Occurrence count; zero for trees read from a header.
        weight: u64,
    },
    /// Exactly two owned children.
    Internal {
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
        /// Sum of the children's weights.
        weight: u64,
    },
}

impl Node {
    /// Leaf holding `symbol`.
    pub fn leaf(symbol: u16, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Internal node over two subtrees, weighted by their sum.
    pub fn internal(left: Node, right: Node) -> Self {
        let weight = left.weight() + right.weight();
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight,
        }
    }

    /// Aggregate weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Symbol if this is a leaf.
    pub fn symbol(&self) -> Option<u16> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Queue entry: a subtree plus its position in the tie-break order.
struct Pending {
    node: Node,
    seq: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        (other.node.weight(), other.seq).cmp(&(self.node.weight(), self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A complete Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `freqs` by repeated minimum-weight merging.
    ///
    /// The sentinel always has a count, so there is at least one leaf.
    /// With empty input that leaf is the whole tree.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut pq = BinaryHeap::new();
        let mut seq = 0;
        for (symbol, count) in freqs.symbols() {
            pq.push(Pending {
                node: Node::leaf(symbol, count),
                seq,
            });
            seq += 1;
        }

        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            pq.push(Pending {
                node: Node::internal(left.node, right.node),
                seq,
            });
            seq += 1;
        }

        let root = pq
            .pop()
            .map(|p| p.node)
            .unwrap_or_else(|| Node::leaf(PSEUDO_EOF, 1));
        Self { root }
    }

    /// Wrap an already-assembled root.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => walk(left) + walk(right),
            }
        }
        walk(&self.root)
    }

    /// Depth of the leaf holding `symbol`, or `None` if absent.
    pub fn depth_of(&self, symbol: u16) -> Option<usize> {
        fn walk(node: &Node, symbol: u16, depth: usize) -> Option<usize> {
            match node {
                Node::Leaf { symbol: s, .. } => (*s == symbol).then_some(depth),
                Node::Internal { left, right, .. } => walk(left, symbol, depth + 1)
                    .or_else(|| walk(right, symbol, depth + 1)),
            }
        }
        walk(&self.root, symbol, 0)
    }
}
