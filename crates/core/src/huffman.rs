//! Huffman coding over `char` symbols.
//!
//! The pipeline is: count symbols into a [`FrequencyTable`], grow a
//! [`HuffmanTree`] from a min-priority queue, walk the tree into a
//! [`CodeTable`], then concatenate codes into a [`BitString`].
//!
//! # Tree representation
//!
//! Nodes live in an arena (`Vec<HuffmanNode>`) and refer to their children by
//! index. The root is always the last node pushed.
//!
//! # Tie-breaking
//!
//! The queue orders nodes by `(weight, smallest symbol in the subtree)`,
//! ascending. Every symbol sits in exactly one leaf, so no two queued nodes
//! ever compare equal and the tree is fully determined by the input. The first
//! node popped becomes the left child (`0`), the second the right child (`1`).
//!
//! # Degenerate trees
//!
//! Input with a single distinct symbol produces a lone leaf. Its code is `0`,
//! one bit per symbol, so the bit count still identifies the symbol count.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

use crate::bitio::{BitReader, BitString, BitWriter};
use crate::error::{CorruptStreamError, Error, Result};

/// Occurrence count per symbol, ordered by symbol.
///
/// # Invariants
/// - every count is non-zero
/// - the counts sum to the number of symbols in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every symbol of `input` in one pass.
    ///
    /// # Errors
    /// `Error::EmptyInput` if `input` is empty.
    pub fn from_text(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut counts = BTreeMap::new();
        for symbol in input.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        Ok(Self { counts })
    }

    /// Count for `symbol` (0 if absent).
    pub fn get(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

/// Index of a node inside a [`HuffmanTree`] arena.
pub type NodeId = usize;

/// A node of the Huffman tree.
///
/// An internal node's weight is the sum of its children's weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Priority queue entry. Ordering is reversed so `BinaryHeap` pops the
/// lightest node first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    weight: u64,
    min_symbol: char,
    node: NodeId,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.min_symbol.cmp(&self.min_symbol))
    }
}

/// Huffman tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// # Errors
    /// `Error::EmptyInput` if the table has no symbols.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(frequencies.len() * 2 - 1);
        let mut queue = BinaryHeap::with_capacity(frequencies.len());

        for (symbol, weight) in frequencies.iter() {
            queue.push(QueueEntry {
                weight,
                min_symbol: symbol,
                node: nodes.len(),
            });
            nodes.push(HuffmanNode::Leaf { symbol, weight });
        }

        while let (Some(left), Some(right)) = (queue.pop(), queue.pop()) {
            let weight = left.weight + right.weight;
            queue.push(QueueEntry {
                weight,
                min_symbol: left.min_symbol.min(right.min_symbol),
                node: nodes.len(),
            });
            nodes.push(HuffmanNode::Internal {
                weight,
                left: left.node,
                right: right.node,
            });
        }

        // The loop above pops the last entry without a partner, and that
        // entry is always the most recently pushed node.
        let root = nodes.len() - 1;

        tracing::trace!(
            symbols = frequencies.len(),
            nodes = nodes.len(),
            "huffman tree built"
        );

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// `id` must come from this tree.
    pub(crate) fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// True when the tree is a single leaf.
    pub fn is_degenerate(&self) -> bool {
        matches!(self.nodes[self.root], HuffmanNode::Leaf { .. })
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                HuffmanNode::Leaf { .. } => height = height.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        height
    }

    /// Derive the code of every leaf (left = `0`, right = `1`).
    pub fn code_table(&self) -> CodeTable {
        let mut codes = BTreeMap::new();

        if let HuffmanNode::Leaf { symbol, .. } = self.nodes[self.root] {
            codes.insert(symbol, Code(vec![false]));
            return CodeTable { codes };
        }

        let mut stack = vec![(self.root, Vec::new())];
        while let Some((id, path)) = stack.pop() {
            match self.nodes[id] {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(symbol, Code(path));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }

        CodeTable { codes }
    }
}

/// The bit sequence assigned to one symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a proper prefix of `other`.
    pub fn is_proper_prefix_of(&self, other: &Code) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, ordered by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Check that no code is a proper prefix of another.
    ///
    /// After sorting, a code that prefixes any other code also prefixes its
    /// immediate successor, so adjacent pairs are enough.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        sorted
            .windows(2)
            .all(|pair| pair[0] != pair[1] && !pair[0].is_proper_prefix_of(pair[1]))
    }
}

/// Output of [`compress`]: the bitstream plus the tree needed to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEncoded {
    pub bits: BitString,
    pub tree: HuffmanTree,
}

impl HuffmanEncoded {
    pub fn code_table(&self) -> CodeTable {
        self.tree.code_table()
    }
}

impl fmt::Display for HuffmanEncoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.bits, f)
    }
}

/// Concatenate the code of every input symbol, in input order.
///
/// # Errors
/// `Error::UnsupportedSymbol` if a symbol has no code in `table`.
pub fn encode(input: &str, table: &CodeTable) -> Result<BitString> {
    let mut writer = BitWriter::new();
    for (position, symbol) in input.chars().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(Error::UnsupportedSymbol { symbol, position })?;
        for &bit in code.bits() {
            writer.write_bit(bit);
        }
    }
    Ok(writer.into_bit_string())
}

/// Walk the tree once per symbol until every bit is consumed.
///
/// # Errors
/// - `CorruptStreamError::TruncatedCode` if the bits run out mid-traversal
/// - `CorruptStreamError::InvalidBit` if a single-leaf tree sees a `1`
pub fn decode(bits: &BitString, tree: &HuffmanTree) -> Result<String> {
    let mut reader = BitReader::new(bits);
    let mut output = String::new();

    if let HuffmanNode::Leaf { symbol, .. } = *tree.node(tree.root()) {
        while !reader.is_empty() {
            let position = reader.position();
            if reader.read_bit()? {
                return Err(CorruptStreamError::InvalidBit { position }.into());
            }
            output.push(symbol);
        }
        return Ok(output);
    }

    while !reader.is_empty() {
        let start = reader.position();
        let mut current = tree.root();
        loop {
            match *tree.node(current) {
                HuffmanNode::Leaf { symbol, .. } => {
                    output.push(symbol);
                    break;
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if reader.is_empty() {
                        return Err(CorruptStreamError::TruncatedCode { position: start }.into());
                    }
                    current = if reader.read_bit()? { right } else { left };
                }
            }
        }
    }

    Ok(output)
}

/// Build a tree for `text` and encode it.
///
/// # Errors
/// `Error::EmptyInput` if `text` is empty.
pub fn compress(text: &str) -> Result<HuffmanEncoded> {
    let frequencies = FrequencyTable::from_text(text)?;
    let tree = HuffmanTree::build(&frequencies)?;
    let table = tree.code_table();
    let bits = encode(text, &table)?;

    tracing::debug!(
        symbols = frequencies.total(),
        distinct = frequencies.len(),
        height = tree.height(),
        bits = bits.len(),
        "huffman compress"
    );

    Ok(HuffmanEncoded { bits, tree })
}

/// Decode `bits` with the tree returned by [`compress`].
pub fn decompress(bits: &BitString, tree: &HuffmanTree) -> Result<String> {
    decode(bits, tree)
}

/// Space saved versus 8 bits per symbol, in percent.
pub fn ratio(original: &str, compressed: &BitString) -> f64 {
    crate::report::ratio(original.chars().count(), compressed.len())
}
