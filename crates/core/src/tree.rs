//! Prefix-code tree: arena storage and optimal construction.
//!
//! All nodes live in one `Vec` owned by [`PrefixTree`]; parents refer to
//! their children by [`NodeId`]. Each node has exactly one parent (except
//! the root), so the arena is a tree, not a graph. Dropping the tree drops
//! the `Vec`, with no recursion regardless of shape, and every traversal in
//! this crate uses an explicit stack for the same reason.
//!
//! # Construction
//!
//! [`PrefixTree::build`] seeds a [`PrioritySelector`] with one leaf per symbol
//! (in alphabet order) and repeatedly merges the two lightest nodes. The
//! first one extracted becomes the left child and the second the right child.
//! Since the selector breaks ties by insertion order, the same alphabet always
//! yields the same tree.

use std::fmt;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::codeword::Bit;
use crate::error::{DecodeError, Error, InputError, Result};
use crate::selector::PrioritySelector;
use crate::symbol::Symbol;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Id for arena slot `index`; used when assembling raw trees.
    pub fn from_raw(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the prefix tree.
///
/// Trees built by [`PrefixTree::build`] only contain internal nodes with both
/// children. Trees supplied through [`PrefixTree::from_raw_parts`] may contain
/// internal nodes with a single child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

impl<S> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// `(left, right)` children; both `None` for a leaf.
    pub fn children(&self) -> (Option<NodeId>, Option<NodeId>) {
        match self {
            Node::Leaf { .. } => (None, None),
            Node::Internal { left, right, .. } => (*left, *right),
        }
    }
}

/// An immutable prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree<S> {
    nodes: Vec<Node<S>>,
    root: NodeId,
}

impl<S: Symbol> PrefixTree<S> {
    /// Build the optimal prefix tree for `alphabet`.
    ///
    /// A one-symbol alphabet yields a tree that is a single leaf.
    ///
    /// # Errors
    /// - `Error::Allocation` if the arena or queue cannot be reserved
    /// - `InputError::WeightOverflow` if subtree weights exceed `u64`
    pub fn build(alphabet: &Alphabet<S>) -> Result<Self> {
        let k = alphabet.len();
        if k == 0 {
            return Err(InputError::EmptyAlphabet.into());
        }

        // k leaves and k - 1 internal nodes
        let total = 2 * k - 1;
        let mut nodes: Vec<Node<S>> = Vec::new();
        nodes.try_reserve_exact(total).map_err(|_| Error::Allocation {
            what: "tree nodes",
            requested: total,
        })?;

        let mut queue = PrioritySelector::with_capacity(k)?;
        for entry in alphabet.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf {
                symbol: entry.symbol,
                weight: entry.weight,
            });
            queue.insert(entry.weight, id)?;
        }

        while queue.len() > 1 {
            let (wa, a) = queue.extract_min()?;
            let (wb, b) = queue.extract_min()?;
            let weight = wa.checked_add(wb).ok_or(InputError::WeightOverflow)?;

            let id = NodeId(nodes.len());
            trace!(left = a.0, right = b.0, weight, node = id.0, "merge");
            nodes.push(Node::Internal {
                weight,
                left: Some(a),
                right: Some(b),
            });
            queue.insert(weight, id)?;
        }

        let (_, root) = queue.extract_min()?;
        debug!(
            symbols = k,
            nodes = nodes.len(),
            weight = nodes[root.0].weight(),
            "built prefix tree"
        );

        Ok(Self { nodes, root })
    }

    /// Build directly from parallel symbol and weight slices.
    pub fn from_weights(symbols: &[S], weights: &[u64]) -> Result<Self> {
        Self::build(&Alphabet::new(symbols, weights)?)
    }

    /// Adopt an externally constructed node arena.
    ///
    /// The arena must form a single tree rooted at `root`: every child index
    /// in range, every node reachable from the root exactly once, internal
    /// weights equal to the sum of their children, and leaf symbols unique.
    /// Internal nodes with a single child are accepted.
    ///
    /// # Errors
    /// - `DecodeError::EmptyTree` if `nodes` is empty
    /// - `InputError` variants describing the first structural defect found
    pub fn from_raw_parts(nodes: Vec<Node<S>>, root: usize) -> Result<Self> {
        let len = nodes.len();
        if len == 0 {
            return Err(DecodeError::EmptyTree.into());
        }
        if root >= len {
            return Err(InputError::InvalidRoot { root, len }.into());
        }

        for (i, node) in nodes.iter().enumerate() {
            if let Node::Internal { weight, left, right } = node {
                if left.is_none() && right.is_none() {
                    return Err(InputError::ChildlessInternal { node: i }.into());
                }

                let mut expected = 0u64;
                for child in [left, right].into_iter().flatten() {
                    let child_node = nodes.get(child.0).ok_or(InputError::DanglingChild {
                        node: i,
                        child: child.0,
                        len,
                    })?;
                    expected = expected
                        .checked_add(child_node.weight())
                        .ok_or(InputError::WeightOverflow)?;
                }
                if expected != *weight {
                    return Err(InputError::WeightMismatch {
                        node: i,
                        expected,
                        actual: *weight,
                    }
                    .into());
                }
            }
        }

        let mut visited = vec![false; len];
        let mut leaf_symbols = std::collections::HashSet::new();
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            if visited[i] {
                return Err(InputError::SharedNode { node: i }.into());
            }
            visited[i] = true;

            match &nodes[i] {
                Node::Leaf { symbol, .. } => {
                    if !leaf_symbols.insert(*symbol) {
                        return Err(InputError::DuplicateSymbol {
                            symbol: symbol.describe(),
                            index: i,
                        }
                        .into());
                    }
                }
                Node::Internal { left, right, .. } => {
                    stack.extend([left, right].into_iter().flatten().map(|c| c.0));
                }
            }
        }

        if let Some(node) = visited.iter().position(|v| !v) {
            return Err(InputError::UnreachableNode { node }.into());
        }

        Ok(Self {
            nodes,
            root: NodeId(root),
        })
    }
}

impl<S> PrefixTree<S> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node for `id`, or `None` if `id` is outside this tree.
    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    /// Node for an id obtained from this tree (its root or a child link).
    pub(crate) fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Child reached from `id` by following `bit` (`Zero` = left).
    ///
    /// `None` when there is no such child or `id` is outside this tree.
    pub fn child(&self, id: NodeId, bit: Bit) -> Option<NodeId> {
        let (left, right) = self.get(id)?.children();
        match bit {
            Bit::Zero => left,
            Bit::One => right,
        }
    }

    /// Total number of nodes (leaves and internal).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: a tree always has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// True when the root itself is a leaf (one-symbol alphabet).
    pub fn is_single_leaf(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Weight of the root: the total weight of all leaves.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, d)) = stack.pop() {
            max = max.max(d);
            let (left, right) = self.node(id).children();
            stack.extend([left, right].into_iter().flatten().map(|c| (c, d + 1)));
        }
        max
    }
}

/// Indented rendering of the tree structure, one node per line.
impl<S: Symbol> fmt::Display for PrefixTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match self.node(id) {
                Node::Leaf { symbol, weight } => {
                    writeln!(
                        f,
                        "{}{} -> leaf {} [weight: {}]",
                        indent,
                        label,
                        symbol.describe(),
                        weight
                    )?;
                }
                Node::Internal { weight, left, right } => {
                    writeln!(f, "{}{} -> internal [weight: {}]", indent, label, weight)?;
                    if let Some(r) = right {
                        stack.push((*r, depth + 1, "1"));
                    }
                    if let Some(l) = left {
                        stack.push((*l, depth + 1, "0"));
                    }
                }
            }
        }
        Ok(())
    }
}
