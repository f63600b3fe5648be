use std::fmt;

/// Stable identity of a renderable unit.
///
/// Ids are unique within one diagram and stable across every step of a trace. Array cells are
/// identified by index, never by value, because values move between steps.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityId {
    /// Graph vertex, by label.
    Node {
        /// Vertex label from `input.nodes`.
        label: String,
    },
    /// Graph edge. Undirected edges are stored with endpoints in input order.
    Edge {
        /// Source label.
        from: String,
        /// Target label.
        to: String,
    },
    /// Array slot, by index.
    Cell {
        /// Zero-based index.
        index: usize,
    },
    /// Linked-list node, by id.
    ListNode {
        /// List node id from `input.list`.
        id: String,
    },
    /// `next` pointer between two list nodes.
    Link {
        /// Pointer owner.
        from: String,
        /// Pointer target.
        to: String,
    },
    /// Recursion-tree node covering the half-open sub-array `[lo, hi)`.
    TreeNode {
        /// Inclusive lower bound.
        lo: usize,
        /// Exclusive upper bound.
        hi: usize,
    },
    /// Parent-to-child connector in a recursion tree.
    Branch {
        /// Parent range `[lo, hi)`.
        parent: (usize, usize),
        /// Child range `[lo, hi)`.
        child: (usize, usize),
    },
}

impl EntityId {
    /// Graph vertex id.
    pub fn node(label: impl Into<String>) -> Self {
        Self::Node {
            label: label.into(),
        }
    }

    /// Graph edge id.
    pub fn edge(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Edge {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Array cell id.
    pub fn cell(index: usize) -> Self {
        Self::Cell { index }
    }

    /// Linked-list node id.
    pub fn list_node(id: impl Into<String>) -> Self {
        Self::ListNode { id: id.into() }
    }

    /// Linked-list pointer id.
    pub fn link(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Link {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Recursion-tree node id.
    pub fn tree_node(lo: usize, hi: usize) -> Self {
        Self::TreeNode { lo, hi }
    }

    /// True for entities drawn as connectors rather than bodies.
    pub fn is_connector(&self) -> bool {
        matches!(self, Self::Edge { .. } | Self::Link { .. } | Self::Branch { .. })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node { label } => write!(f, "node:{label}"),
            Self::Edge { from, to } => write!(f, "edge:{from}->{to}"),
            Self::Cell { index } => write!(f, "cell:{index}"),
            Self::ListNode { id } => write!(f, "list:{id}"),
            Self::Link { from, to } => write!(f, "link:{from}->{to}"),
            Self::TreeNode { lo, hi } => write!(f, "tree:{lo}..{hi}"),
            Self::Branch { parent, child } => write!(
                f,
                "branch:{}..{}->{}..{}",
                parent.0, parent.1, child.0, child.1
            ),
        }
    }
}
