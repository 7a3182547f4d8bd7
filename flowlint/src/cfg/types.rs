//! CFG node and graph types.

use smallvec::SmallVec;

use crate::tree::ElementId;

/// Index of a node in a [`Cfg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A point of execution in the graph.
#[derive(Debug, Clone)]
pub struct CfgNode {
    /// Tree element this node completes, `None` for structural nodes
    /// (entry, exits, loop heads).
    pub element: Option<ElementId>,
    /// Outgoing control-transfer edges.
    pub successors: SmallVec<[NodeId; 2]>,
}

/// Control-flow graph for a single function or closure body.
///
/// Append-only while the builder runs, read-only afterwards; discarded once
/// findings for the body are emitted.
#[derive(Debug)]
pub struct Cfg {
    /// Nodes indexed by [`NodeId`].
    pub(super) nodes: Vec<CfgNode>,
    /// Entry node; reachable by definition.
    pub(super) entry: NodeId,
    /// Normal-completion sink; `return` and body fall-through target it.
    pub(super) exit: NodeId,
    /// Divergence sink for calls that never return.
    pub(super) term: NodeId,
    /// Element nodes in completion order: children sealed before parents.
    pub(super) order: Vec<NodeId>,
}

impl Cfg {
    /// The node behind `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &CfgNode {
        &self.nodes[id.index()]
    }

    /// Entry node.
    #[must_use]
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Normal-completion sink.
    #[must_use]
    pub fn exit(&self) -> NodeId {
        self.exit
    }

    /// Divergence sink.
    #[must_use]
    pub fn term(&self) -> NodeId {
        self.term
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes (never produced by the builder).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
