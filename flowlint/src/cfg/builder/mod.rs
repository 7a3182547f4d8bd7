//! Builder state: node arena, edge wiring, loop/label scopes.

mod visits;

use smallvec::SmallVec;

use crate::cancel::CancelToken;
use crate::tree::{ElementId, Label, Tree};

use super::types::{Cfg, CfgNode, NodeId};

/// A scope a `break`/`continue` can target.
pub(super) struct Scope {
    /// Label on the construct, if any.
    pub(super) label: Option<Label>,
    /// Re-entry point for `continue`; `None` for labeled blocks, which only
    /// `break` can target.
    pub(super) head: Option<NodeId>,
    /// Node control lands on when the scope is escaped.
    pub(super) exit: NodeId,
}

/// Builder for constructing a [`Cfg`] from one body's tree.
pub(super) struct CfgBuilder<'a> {
    tree: &'a Tree,
    nodes: Vec<CfgNode>,
    order: Vec<NodeId>,
    scopes: Vec<Scope>,
    exit: NodeId,
    term: NodeId,
    cancel: &'a CancelToken,
    cancelled: bool,
}

impl<'a> CfgBuilder<'a> {
    pub(super) fn new(tree: &'a Tree, cancel: &'a CancelToken) -> Self {
        let mut builder = Self {
            tree,
            nodes: Vec::with_capacity(tree.len() + 4),
            order: Vec::new(),
            scopes: Vec::new(),
            exit: NodeId(0),
            term: NodeId(0),
            cancel,
            cancelled: false,
        };
        // Node 0 is the entry; the sinks follow.
        let _entry = builder.aux_node();
        builder.exit = builder.aux_node();
        builder.term = builder.aux_node();
        builder
    }

    pub(super) fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub(super) fn exit_sink(&self) -> NodeId {
        self.exit
    }

    pub(super) fn term_sink(&self) -> NodeId {
        self.term
    }

    /// Allocates the node for a tree element. The node is not in completion
    /// order until [`CfgBuilder::seal`] runs.
    pub(super) fn add_node(&mut self, element: ElementId) -> NodeId {
        self.alloc(Some(element))
    }

    /// Allocates a structural node (entry, sink, loop head, merge helper).
    pub(super) fn aux_node(&mut self) -> NodeId {
        self.alloc(None)
    }

    fn alloc(&mut self, element: Option<ElementId>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(CfgNode {
            element,
            successors: SmallVec::new(),
        });
        id
    }

    /// Records the element node in completion order. Composite constructs
    /// seal after their children, so reversing the order yields parents
    /// before children.
    pub(super) fn seal(&mut self, node: NodeId) {
        self.order.push(node);
    }

    /// Adds an edge `from -> to`, ignoring duplicates.
    pub(super) fn add_edge(&mut self, from: NodeId, to: NodeId) {
        let successors = &mut self.nodes[from.index()].successors;
        if !successors.contains(&to) {
            successors.push(to);
        }
    }

    /// Adds an edge when there is a live predecessor to add it from.
    pub(super) fn connect(&mut self, from: Option<NodeId>, to: NodeId) {
        if let Some(from) = from {
            self.add_edge(from, to);
        }
    }

    pub(super) fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub(super) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Innermost loop, or the scope carrying `label`. `None` when the label
    /// does not resolve; the jump then degrades to fall-through.
    pub(super) fn resolve_break(&self, label: Option<&Label>) -> Option<&Scope> {
        match label {
            Some(label) => self
                .scopes
                .iter()
                .rev()
                .find(|scope| scope.label.as_ref() == Some(label)),
            None => self.scopes.iter().rev().find(|scope| scope.head.is_some()),
        }
    }

    /// Like [`CfgBuilder::resolve_break`], but only loops qualify.
    pub(super) fn resolve_continue(&self, label: Option<&Label>) -> Option<NodeId> {
        let scope = match label {
            Some(label) => self
                .scopes
                .iter()
                .rev()
                .find(|scope| scope.head.is_some() && scope.label.as_ref() == Some(label)),
            None => self.scopes.iter().rev().find(|scope| scope.head.is_some()),
        };
        scope.and_then(|scope| scope.head)
    }

    /// Checked at every element visit; once set, the rest of the walk
    /// unwinds without wiring further edges.
    pub(super) fn check_cancelled(&mut self) -> bool {
        if self.cancelled || self.cancel.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }

    /// Runs the walk and finalizes the graph. `None` when cancelled; the
    /// partial graph is dropped.
    pub(super) fn build(mut self, body: ElementId) -> Option<Cfg> {
        let entry = NodeId(0);
        let after = self.visit_element(body, Some(entry));
        let exit = self.exit;
        self.connect(after, exit);

        if self.cancelled {
            return None;
        }
        Some(Cfg {
            nodes: self.nodes,
            entry,
            exit: self.exit,
            term: self.term,
            order: self.order,
        })
    }
}
