//! Graph-level queries: construction entry point and reachability.

use crate::cancel::CancelToken;
use crate::tree::{ElementId, ElementKind, Tree};

use super::builder::CfgBuilder;
use super::types::Cfg;

impl Cfg {
    /// Constructs the graph for one function or closure body.
    ///
    /// Returns `None` when the builder declines (body root is not a block)
    /// or when `cancel` fires mid-build; the caller skips the body and
    /// reports nothing for it.
    #[must_use]
    pub fn from_body(tree: &Tree, body: ElementId, cancel: &CancelToken) -> Option<Self> {
        if !matches!(tree.kind(body), ElementKind::Block { .. }) {
            return None;
        }
        let builder = CfgBuilder::new(tree, cancel);
        builder.build(body)
    }

    /// Marks every node reachable from entry, following edges forward.
    /// Cycle-safe; only membership in the result is meaningful.
    #[must_use]
    pub fn reachable_set(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.nodes.len()];
        let mut stack = vec![self.entry];

        while let Some(node) = stack.pop() {
            if reachable[node.index()] {
                continue;
            }
            reachable[node.index()] = true;
            for &successor in &self.nodes[node.index()].successors {
                stack.push(successor);
            }
        }
        reachable
    }

    /// Tree elements whose node is not in `reachable`, in construction
    /// order (children before parents). Callers that need parents first
    /// reverse the result.
    #[must_use]
    pub fn unreachable_elements(&self, reachable: &[bool]) -> Vec<ElementId> {
        self.order
            .iter()
            .filter(|node| !reachable[node.index()])
            .filter_map(|node| self.nodes[node.index()].element)
            .collect()
    }

    /// Convenience wrapper: computes reachability and collects unreachable
    /// elements in one call.
    #[must_use]
    pub fn collect_unreachable_elements(&self) -> Vec<ElementId> {
        let reachable = self.reachable_set();
        self.unreachable_elements(&reachable)
    }
}
