//! The element walk: one exhaustive match over the construct kinds.
//!
//! `visit_element` threads an optional live predecessor through the tree and
//! returns the element's completion node, or `None` when control never
//! continues past the element (return, break, continue, diverging call).
//! Nodes are still allocated on dead paths so that code after a jump shows up
//! with no incoming edges.

use crate::tree::{ElementId, ElementKind};

use super::{CfgBuilder, NodeId, Scope};

impl CfgBuilder<'_> {
    pub(super) fn visit_element(
        &mut self,
        id: ElementId,
        pred: Option<NodeId>,
    ) -> Option<NodeId> {
        if self.check_cancelled() {
            return pred;
        }

        match self.tree().kind(id) {
            ElementKind::Value => self.leaf(id, pred),

            // Closure bodies get their own independent graph; here the
            // closure is just a value.
            ElementKind::Closure { .. } => self.leaf(id, pred),

            ElementKind::Call { args, diverges } => {
                let mut cur = pred;
                for &arg in args {
                    cur = self.visit_element(arg, cur);
                }
                let node = self.add_node(id);
                self.connect(cur, node);
                self.seal(node);
                if *diverges {
                    let term = self.term_sink();
                    self.add_edge(node, term);
                    None
                } else {
                    Some(node)
                }
            }

            ElementKind::ExprStmt { expr } => {
                let node = self.add_node(id);
                let after = self.visit_element(*expr, pred);
                self.connect(after, node);
                self.seal(node);
                after.map(|_| node)
            }

            ElementKind::Let { init } => {
                let node = self.add_node(id);
                let after = match init {
                    Some(init) => self.visit_element(*init, pred),
                    None => pred,
                };
                self.connect(after, node);
                self.seal(node);
                after.map(|_| node)
            }

            ElementKind::Block { stmts, tail, label } => {
                let node = self.add_node(id);
                let labeled = label.is_some();
                if labeled {
                    self.push_scope(Scope {
                        label: label.clone(),
                        head: None,
                        exit: node,
                    });
                }
                let mut cur = pred;
                for &stmt in stmts {
                    cur = self.visit_element(stmt, cur);
                }
                if let Some(tail) = tail {
                    cur = self.visit_element(*tail, cur);
                }
                if labeled {
                    self.pop_scope();
                }
                self.connect(cur, node);
                self.seal(node);
                // Reachability of the block node decides whether anything
                // chained after it is live.
                Some(node)
            }

            ElementKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let node = self.add_node(id);
                let after_cond = self.visit_element(*cond, pred);
                let after_then = self.visit_element(*then_branch, after_cond);
                self.connect(after_then, node);
                match else_branch {
                    Some(els) => {
                        let after_else = self.visit_element(*els, after_cond);
                        self.connect(after_else, node);
                    }
                    // No else: execution may bypass the conditional.
                    None => self.connect(after_cond, node),
                }
                self.seal(node);
                Some(node)
            }

            ElementKind::Match { scrutinee, arms } => {
                let node = self.add_node(id);
                let after_scrutinee = self.visit_element(*scrutinee, pred);
                if arms.is_empty() {
                    // Not modeled; assume fall-through.
                    self.connect(after_scrutinee, node);
                }
                for &arm in arms {
                    let after_arm = self.visit_element(arm, after_scrutinee);
                    self.connect(after_arm, node);
                }
                self.seal(node);
                Some(node)
            }

            ElementKind::Loop { body, label } => {
                let node = self.add_node(id);
                let head = self.aux_node();
                self.connect(pred, head);
                self.push_scope(Scope {
                    label: label.clone(),
                    head: Some(head),
                    exit: node,
                });
                let after_body = self.visit_element(*body, Some(head));
                self.pop_scope();
                self.connect(after_body, head);
                // No edge from head to the loop node: only a break escapes,
                // so without one everything after the loop stays unreached.
                self.seal(node);
                Some(node)
            }

            ElementKind::While { cond, body, label } => {
                let node = self.add_node(id);
                let head = self.aux_node();
                self.connect(pred, head);
                let after_cond = self.visit_element(*cond, Some(head));
                // The condition may fail on the first test: bounded loops
                // always reach their successor.
                self.connect(after_cond, node);
                self.push_scope(Scope {
                    label: label.clone(),
                    head: Some(head),
                    exit: node,
                });
                let after_body = self.visit_element(*body, after_cond);
                self.pop_scope();
                self.connect(after_body, head);
                self.seal(node);
                Some(node)
            }

            ElementKind::For { iter, body, label } => {
                let node = self.add_node(id);
                let after_iter = self.visit_element(*iter, pred);
                let head = self.aux_node();
                self.connect(after_iter, head);
                // Zero iterations are always possible.
                self.add_edge(head, node);
                self.push_scope(Scope {
                    label: label.clone(),
                    head: Some(head),
                    exit: node,
                });
                let after_body = self.visit_element(*body, Some(head));
                self.pop_scope();
                self.connect(after_body, head);
                self.seal(node);
                Some(node)
            }

            ElementKind::Return { value } => {
                let mut cur = pred;
                if let Some(value) = value {
                    cur = self.visit_element(*value, cur);
                }
                let node = self.add_node(id);
                self.connect(cur, node);
                let exit = self.exit_sink();
                self.add_edge(node, exit);
                self.seal(node);
                None
            }

            ElementKind::Break { label, value } => {
                let mut cur = pred;
                if let Some(value) = value {
                    cur = self.visit_element(*value, cur);
                }
                let node = self.add_node(id);
                self.connect(cur, node);
                self.seal(node);
                match self.resolve_break(label.as_ref()).map(|scope| scope.exit) {
                    Some(target) => {
                        self.add_edge(node, target);
                        None
                    }
                    // Unresolved label: degrade to fall-through rather than
                    // fabricate a diverge.
                    None => Some(node),
                }
            }

            ElementKind::Continue { label } => {
                let node = self.add_node(id);
                self.connect(pred, node);
                self.seal(node);
                match self.resolve_continue(label.as_ref()) {
                    Some(head) => {
                        self.add_edge(node, head);
                        None
                    }
                    None => Some(node),
                }
            }

            ElementKind::Unknown { children } => {
                let node = self.add_node(id);
                let mut cur = pred;
                for &child in children {
                    cur = self.visit_element(child, cur);
                }
                self.connect(cur, node);
                self.seal(node);
                Some(node)
            }
        }
    }

    fn leaf(&mut self, id: ElementId, pred: Option<NodeId>) -> Option<NodeId> {
        let node = self.add_node(id);
        self.connect(pred, node);
        self.seal(node);
        Some(node)
    }
}
