//! Maps node-level unreachability back to reportable tree elements.
//!
//! Reporting must not cascade: once a statement is reported, nothing inside
//! it is. Elements that execution reaches but does not finish (an `if` whose
//! branches both return, a statement wrapping a `return`) are not reported
//! on the element itself; only the genuinely unreached inner parts are.

use rustc_hash::FxHashSet;

use crate::tree::{ElementId, ElementKind, Tree};

use super::types::Cfg;

/// How an unreachable element is classified for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableKind {
    /// Statement-level construct.
    Statement,
    /// Expression in tail position.
    Expression,
}

/// Collects the elements to report for one body, ordered statements first
/// (parents before children), then tail expressions.
///
/// `body` is the root the CFG was built from; ancestor queries never walk
/// past it, so closure internals stay independent of the enclosing function.
#[must_use]
pub fn collect_unreachable(
    tree: &Tree,
    cfg: &Cfg,
    body: ElementId,
) -> Vec<(ElementId, UnreachableKind)> {
    // Parent elements complete after their children during construction, so
    // the reversed order visits parents first and lets them shadow children.
    let mut unreachable = cfg.collect_unreachable_elements();
    unreachable.reverse();

    let unreachable_exprs: FxHashSet<ElementId> = unreachable
        .iter()
        .copied()
        .filter(|&id| tree.is_expression(id))
        .collect();
    let unreachable_stmts: FxHashSet<ElementId> = unreachable
        .iter()
        .copied()
        .filter(|&id| tree.is_statement(id))
        .collect();

    let probe = Probe {
        tree,
        unreachable_exprs: &unreachable_exprs,
        unreachable_stmts: &unreachable_stmts,
    };

    // First pass: the statement-report set, fixed before expressions are
    // considered.
    let mut reported: FxHashSet<ElementId> = FxHashSet::default();
    let mut out = Vec::new();

    for &stmt in unreachable.iter().filter(|&&id| tree.is_statement(id)) {
        if tree
            .ancestor_statement(stmt, body)
            .is_some_and(|parent| reported.contains(&parent))
        {
            continue;
        }
        if let Some(parent_expr) = tree.ancestor_expression(stmt, body) {
            if tree.is_in_tail_position(parent_expr) && probe.entirely_unreachable(parent_expr) {
                // The whole enclosing expression is reported instead.
                continue;
            }
        }

        let expr = match tree.kind(stmt) {
            ElementKind::ExprStmt { expr } => *expr,
            ElementKind::Let { init: Some(init) } => *init,
            _ => continue,
        };
        if probe.entirely_unreachable(expr) {
            out.push((stmt, UnreachableKind::Statement));
            reported.insert(stmt);
        }
    }

    // Second pass: tail expressions, filtered against the fixed statement
    // set so nothing inside an already-reported statement resurfaces.
    for &expr in unreachable.iter().filter(|&&id| tree.is_expression(id)) {
        if !tree.is_in_tail_position(expr) || !probe.entirely_unreachable(expr) {
            continue;
        }
        if tree
            .statement_ancestors(expr, body)
            .any(|ancestor| reported.contains(&ancestor))
        {
            continue;
        }
        out.push((expr, UnreachableKind::Expression));
    }

    out
}

struct Probe<'a> {
    tree: &'a Tree,
    unreachable_exprs: &'a FxHashSet<ElementId>,
    unreachable_stmts: &'a FxHashSet<ElementId>,
}

impl Probe<'_> {
    /// True when execution never even begins `expr`.
    ///
    /// A flagged block-bearing construct is only entirely unreachable when
    /// its first contained element is itself an unreachable statement; a
    /// flagged construct whose interior starts out reachable was entered and
    /// diverged partway, which is not reportable on the construct. An empty
    /// block counts as fully covered.
    fn entirely_unreachable(&self, expr: ElementId) -> bool {
        if !self.unreachable_exprs.contains(&expr) {
            return false;
        }
        if !self.tree.is_block_bearing(expr) {
            return true;
        }
        match self.tree.first_block_element(expr) {
            Some(first) => self.unreachable_stmts.contains(&first),
            None => true,
        }
    }
}
