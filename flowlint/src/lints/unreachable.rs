//! The unreachable-code lint: CFG construction, reachability, collection,
//! oracle filtering.

use std::path::Path;

use crate::cancel::CancelToken;
use crate::cfg::{collect_unreachable, Cfg, UnreachableKind};
use crate::tree::{ElementId, ElementKind, Function, Module, Tree};

use super::{Finding, LintOracle};

/// Lint identifier used in reports.
pub const LINT_ID: &str = "unreachable-code";

/// Checks every function of a module, closure bodies included.
///
/// Returns `None` when cancelled; partial results are discarded, never
/// reported.
#[must_use]
pub fn check_module(
    module: &Module,
    file: &Path,
    oracle: &dyn LintOracle,
    cancel: &CancelToken,
) -> Option<Vec<Finding>> {
    let mut findings = Vec::new();
    for function in &module.functions {
        if cancel.is_cancelled() {
            return None;
        }
        findings.extend(check_function(&module.tree, function, file, oracle, cancel)?);
    }
    Some(findings)
}

/// Checks one function: its own body first, then each closure body under it
/// as an independent graph. Control leaving a closure never implies anything
/// about the enclosing function, and vice versa.
#[must_use]
pub fn check_function(
    tree: &Tree,
    function: &Function,
    file: &Path,
    oracle: &dyn LintOracle,
    cancel: &CancelToken,
) -> Option<Vec<Finding>> {
    if oracle.is_doctest(function) {
        return Some(Vec::new());
    }

    let mut findings = Vec::new();
    check_body(tree, function, function.body, file, oracle, cancel, &mut findings)?;

    for closure in tree.closures_under(function.body) {
        if let ElementKind::Closure { body } = tree.kind(closure) {
            check_body(tree, function, *body, file, oracle, cancel, &mut findings)?;
        }
    }
    Some(findings)
}

#[allow(clippy::too_many_arguments)]
fn check_body(
    tree: &Tree,
    function: &Function,
    body: ElementId,
    file: &Path,
    oracle: &dyn LintOracle,
    cancel: &CancelToken,
    findings: &mut Vec<Finding>,
) -> Option<()> {
    // A body the builder declines is skipped quietly: fewer warnings, never
    // wrong ones.
    let Some(cfg) = Cfg::from_body(tree, body, cancel) else {
        return if cancel.is_cancelled() { None } else { Some(()) };
    };

    for (element, kind) in collect_unreachable(tree, &cfg, body) {
        if !oracle.is_physical(tree, element) {
            continue;
        }
        if oracle.is_gated_off(tree, element) || oracle.has_unknown_gating(tree, element) {
            continue;
        }
        let span = tree.span(element);
        findings.push(Finding {
            lint: LINT_ID,
            severity: "warning",
            message: message_for(kind).to_owned(),
            function: function.name.to_string(),
            file: file.to_path_buf(),
            line: span.line,
            col: span.col,
        });
    }
    Some(())
}

fn message_for(kind: UnreachableKind) -> &'static str {
    match kind {
        UnreachableKind::Statement => "Unreachable statement",
        UnreachableKind::Expression => "Unreachable expression",
    }
}
