//! Lint findings and the oracle seam to the host environment.

use std::path::PathBuf;

use serde::Serialize;

use crate::tree::{ElementId, Function, Gating, Tree};

/// Module containing the unreachable-code lint.
pub mod unreachable;

/// A single issue found by a lint.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// ID of the lint that triggered the finding.
    pub lint: &'static str,
    /// Severity level.
    pub severity: &'static str,
    /// Description of the issue.
    pub message: String,
    /// Function the issue was found in.
    pub function: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number.
    pub line: u32,
    /// Column number.
    pub col: u32,
}

/// Host-side queries consulted before a finding is emitted. The analysis
/// core never evaluates gating conditions itself; it only asks.
pub trait LintOracle {
    /// True for materialized elements; synthetic ones are never reported.
    fn is_physical(&self, tree: &Tree, element: ElementId) -> bool;
    /// True when conditional compilation removes the element.
    fn is_gated_off(&self, tree: &Tree, element: ElementId) -> bool;
    /// True when the element's gating condition cannot be evaluated;
    /// ambiguous gating suppresses the finding rather than risk a false
    /// positive.
    fn has_unknown_gating(&self, tree: &Tree, element: ElementId) -> bool;
    /// True when the whole function is doc-test injected code and must be
    /// skipped.
    fn is_doctest(&self, function: &Function) -> bool;
}

/// Default oracle backed by the flags the parser recorded on the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOracle;

impl LintOracle for TreeOracle {
    fn is_physical(&self, tree: &Tree, element: ElementId) -> bool {
        tree.element(element).physical
    }

    fn is_gated_off(&self, tree: &Tree, element: ElementId) -> bool {
        tree.element(element).gating == Gating::Disabled
    }

    fn has_unknown_gating(&self, tree: &Tree, element: ElementId) -> bool {
        tree.element(element).gating == Gating::Unknown
    }

    fn is_doctest(&self, function: &Function) -> bool {
        function.doctest
    }
}
