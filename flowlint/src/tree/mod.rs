//! Arena-backed syntax tree model consumed by the CFG builder.
//!
//! The tree is produced by an external parser and handed over in serialized
//! form (see [`source`]); this module defines the in-memory representation:
//! a flat arena of elements with parent links recorded once at construction,
//! so ancestor queries are index lookups rather than tree walks.
//!
//! The element kinds form a closed set: one variant per control construct the
//! builder understands, plus [`ElementKind::Unknown`] for everything else
//! (treated as straight-line code, never diverging).

mod build;
/// Serialized tree definitions and lowering into the arena.
pub mod source;

pub use build::TreeBuilder;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Loop/block label, e.g. `'outer`.
pub type Label = CompactString;

/// Index of an element in a [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source position of an element (1-indexed line, 0 when unknown).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Line number.
    pub line: u32,
    /// Column number.
    pub col: u32,
}

/// Conditional-compilation state of an element, as reported by the external
/// gating oracle and recorded on the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gating {
    /// Compiled in.
    #[default]
    Enabled,
    /// Compiled out.
    Disabled,
    /// The gating condition could not be evaluated.
    Unknown,
}

/// Construct kind of a tree element. Child references point into the same
/// arena and are populated before the parent is allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Atomic value: literal, path, or any expression without control flow.
    Value,
    /// Call expression; `diverges` marks callees known to never return
    /// (panics and friends).
    Call {
        /// Argument expressions, evaluated left to right.
        args: Vec<ElementId>,
        /// True when the callee is known-diverging.
        diverges: bool,
    },
    /// Closure (or other nested function-like body) appearing as a value.
    /// Its body is analyzed as an independent CFG, never as part of the
    /// enclosing function's graph.
    Closure {
        /// The closure body block.
        body: ElementId,
    },
    /// Block of statements with an optional tail expression.
    Block {
        /// Statements in lexical order.
        stmts: Vec<ElementId>,
        /// Implicit final-value expression, if any.
        tail: Option<ElementId>,
        /// Label, when the block can be targeted by a labeled `break`.
        label: Option<Label>,
    },
    /// `if`/`if-else`; `else_branch` is a block or a nested `If` (else-if).
    If {
        /// Condition expression.
        cond: ElementId,
        /// Then branch block.
        then_branch: ElementId,
        /// Optional else branch.
        else_branch: Option<ElementId>,
    },
    /// `match`, assumed exhaustive at the tree level.
    Match {
        /// Scrutinee expression.
        scrutinee: ElementId,
        /// One body (block or bare expression) per arm.
        arms: Vec<ElementId>,
    },
    /// Unbounded `loop`; escapes only through `break`.
    Loop {
        /// Body block.
        body: ElementId,
        /// Optional label.
        label: Option<Label>,
    },
    /// `while` loop; may execute zero times.
    While {
        /// Condition expression.
        cond: ElementId,
        /// Body block.
        body: ElementId,
        /// Optional label.
        label: Option<Label>,
    },
    /// `for` loop; may execute zero times.
    For {
        /// Iterator expression.
        iter: ElementId,
        /// Body block.
        body: ElementId,
        /// Optional label.
        label: Option<Label>,
    },
    /// `return` with optional value.
    Return {
        /// Returned expression, if any.
        value: Option<ElementId>,
    },
    /// `break`, optionally labeled and carrying a value.
    Break {
        /// Target label; `None` means the innermost loop.
        label: Option<Label>,
        /// Break value, if any.
        value: Option<ElementId>,
    },
    /// `continue`, optionally labeled.
    Continue {
        /// Target label; `None` means the innermost loop.
        label: Option<Label>,
    },
    /// Expression statement (`expr;`).
    ExprStmt {
        /// Inner expression.
        expr: ElementId,
    },
    /// `let` binding with optional initializer.
    Let {
        /// Initializer expression, if any.
        init: Option<ElementId>,
    },
    /// Construct the builder does not model; children chain sequentially and
    /// control always falls through.
    Unknown {
        /// Child elements in evaluation order.
        children: Vec<ElementId>,
    },
}

impl ElementKind {
    /// Direct children in evaluation order.
    pub(crate) fn children(&self) -> SmallVec<[ElementId; 4]> {
        let mut out = SmallVec::new();
        match self {
            ElementKind::Value => {}
            ElementKind::Call { args, .. } => out.extend_from_slice(args),
            ElementKind::Closure { body } => out.push(*body),
            ElementKind::Block { stmts, tail, .. } => {
                out.extend_from_slice(stmts);
                out.extend(*tail);
            }
            ElementKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                out.push(*cond);
                out.push(*then_branch);
                out.extend(*else_branch);
            }
            ElementKind::Match { scrutinee, arms } => {
                out.push(*scrutinee);
                out.extend_from_slice(arms);
            }
            ElementKind::Loop { body, .. } => out.push(*body),
            ElementKind::While { cond, body, .. } => {
                out.push(*cond);
                out.push(*body);
            }
            ElementKind::For { iter, body, .. } => {
                out.push(*iter);
                out.push(*body);
            }
            ElementKind::Return { value } => out.extend(*value),
            ElementKind::Break { value, .. } => out.extend(*value),
            ElementKind::Continue { .. } => {}
            ElementKind::ExprStmt { expr } => out.push(*expr),
            ElementKind::Let { init } => out.extend(*init),
            ElementKind::Unknown { children } => out.extend_from_slice(children),
        }
        out
    }
}

/// One element of the arena.
#[derive(Debug, Clone)]
pub struct Element {
    /// Construct kind with child references.
    pub kind: ElementKind,
    /// Source position.
    pub span: Span,
    /// False for synthetic (non-materialized) elements.
    pub physical: bool,
    /// Conditional-compilation state.
    pub gating: Gating,
}

/// A function body handed over for analysis.
#[derive(Debug, Clone)]
pub struct Function {
    /// Function name, for reports.
    pub name: CompactString,
    /// Root body block.
    pub body: ElementId,
    /// Source position of the function itself.
    pub span: Span,
    /// True when the function lives in a doc-test injection; such functions
    /// are skipped entirely.
    pub doctest: bool,
}

/// Immutable arena of elements for one module.
#[derive(Debug, Default)]
pub struct Tree {
    elements: Vec<Element>,
    parents: Vec<Option<ElementId>>,
}

/// A lowered module: the arena plus its functions.
#[derive(Debug, Default)]
pub struct Module {
    /// Element arena shared by all functions of the module.
    pub tree: Tree,
    /// Functions in source order.
    pub functions: Vec<Function>,
}

impl Tree {
    /// The element behind `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// The construct kind of `id`.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> &ElementKind {
        &self.elements[id.index()].kind
    }

    /// Source position of `id`.
    #[must_use]
    pub fn span(&self, id: ElementId) -> Span {
        self.elements[id.index()].span
    }

    /// Parent of `id`, `None` for function body roots.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parents[id.index()]
    }

    /// Number of elements in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// True for statement-level constructs.
    #[must_use]
    pub fn is_statement(&self, id: ElementId) -> bool {
        matches!(
            self.kind(id),
            ElementKind::ExprStmt { .. } | ElementKind::Let { .. }
        )
    }

    /// True for expression-level constructs. Structural blocks (the body,
    /// branch or arm of a control construct, and function body roots) are
    /// neither statements nor expressions.
    #[must_use]
    pub fn is_expression(&self, id: ElementId) -> bool {
        if self.is_statement(id) {
            return false;
        }
        if matches!(self.kind(id), ElementKind::Block { .. }) && self.is_structural_block(id) {
            return false;
        }
        true
    }

    /// A block is structural when a control construct owns it as a body,
    /// branch or arm, or when it is a function body root.
    fn is_structural_block(&self, id: ElementId) -> bool {
        let Some(parent) = self.parent(id) else {
            return true;
        };
        match self.kind(parent) {
            ElementKind::If {
                then_branch,
                else_branch,
                ..
            } => *then_branch == id || *else_branch == Some(id),
            ElementKind::Match { arms, .. } => arms.contains(&id),
            ElementKind::Loop { body, .. }
            | ElementKind::While { body, .. }
            | ElementKind::For { body, .. }
            | ElementKind::Closure { body } => *body == id,
            _ => false,
        }
    }

    /// Nearest strict ancestor of `id` that is a statement, not walking past
    /// `root` (the body being analyzed; closure internals never see the
    /// enclosing function).
    #[must_use]
    pub fn ancestor_statement(&self, id: ElementId, root: ElementId) -> Option<ElementId> {
        self.ancestors_within(id, root).find(|&a| self.is_statement(a))
    }

    /// Nearest strict ancestor of `id` that is an expression, with the same
    /// `root` bound as [`Tree::ancestor_statement`].
    #[must_use]
    pub fn ancestor_expression(&self, id: ElementId, root: ElementId) -> Option<ElementId> {
        self.ancestors_within(id, root).find(|&a| self.is_expression(a))
    }

    /// All statement ancestors of `id` up to `root`, nearest first.
    pub(crate) fn statement_ancestors<'a>(
        &'a self,
        id: ElementId,
        root: ElementId,
    ) -> impl Iterator<Item = ElementId> + 'a {
        self.ancestors_within(id, root)
            .filter(move |&a| self.is_statement(a))
    }

    fn ancestors_within<'a>(
        &'a self,
        id: ElementId,
        root: ElementId,
    ) -> impl Iterator<Item = ElementId> + 'a {
        let mut cur = if id == root { None } else { self.parent(id) };
        std::iter::from_fn(move || {
            let next = cur?;
            cur = if next == root { None } else { self.parent(next) };
            Some(next)
        })
    }

    /// True when `id` is the implicit final value of its enclosing block or
    /// the body of a match arm.
    #[must_use]
    pub fn is_in_tail_position(&self, id: ElementId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        match self.kind(parent) {
            ElementKind::Block { tail, .. } => *tail == Some(id),
            ElementKind::Match { arms, .. } => arms.contains(&id),
            _ => false,
        }
    }

    /// First contained statement-or-tail of a block-bearing construct, used
    /// by the collector to tell "never entered" apart from "entered but
    /// diverged partway". Returns `None` both for empty blocks and for
    /// constructs that bear no block.
    #[must_use]
    pub fn first_block_element(&self, id: ElementId) -> Option<ElementId> {
        let block = match self.kind(id) {
            ElementKind::Block { .. } => id,
            ElementKind::If { then_branch, .. } => *then_branch,
            ElementKind::Loop { body, .. }
            | ElementKind::While { body, .. }
            | ElementKind::For { body, .. } => *body,
            _ => return None,
        };
        match self.kind(block) {
            ElementKind::Block { stmts, tail, .. } => stmts.first().copied().or(*tail),
            _ => None,
        }
    }

    /// True for constructs whose unreachability is judged by their first
    /// contained element: blocks, `if`, and the loop family.
    #[must_use]
    pub fn is_block_bearing(&self, id: ElementId) -> bool {
        matches!(
            self.kind(id),
            ElementKind::Block { .. }
                | ElementKind::If { .. }
                | ElementKind::Loop { .. }
                | ElementKind::While { .. }
                | ElementKind::For { .. }
        )
    }

    /// All closure elements inside `root` (any depth), in lexical order.
    /// Each one's body gets its own independent CFG.
    #[must_use]
    pub fn closures_under(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if matches!(self.kind(id), ElementKind::Closure { .. }) && id != root {
                out.push(id);
            }
            let children = self.kind(id).children();
            for child in children.iter().rev() {
                stack.push(*child);
            }
        }
        out.sort_unstable();
        out
    }
}
