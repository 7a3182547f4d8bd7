//! Serialized tree format produced by the external parser.
//!
//! A module file is a JSON document of nested [`ElementDef`] values, one per
//! syntax element, which [`ModuleDef::lower`] flattens into the arena form.
//! The nesting mirrors the syntax tree; lowering allocates children before
//! parents so the arena's parent links come out for free.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::{
    ElementId, ElementKind, Function, Gating, Module, Span, TreeBuilder,
};

fn default_true() -> bool {
    true
}

/// A serialized module: the unit one input file describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDef {
    /// Functions in source order.
    pub functions: Vec<FunctionDef>,
}

/// A serialized function body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name.
    pub name: CompactString,
    /// Source line of the function.
    #[serde(default)]
    pub line: u32,
    /// True for doc-test injections; such functions are skipped.
    #[serde(default)]
    pub doctest: bool,
    /// Body block.
    pub body: ElementDef,
}

/// A serialized element: common flags plus the construct-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDef {
    /// Source line (1-indexed, 0 when unknown).
    #[serde(default)]
    pub line: u32,
    /// Source column.
    #[serde(default)]
    pub col: u32,
    /// False for synthetic elements.
    #[serde(default = "default_true")]
    pub physical: bool,
    /// Conditional-compilation state.
    #[serde(default)]
    pub gating: Gating,
    /// Construct payload.
    #[serde(flatten)]
    pub kind: ElementKindDef,
}

/// Construct-specific payload of a serialized element, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKindDef {
    /// Atomic value.
    Value,
    /// Call expression.
    Call {
        /// Arguments in evaluation order.
        #[serde(default)]
        args: Vec<ElementDef>,
        /// True when the callee never returns.
        #[serde(default)]
        diverges: bool,
    },
    /// Closure value.
    Closure {
        /// Closure body block.
        body: Box<ElementDef>,
    },
    /// Block with optional tail expression.
    Block {
        /// Statements in lexical order.
        #[serde(default)]
        stmts: Vec<ElementDef>,
        /// Tail expression.
        #[serde(default)]
        tail: Option<Box<ElementDef>>,
        /// Optional label.
        #[serde(default)]
        label: Option<CompactString>,
    },
    /// `if`/`if-else`.
    If {
        /// Condition.
        cond: Box<ElementDef>,
        /// Then branch block.
        then: Box<ElementDef>,
        /// Else branch (block or nested if).
        #[serde(default, rename = "else")]
        els: Option<Box<ElementDef>>,
    },
    /// `match`.
    Match {
        /// Scrutinee.
        scrutinee: Box<ElementDef>,
        /// Arm bodies.
        #[serde(default)]
        arms: Vec<ElementDef>,
    },
    /// Unbounded `loop`.
    Loop {
        /// Body block.
        body: Box<ElementDef>,
        /// Optional label.
        #[serde(default)]
        label: Option<CompactString>,
    },
    /// `while` loop.
    While {
        /// Condition.
        cond: Box<ElementDef>,
        /// Body block.
        body: Box<ElementDef>,
        /// Optional label.
        #[serde(default)]
        label: Option<CompactString>,
    },
    /// `for` loop.
    For {
        /// Iterator expression.
        iter: Box<ElementDef>,
        /// Body block.
        body: Box<ElementDef>,
        /// Optional label.
        #[serde(default)]
        label: Option<CompactString>,
    },
    /// `return`.
    Return {
        /// Returned value.
        #[serde(default)]
        value: Option<Box<ElementDef>>,
    },
    /// `break`.
    Break {
        /// Target label.
        #[serde(default)]
        label: Option<CompactString>,
        /// Break value.
        #[serde(default)]
        value: Option<Box<ElementDef>>,
    },
    /// `continue`.
    Continue {
        /// Target label.
        #[serde(default)]
        label: Option<CompactString>,
    },
    /// Expression statement.
    ExprStmt {
        /// Inner expression.
        expr: Box<ElementDef>,
    },
    /// `let` binding.
    Let {
        /// Initializer.
        #[serde(default)]
        init: Option<Box<ElementDef>>,
    },
    /// Unrecognized construct; children chain sequentially.
    Unknown {
        /// Children in evaluation order.
        #[serde(default)]
        children: Vec<ElementDef>,
    },
}

impl ElementDef {
    fn lower(&self, builder: &mut TreeBuilder) -> ElementId {
        let kind = match &self.kind {
            ElementKindDef::Value => ElementKind::Value,
            ElementKindDef::Call { args, diverges } => ElementKind::Call {
                args: args.iter().map(|a| a.lower(builder)).collect(),
                diverges: *diverges,
            },
            ElementKindDef::Closure { body } => ElementKind::Closure {
                body: body.lower(builder),
            },
            ElementKindDef::Block { stmts, tail, label } => ElementKind::Block {
                stmts: stmts.iter().map(|s| s.lower(builder)).collect(),
                tail: tail.as_ref().map(|t| t.lower(builder)),
                label: label.clone(),
            },
            ElementKindDef::If { cond, then, els } => ElementKind::If {
                cond: cond.lower(builder),
                then_branch: then.lower(builder),
                else_branch: els.as_ref().map(|e| e.lower(builder)),
            },
            ElementKindDef::Match { scrutinee, arms } => ElementKind::Match {
                scrutinee: scrutinee.lower(builder),
                arms: arms.iter().map(|a| a.lower(builder)).collect(),
            },
            ElementKindDef::Loop { body, label } => ElementKind::Loop {
                body: body.lower(builder),
                label: label.clone(),
            },
            ElementKindDef::While { cond, body, label } => ElementKind::While {
                cond: cond.lower(builder),
                body: body.lower(builder),
                label: label.clone(),
            },
            ElementKindDef::For { iter, body, label } => ElementKind::For {
                iter: iter.lower(builder),
                body: body.lower(builder),
                label: label.clone(),
            },
            ElementKindDef::Return { value } => ElementKind::Return {
                value: value.as_ref().map(|v| v.lower(builder)),
            },
            ElementKindDef::Break { label, value } => ElementKind::Break {
                label: label.clone(),
                value: value.as_ref().map(|v| v.lower(builder)),
            },
            ElementKindDef::Continue { label } => ElementKind::Continue {
                label: label.clone(),
            },
            ElementKindDef::ExprStmt { expr } => ElementKind::ExprStmt {
                expr: expr.lower(builder),
            },
            ElementKindDef::Let { init } => ElementKind::Let {
                init: init.as_ref().map(|i| i.lower(builder)),
            },
            ElementKindDef::Unknown { children } => ElementKind::Unknown {
                children: children.iter().map(|c| c.lower(builder)).collect(),
            },
        };
        builder.push_with_flags(
            kind,
            Span {
                line: self.line,
                col: self.col,
            },
            self.physical,
            self.gating,
        )
    }
}

impl ModuleDef {
    /// Lowers the serialized module into the arena representation.
    #[must_use]
    pub fn lower(&self) -> Module {
        let mut builder = TreeBuilder::new();
        let functions = self
            .functions
            .iter()
            .map(|f| {
                let body = f.body.lower(&mut builder);
                Function {
                    name: f.name.clone(),
                    body,
                    span: Span {
                        line: f.line,
                        col: 0,
                    },
                    doctest: f.doctest,
                }
            })
            .collect();
        Module {
            tree: builder.finish(),
            functions,
        }
    }
}

impl Module {
    /// Parses and lowers a serialized module document.
    pub fn from_json(source: &str) -> anyhow::Result<Self> {
        let def: ModuleDef = serde_json::from_str(source)?;
        Ok(def.lower())
    }
}
