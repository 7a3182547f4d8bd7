//! CFG (Control Flow Graph) module: per-function graph construction and
//! reachability analysis for unreachable-code detection.
//!
//! # Design Principles
//!
//! - **One CFG per body**: never cross function or closure boundaries
//! - **One node per element**: a node is the *completion point* of its tree
//!   element; merge points and loop heads are structural nodes
//! - **Bias toward silence**: constructs the builder does not model fall
//!   through, and a body the builder declines is skipped; false negatives
//!   are acceptable, false positives are not

mod builder;
mod collector;
mod graph;
mod types;

pub use collector::{collect_unreachable, UnreachableKind};
pub use types::{Cfg, CfgNode, NodeId};
