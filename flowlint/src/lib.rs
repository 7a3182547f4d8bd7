//! Control-flow analysis for unreachable-code detection.
//!
//! `flowlint` consumes serialized syntax trees handed over by an external
//! parser, builds a control-flow graph per function (and per closure body),
//! computes the set of nodes reachable from entry, and reports the
//! statements and tail expressions that can never execute.
//!
//! The analysis is purely control-transfer based: no value tracking, no
//! constant propagation. Unconditional jumps (`return`, `break`,
//! `continue`), calls known to diverge, and `loop`s without an escaping
//! `break` are the only sources of unreachability. Every recovery path
//! biases toward reporting fewer warnings, never wrong ones.

/// Per-file analysis driver and result types.
pub mod analyzer;
/// Cooperative cancellation.
pub mod cancel;
/// Control-flow graph construction, reachability, and collection.
pub mod cfg;
/// Command line interface definition.
pub mod cli;
/// Command dispatch for the binary.
pub mod commands;
/// Configuration file handling.
pub mod config;
/// Lint findings and oracles.
pub mod lints;
/// Report rendering.
pub mod output;
/// Syntax tree model and serialized input format.
pub mod tree;
