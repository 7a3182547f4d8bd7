//! Report rendering: colored text, JSON, summary table, progress.

mod progress;
mod reports;
mod tables;

pub use progress::create_progress_bar;
pub use reports::{print_json, print_report};
pub use tables::print_summary_table;
