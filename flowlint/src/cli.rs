//! Command line interface configuration using `clap`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.flowlint.toml):
  Create this file in your project root to set defaults.

  [flowlint]
  unreachable-code = true    # Master switch for the lint
  fail-on-findings = false   # Exit 1 when findings exist (CI)
  threads = 0                # Worker threads, 0 = auto
  exclude-folders = [\"target\", \"build\"]
";

/// Output rendering for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, grouped, human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Command line interface for the control-flow linter.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "flowlint - control-flow analysis for unreachable code",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Paths to analyze (module files or directories).
    /// When no paths are provided, defaults to the current directory.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show a per-file summary table after the report.
    #[arg(long)]
    pub summary: bool,

    /// Worker threads for file-level parallelism (0 = auto).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Folders to exclude from analysis.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Exit with code 1 if any finding is produced.
    /// For CI/CD integration.
    #[arg(long)]
    pub fail_on_findings: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}
