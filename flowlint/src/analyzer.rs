//! File collection and per-file analysis driver.
//!
//! Files are independent and analyzed in parallel; each function (and each
//! closure body) gets its own graph and element sets, so nothing is shared
//! mutably across functions. Input problems are recorded per file and never
//! abort the run.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::lints::{unreachable, Finding, LintOracle, TreeOracle};
use crate::tree::Module;

/// A file that could not be read or parsed.
#[derive(Debug, Clone, Serialize)]
pub struct ParseError {
    /// Offending file.
    pub file: PathBuf,
    /// Human-readable reason.
    pub error: String,
}

/// Merged result of one run.
#[derive(Debug, Default, Serialize)]
pub struct AnalysisResult {
    /// Findings across all files, in file order.
    pub findings: Vec<Finding>,
    /// Files that could not be analyzed.
    pub parse_errors: Vec<ParseError>,
    /// Number of module files analyzed.
    pub files: usize,
    /// Number of functions analyzed.
    pub functions: usize,
}

/// Analysis driver: configuration plus the shared cancellation token.
pub struct Analyzer {
    config: Config,
    cancel: CancelToken,
    oracle: TreeOracle,
    progress: Option<ProgressBar>,
}

impl Analyzer {
    /// Creates a driver for the given configuration.
    #[must_use]
    pub fn new(config: Config, cancel: CancelToken) -> Self {
        Self {
            config,
            cancel,
            oracle: TreeOracle,
            progress: None,
        }
    }

    /// Attaches a progress bar ticked once per file.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The token this driver observes.
    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Collects module files under `paths`, honoring ignore files and the
    /// configured folder exclusions.
    #[must_use]
    pub fn collect_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                files.push(path.clone());
                continue;
            }
            let excluded = self.config.exclude_folders.clone();
            let walker = WalkBuilder::new(path)
                .filter_entry(move |entry| {
                    let name = entry.file_name().to_string_lossy();
                    !(entry.file_type().is_some_and(|t| t.is_dir())
                        && excluded.iter().any(|folder| folder == name.as_ref()))
                })
                .build();
            for entry in walker.flatten() {
                let entry_path = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file())
                    && entry_path.extension().is_some_and(|ext| ext == "json")
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        }
        files.sort();
        files.dedup();
        files
    }

    /// Analyzes every collected file. Returns `None` when cancelled; partial
    /// results are discarded.
    #[must_use]
    pub fn analyze_paths(&self, paths: &[PathBuf]) -> Option<AnalysisResult> {
        let files = self.collect_files(paths);
        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| self.analyze_file(file))
            .collect();

        if self.cancel.is_cancelled() {
            return None;
        }

        let mut result = AnalysisResult {
            files: files.len(),
            ..AnalysisResult::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Analyzed { findings, functions } => {
                    result.findings.extend(findings);
                    result.functions += functions;
                }
                FileOutcome::Failed(error) => result.parse_errors.push(error),
                FileOutcome::Cancelled => return None,
            }
        }
        Some(result)
    }

    /// Analyzes a single module file.
    #[must_use]
    pub fn analyze_file(&self, file: &Path) -> FileOutcome {
        if let Some(ref progress) = self.progress {
            progress.inc(1);
        }
        if self.cancel.is_cancelled() {
            return FileOutcome::Cancelled;
        }

        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                return FileOutcome::Failed(ParseError {
                    file: file.to_path_buf(),
                    error: format!("Failed to read file: {err}"),
                });
            }
        };
        let module = match Module::from_json(&source) {
            Ok(module) => module,
            Err(err) => {
                return FileOutcome::Failed(ParseError {
                    file: file.to_path_buf(),
                    error: format!("Failed to parse module: {err}"),
                });
            }
        };
        match self.analyze_module(&module, file) {
            Some(findings) => FileOutcome::Analyzed {
                findings,
                functions: module.functions.len(),
            },
            None => FileOutcome::Cancelled,
        }
    }

    /// Analyzes an already-lowered module. Returns `None` when cancelled.
    #[must_use]
    pub fn analyze_module(&self, module: &Module, file: &Path) -> Option<Vec<Finding>> {
        if !self.config.unreachable_code {
            return Some(Vec::new());
        }
        unreachable::check_module(module, file, self.oracle(), &self.cancel)
    }

    fn oracle(&self) -> &dyn LintOracle {
        &self.oracle
    }
}

/// Outcome of analyzing one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Analysis completed.
    Analyzed {
        /// Findings for the file.
        findings: Vec<Finding>,
        /// Functions analyzed in the file.
        functions: usize,
    },
    /// The file could not be read or parsed.
    Failed(ParseError),
    /// Cancellation fired while this file was in flight.
    Cancelled,
}
