//! Command dispatch: configuration merge, worker pool, report rendering.

use std::io::Write;

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use crate::analyzer::Analyzer;
use crate::cancel::CancelToken;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::output;

/// Exit code used when the run is interrupted.
pub const EXIT_CANCELLED: i32 = 130;

/// Runs a full analysis per the CLI arguments and returns the process exit
/// code.
pub fn run(cli: &Cli) -> Result<i32> {
    let mut config = Config::load_from_path(cli.paths.first().map_or_else(
        || std::path::Path::new("."),
        std::path::PathBuf::as_path,
    ));
    apply_cli_overrides(&mut config, cli);

    let cancel = CancelToken::new();
    {
        let handler_token = cancel.clone();
        // Second Ctrl-C falls back to the default handler via the flag check
        // in the walkers; install errors only matter in exotic environments.
        let _ = ctrlc::set_handler(move || handler_token.cancel());
    }

    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    let analyzer = Analyzer::new(config.clone(), cancel.clone());
    let files = analyzer.collect_files(&cli.paths);
    let progress = if cli.no_progress || cli.format == OutputFormat::Json {
        ProgressBar::hidden()
    } else {
        output::create_progress_bar(files.len() as u64)
    };
    let analyzer = analyzer.with_progress(progress.clone());

    let Some(result) = analyzer.analyze_paths(&cli.paths) else {
        progress.finish_and_clear();
        eprintln!("analysis cancelled");
        return Ok(EXIT_CANCELLED);
    };
    progress.finish_and_clear();

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    match cli.format {
        OutputFormat::Text => {
            output::print_report(&mut writer, &result).context("failed to print report")?;
            if cli.summary {
                output::print_summary_table(&mut writer, &result)
                    .context("failed to print summary")?;
            }
        }
        OutputFormat::Json => {
            output::print_json(&mut writer, &result).context("failed to print JSON report")?;
        }
    }
    writer.flush().ok();

    if config.fail_on_findings && !result.findings.is_empty() {
        return Ok(1);
    }
    Ok(0)
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if !cli.exclude_folders.is_empty() {
        config
            .exclude_folders
            .extend(cli.exclude_folders.iter().cloned());
    }
    if let Some(jobs) = cli.jobs {
        config.threads = jobs;
    }
    if cli.fail_on_findings {
        config.fail_on_findings = true;
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_flags_override_file_values() {
        let cli = Cli::parse_from([
            "flowlint",
            "--fail-on-findings",
            "-j",
            "4",
            "--exclude-folders",
            "vendor",
        ]);
        let mut config = Config {
            exclude_folders: vec!["target".to_owned()],
            ..Config::default()
        };
        apply_cli_overrides(&mut config, &cli);
        assert!(config.fail_on_findings);
        assert_eq!(config.threads, 4);
        assert_eq!(
            config.exclude_folders,
            vec!["target".to_owned(), "vendor".to_owned()]
        );
    }

    #[test]
    fn flags_left_unset_keep_file_values() {
        let cli = Cli::parse_from(["flowlint"]);
        let mut config = Config {
            threads: 2,
            fail_on_findings: true,
            ..Config::default()
        };
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.threads, 2);
        assert!(config.fail_on_findings);
    }
}
