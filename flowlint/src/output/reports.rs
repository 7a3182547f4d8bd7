use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;

use crate::analyzer::AnalysisResult;

/// Print the findings grouped by file, sorted by position.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    if result.findings.is_empty() && result.parse_errors.is_empty() {
        writeln!(
            writer,
            "{}",
            format!(
                "✓ No unreachable code in {} function(s) across {} file(s).",
                result.functions, result.files
            )
            .green()
        )?;
        return Ok(());
    }

    let mut grouped: BTreeMap<String, Vec<(u32, u32, String, String)>> = BTreeMap::new();
    for finding in &result.findings {
        grouped
            .entry(finding.file.display().to_string())
            .or_default()
            .push((
                finding.line,
                finding.col,
                finding.function.clone(),
                finding.message.clone(),
            ));
    }

    for (file, mut entries) in grouped {
        entries.sort();
        writeln!(writer, "{}", file.bold())?;
        for (line, col, function, message) in entries {
            writeln!(
                writer,
                "  {}:{} {} {} {}",
                line,
                col,
                "warning:".yellow().bold(),
                message,
                format!("(in `{function}`)").dimmed()
            )?;
        }
    }

    for error in &result.parse_errors {
        writeln!(
            writer,
            "{} {}: {}",
            "error:".red().bold(),
            error.file.display(),
            error.error
        )?;
    }

    writeln!(
        writer,
        "\n{} finding(s), {} file(s), {} function(s).",
        result.findings.len(),
        result.files,
        result.functions
    )?;
    Ok(())
}

/// Print the full result as JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json(writer: &mut impl Write, result: &AnalysisResult) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}
