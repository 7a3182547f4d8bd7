use std::collections::BTreeMap;
use std::io::Write;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use crate::analyzer::AnalysisResult;

/// Print a per-file summary table of finding counts.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_summary_table(
    writer: &mut impl Write,
    result: &AnalysisResult,
) -> std::io::Result<()> {
    if result.findings.is_empty() {
        return Ok(());
    }

    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for finding in &result.findings {
        let entry = counts.entry(finding.file.display().to_string()).or_default();
        if finding.message.contains("statement") {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["File", "Statements", "Expressions", "Total"]);
    for (file, (stmts, exprs)) in counts {
        table.add_row(vec![
            Cell::new(file),
            Cell::new(stmts),
            Cell::new(exprs),
            Cell::new(stmts + exprs),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}
