// relink/src/ui/summary.rs
//! Human-readable and JSON renderings of a [`RunReport`].

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::Write;

use crate::report::RunReport;

pub fn print_summary<W: Write>(report: &RunReport, writer: &mut W, supports_color: bool) -> Result<()> {
    let heading = "--- Rewrite Summary ---";
    if supports_color {
        writeln!(writer, "{}", heading.bold())?;
    } else {
        writeln!(writer, "{}", heading)?;
    }
    writeln!(writer, "Target: {}", report.target)?;
    writeln!(
        writer,
        "Scanned {} file(s), skipped {}, {} changed.",
        report.files_scanned,
        report.files_skipped,
        report.changed_files.len()
    )?;
    if report.files_failed > 0 {
        writeln!(writer, "Failed to process {} file(s); see the errors above.", report.files_failed)?;
    }

    if report.summary.is_empty() {
        writeln!(writer, "No links needed rewriting.")?;
        return Ok(());
    }

    let mut rules = Table::new();
    rules
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Occurrences"]);
    for item in &report.summary {
        rules.add_row(vec![Cell::new(&item.rule_name), Cell::new(item.occurrences)]);
    }
    writeln!(writer, "{}", rules)?;

    let mut files = Table::new();
    files
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Rewrites", "Written"]);
    for change in &report.changed_files {
        files.add_row(vec![
            Cell::new(change.path.display()),
            Cell::new(change.rewrites),
            Cell::new(if change.written { "yes" } else { "no" }),
        ]);
    }
    writeln!(writer, "{}", files)?;

    if report.changed_files.iter().any(|c| c.written) {
        writeln!(writer, "Suggested commit message: {}", report.commit_msg)?;
    }
    Ok(())
}

pub fn print_json<W: Write>(report: &RunReport, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
