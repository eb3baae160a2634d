// relink/src/ui/diff_viewer.rs
//! Unified diff output for rewritten files.
//!
//! Deleted lines are shown in red and inserted lines in green when the
//! writer is a color-capable terminal.

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::Write;

/// Writes a unified diff of `original` -> `rewritten` labelled with `label`.
/// Nothing is written when the two texts are identical.
pub fn print_diff<W: Write>(
    original: &str,
    rewritten: &str,
    label: &str,
    writer: &mut W,
    supports_color: bool,
) -> Result<()> {
    if original == rewritten {
        return Ok(());
    }
    let patch = create_patch(original, rewritten);

    let old_header = format!("--- a/{}", label);
    let new_header = format!("+++ b/{}", label);
    if supports_color {
        writeln!(writer, "{}", old_header.bold())?;
        writeln!(writer, "{}", new_header.bold())?;
    } else {
        writeln!(writer, "{}", old_header)?;
        writeln!(writer, "{}", new_header)?;
    }

    for hunk in patch.hunks() {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_range().start(),
            hunk.old_range().len(),
            hunk.new_range().start(),
            hunk.new_range().len()
        );
        if supports_color {
            writeln!(writer, "{}", header.cyan())?;
        } else {
            writeln!(writer, "{}", header)?;
        }

        for line in hunk.lines() {
            let (prefix, text) = match line {
                DiffLine::Delete(s) => ('-', *s),
                DiffLine::Insert(s) => ('+', *s),
                DiffLine::Context(s) => (' ', *s),
            };
            let body = text.strip_suffix('\n').unwrap_or(text);
            let rendered = format!("{}{}", prefix, body);
            match (supports_color, prefix) {
                (true, '-') => writeln!(writer, "{}", rendered.red())?,
                (true, '+') => writeln!(writer, "{}", rendered.green())?,
                _ => writeln!(writer, "{}", rendered)?,
            }
        }
    }
    Ok(())
}
