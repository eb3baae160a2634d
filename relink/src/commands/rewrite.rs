// relink/src/commands/rewrite.rs
//! `relink rewrite`: one input in, one output out.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use std::io::{self, Read, Write};

use relink_core::{summarize, EngineOptions, GithubUrlEngine, RewriteEngine, TargetIdentity, UrlCategory};

use crate::cli::RewriteArgs;
use crate::ui::diff_viewer;

pub fn run_rewrite(args: &RewriteArgs, target: TargetIdentity, quiet: bool) -> Result<()> {
    let (input, source_id) = match &args.input {
        Some(path) => (
            std::fs::read_to_string(path).with_context(|| format!("Failed to read input file '{}'", path.display()))?,
            path.to_string_lossy().into_owned(),
        ),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read from stdin")?;
            (buf, "stdin".to_string())
        }
    };

    let categories: Vec<UrlCategory> = args.types.iter().copied().map(UrlCategory::from).collect();
    let engine = GithubUrlEngine::new(EngineOptions::new(categories, args.ignore.clone(), target));
    let (output, matches) = engine.rewrite(&input, &source_id);

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    if args.diff {
        diff_viewer::print_diff(&input, &output, &source_id, &mut out, color)?;
    } else {
        out.write_all(output.as_bytes())?;
    }
    out.flush()?;

    if !quiet {
        let mut err = io::stderr().lock();
        for item in summarize(&matches) {
            writeln!(err, "{}: {} rewrite(s)", item.rule_name, item.occurrences)?;
        }
    }
    Ok(())
}
