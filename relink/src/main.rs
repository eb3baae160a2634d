// relink/src/main.rs
//! relink entry point.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use relink::cli::{Cli, Commands};
use relink::commands::{apply::run_apply, resolve_target, rewrite::run_rewrite};
use relink::logger;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let target = resolve_target(cli.repo.as_deref())?;
    match &cli.command {
        Commands::Apply(args) => {
            run_apply(args, target, true, false, cli.quiet).await?;
        }
        Commands::Check(args) => {
            run_apply(&args.run, target, false, args.fail_on_change, cli.quiet).await?;
        }
        Commands::Rewrite(args) => run_rewrite(args, target, cli.quiet)?,
    }
    Ok(())
}
