// relink/src/logger.rs
//! Logger setup for the relink binary and its tests.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger` on stderr.
///
/// With `Some(level)` the level overrides `RUST_LOG`; with `None`, `RUST_LOG`
/// applies and defaults to `warn`. Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}
