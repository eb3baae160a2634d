// relink/src/lib.rs
//! # relink CLI Application
//!
//! Command-line front end for `relink-core`: discovers files from the
//! configuration, rewrites their GitHub links concurrently and reports what
//! changed.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod report;
pub mod ui;
pub mod utils;
