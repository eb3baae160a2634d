// relink/src/ui/mod.rs
//! Terminal output: diffs, summary tables and JSON reports.

pub mod diff_viewer;
pub mod summary;
