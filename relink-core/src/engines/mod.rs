// relink-core/src/engines/mod.rs
//! Concrete implementations of the `RewriteEngine` trait.
//!
//! Each engine lives in its own file and is declared here.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod github_url_engine;
pub mod link_engine;
