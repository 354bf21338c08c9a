//! Application logic for the `strassen` command-line tool.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
