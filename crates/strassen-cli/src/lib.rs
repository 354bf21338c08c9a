//! # strassen-cli
//!
//! Terminal output for the `strassen` binary: benchmark progress lines,
//! product and summary tables, console styling, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod ui;

pub use presenter::{BenchPresenter, CliPresenter};
