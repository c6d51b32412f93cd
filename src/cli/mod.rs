//! Command-line interface
//!
//! `pagerkit` drives a configured source from the shell: validate a
//! configuration, run the count query, or page through the list.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
