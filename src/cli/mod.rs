//! Command-line interface for tag-minder.
//!
//! A single command: process a directory of MP3s, optionally as a dry run.

mod commands;

pub use commands::{Cli, run};
