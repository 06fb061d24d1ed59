//! Tag Minder - tidies MP3 tags and filenames.
//!
//! Walks a directory of MP3s, fills missing artist/album/title from the
//! filename, an audio fingerprint lookup and a text search, writes the tags
//! back and renames each file to `Artist - Album - Title.mp3`.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod filename;
pub mod library;
pub mod metadata;
pub mod model;
pub mod renamer;
pub mod resolve;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Diagnostics go to stderr; stdout carries the per-file report
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("tag_minder=info".parse()?))
        .init();

    cli::run(&args)
}
