//! CLI argument definitions and the batch command.
//!
//! Parses flags, layers them over the config file, builds the lookup
//! clients and hands everything to the batch driver.

use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::config::{self, Config, SearchErrorPolicy};
use crate::enrichment::{FingerprintConfig, FingerprintService, ITunesClient};
use crate::library::{self, BatchSummary, FileEvent};
use crate::renamer::RenameOutcome;
use crate::resolve::{ResolveSettings, Resolver};

/// Fill missing MP3 tags and rename files to "Artist - Album - Title.mp3"
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to process (default: library.default_path from config)
    pub path: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// AcoustID API key
    #[arg(short, long, env = "ACOUSTID_API_KEY")]
    pub api_key: Option<String>,

    /// Skip audio fingerprint lookups
    #[arg(long)]
    pub no_fingerprint: bool,

    /// Skip text search lookups
    #[arg(long)]
    pub no_search: bool,

    /// Show what would change without writing tags or renaming
    #[arg(long)]
    pub dry_run: bool,

    /// After a failed search, keep searching for the file's other fields
    #[arg(long)]
    pub keep_going_on_search_error: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref key) = self.api_key {
            config.credentials.acoustid_api_key = key.clone();
        }
        if self.no_fingerprint {
            config.lookup.fingerprint = false;
        }
        if self.no_search {
            config.lookup.text_search = false;
        }
        if self.keep_going_on_search_error {
            config.lookup.search_error_policy = SearchErrorPolicy::SkipField;
        }
    }

    /// Directory to process: the argument, else the configured default.
    /// A leading `~` is expanded in either.
    pub fn root(&self, config: &Config) -> PathBuf {
        match self.path {
            Some(ref path) => match path.to_str() {
                Some(s) => config::expand_home(s),
                None => path.clone(),
            },
            None => config::expand_home(&config.library.default_path),
        }
    }
}

/// Run the batch over the chosen directory and print a summary.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => config::load_from(path)?,
        None => config::load(),
    };
    cli.apply_overrides(&mut config);

    let root = cli.root(&config);
    library::validate_root(&root)?;

    let lookup = &config.lookup;
    let fingerprint: Option<FingerprintService> = if lookup.fingerprint {
        Some(FingerprintService::new(&FingerprintConfig {
            acoustid_api_key: config.credentials.acoustid_api_key.clone(),
            min_confidence: lookup.min_confidence,
            use_musicbrainz: lookup.use_musicbrainz,
            timeout: lookup.request_timeout(),
            musicbrainz_delay: lookup.musicbrainz_delay(),
        })?)
    } else {
        info!("Fingerprint lookups disabled");
        None
    };
    let search = if lookup.text_search {
        Some(ITunesClient::new(lookup.request_timeout())?)
    } else {
        info!("Text search disabled");
        None
    };
    let resolver = Resolver::new(fingerprint, search, ResolveSettings::from(lookup));

    println!("Processing: {}", root.display());
    if cli.dry_run {
        println!("\n[DRY RUN MODE - No tags or filenames will be changed]\n");
    }

    let rt = Runtime::new()?;
    let summary = rt.block_on(library::process_library(
        &resolver,
        &root,
        cli.dry_run,
        print_event,
    ))?;

    print_summary(&summary);
    if summary.failures > 0 {
        warn!("{} file(s) failed", summary.failures);
    }
    Ok(())
}

fn print_event(event: &FileEvent) {
    let path = event.path().display();
    match event {
        FileEvent::Error(_, message) => println!("ERROR   {}: {}", path, message),
        FileEvent::Processed {
            tags_changed,
            rename,
            ..
        } => {
            let tags = if *tags_changed { "tags updated" } else { "tags ok" };
            match rename {
                RenameOutcome::Renamed(to) => println!("RENAMED {} -> {} ({})", path, display_name(to), tags),
                RenameOutcome::WouldRename(to) => {
                    println!("WOULD RENAME {} -> {} ({})", path, display_name(to), tags)
                }
                RenameOutcome::Conflict(to) => {
                    println!("CONFLICT {}: {} already exists ({})", path, display_name(to), tags)
                }
                RenameOutcome::Failed(e) => println!("ERROR   {}: {} ({})", path, e, tags),
                RenameOutcome::Skipped => println!("SKIPPED {}: no artist or title ({})", path, tags),
                RenameOutcome::Unchanged => println!("OK      {} ({})", path, tags),
            }
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("Files processed: {}", summary.total);
    println!("Tags updated:    {}", summary.tags_updated);
    println!("Files renamed:   {}", summary.renamed);
    println!("Failures:        {}", summary.failures);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tag-minder").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(cli.path.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.no_fingerprint);
        assert!(!cli.no_search);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "/music",
            "--api-key",
            "secret",
            "--no-fingerprint",
            "--no-search",
            "--keep-going-on-search-error",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.credentials.acoustid_api_key, "secret");
        assert!(!config.lookup.fingerprint);
        assert!(!config.lookup.text_search);
        assert_eq!(config.lookup.search_error_policy, SearchErrorPolicy::SkipField);
        assert_eq!(cli.root(&config), PathBuf::from("/music"));
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli {
            path: None,
            config: None,
            api_key: None,
            no_fingerprint: false,
            no_search: false,
            dry_run: false,
            keep_going_on_search_error: false,
        };
        let mut config = Config::default();
        config.lookup.text_search = false;
        config.library.default_path = "/srv/mp3".to_string();
        cli.apply_overrides(&mut config);

        assert!(config.lookup.fingerprint);
        assert!(!config.lookup.text_search);
        assert_eq!(config.lookup.search_error_policy, SearchErrorPolicy::StopFile);
        assert_eq!(cli.root(&config), PathBuf::from("/srv/mp3"));
    }

    #[test]
    fn test_root_argument_expands_home() {
        let cli = parse(&["~/music"]);
        let root = cli.root(&Config::default());
        match dirs::home_dir() {
            Some(home) => assert_eq!(root, home.join("music")),
            None => assert_eq!(root, PathBuf::from("~/music")),
        }
    }

    #[test]
    fn test_run_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            path: Some(dir.path().join("missing")),
            config: None,
            api_key: None,
            no_fingerprint: true,
            no_search: true,
            dry_run: false,
            keep_going_on_search_error: false,
        };
        assert!(run(&cli).is_err());
    }
}
