//! Batch driver: read, resolve, write back, rename, one file at a time.
//!
//! Files are processed strictly in sequence so the remote services see at
//! most one request at a time. A failing file is counted and the batch moves
//! on; only an invalid root aborts before anything is touched.

use std::path::{Path, PathBuf};

use futures::StreamExt;

use crate::enrichment::{FingerprintSource, TextSearchSource};
use crate::error::{Error, Result};
use crate::model::TrackRecord;
use crate::renamer::{self, RenameOutcome};
use crate::resolve::{ResolutionReport, Resolver};
use crate::{metadata, scanner};

/// What happened to one file.
#[derive(Debug, Clone)]
pub enum FileEvent {
    Processed {
        path: PathBuf,
        /// Tags differed from what was on disk (and were written unless dry run)
        tags_changed: bool,
        rename: RenameOutcome,
        report: ResolutionReport,
    },
    Error(PathBuf, String),
}

impl FileEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Processed { path, .. } | Self::Error(path, _) => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        match self {
            Self::Processed { rename, .. } => rename.is_failure(),
            Self::Error(..) => true,
        }
    }
}

/// End-of-run totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub tags_updated: usize,
    pub renamed: usize,
    pub failures: usize,
}

impl BatchSummary {
    fn record(&mut self, event: &FileEvent) {
        self.total += 1;
        if event.is_failure() {
            self.failures += 1;
        }
        if let FileEvent::Processed {
            tags_changed,
            rename,
            ..
        } = event
        {
            if *tags_changed {
                self.tags_updated += 1;
            }
            if matches!(rename, RenameOutcome::Renamed(_) | RenameOutcome::WouldRename(_)) {
                self.renamed += 1;
            }
        }
    }
}

/// Fails unless `root` is an existing directory.
pub fn validate_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(Error::NotADirectory(root.to_path_buf()))
    }
}

/// Resolve, write back and rename a single file.
///
/// With `dry_run` the resolution runs in full (remote lookups included) but
/// neither tags nor names change on disk.
pub async fn process_file<F, S>(resolver: &Resolver<F, S>, path: &Path, dry_run: bool) -> FileEvent
where
    F: FingerprintSource,
    S: TextSearchSource,
{
    let fields = match metadata::read_fields(path) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", path.display(), e);
            return FileEvent::Error(path.to_path_buf(), e.to_string());
        }
    };

    let mut record = TrackRecord::new(path, fields);
    let resolution = resolver.resolve(&record).await;
    record.current = resolution.fields;

    let tags_changed = record.changed();
    if tags_changed && !dry_run {
        if let Err(e) = metadata::write_fields(record.path(), &record.current) {
            tracing::warn!("{}", e);
            return FileEvent::Error(path.to_path_buf(), e.to_string());
        }
        tracing::info!("Updated tags for {}", path.display());
    }

    let plan = renamer::plan_rename(record.path(), &record.current);
    let rename = renamer::apply_rename(&plan, dry_run);

    FileEvent::Processed {
        path: path.to_path_buf(),
        tags_changed,
        rename,
        report: resolution.report,
    }
}

/// Process every MP3 under `root`, calling `on_file` after each one.
///
/// The directory listing is taken up front so renames made during the run
/// cannot cause a file to be visited twice.
pub async fn process_library<F, S>(
    resolver: &Resolver<F, S>,
    root: &Path,
    dry_run: bool,
    mut on_file: impl FnMut(&FileEvent),
) -> Result<BatchSummary>
where
    F: FingerprintSource,
    S: TextSearchSource,
{
    validate_root(root)?;

    let paths: Vec<PathBuf> = scanner::scan(root.to_path_buf()).collect().await;
    tracing::info!("Found {} MP3 files under {}", paths.len(), root.display());

    let mut summary = BatchSummary::default();
    for path in &paths {
        let event = process_file(resolver, path, dry_run).await;
        summary.record(&event);
        on_file(&event);
    }

    Ok(summary)
}
