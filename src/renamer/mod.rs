//! Renames tracks to `Artist - Album - Title.ext` within their directory.
//!
//! A rename is planned first ([`plan_rename`]) and then applied
//! ([`apply_rename`]), so dry runs and real runs share every guard:
//! - no usable artist and no usable title: skip, not an error
//! - already correctly named: nothing to do
//! - a different file sits at the target: refuse and report a conflict
//!
//! Files never leave their parent directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::filename::SEPARATOR;
use crate::model::{Field, NOT_FOUND, TrackFields, is_missing_or_sentinel};

/// What [`apply_rename`] would do for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenamePlan {
    /// Neither artist nor title is known; leave the file alone
    Skip,
    /// File already carries its canonical name
    Unchanged,
    Move { from: PathBuf, to: PathBuf },
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Skipped,
    Unchanged,
    Renamed(PathBuf),
    /// Dry run: the file would have been renamed to this path
    WouldRename(PathBuf),
    /// Another file already occupies the target path
    Conflict(PathBuf),
    Failed(String),
}

impl RenameOutcome {
    /// True for outcomes the batch counts as a per-file failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Failed(_))
    }
}

/// Canonical filename for `fields`, keeping `ext`.
///
/// Missing values are written as the not-found sentinel.
pub fn canonical_name(fields: &TrackFields, ext: &str) -> String {
    let parts: Vec<String> = Field::ALL
        .into_iter()
        .map(|field| sanitize_filename(fields.get(field).unwrap_or(NOT_FOUND).trim()))
        .collect();
    format!("{}.{}", parts.join(SEPARATOR), ext)
}

/// Decide what renaming `path` to match `fields` involves.
pub fn plan_rename(path: &Path, fields: &TrackFields) -> RenamePlan {
    if is_missing_or_sentinel(fields.artist.as_deref())
        && is_missing_or_sentinel(fields.title.as_deref())
    {
        return RenamePlan::Skip;
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp3");
    let target = path.with_file_name(canonical_name(fields, ext));

    if target == path {
        RenamePlan::Unchanged
    } else {
        RenamePlan::Move {
            from: path.to_path_buf(),
            to: target,
        }
    }
}

/// Carry out `plan`. With `dry_run` nothing on disk changes, but the
/// conflict check still runs.
pub fn apply_rename(plan: &RenamePlan, dry_run: bool) -> RenameOutcome {
    let (from, to) = match plan {
        RenamePlan::Skip => return RenameOutcome::Skipped,
        RenamePlan::Unchanged => return RenameOutcome::Unchanged,
        RenamePlan::Move { from, to } => (from, to),
    };

    if dry_run {
        return match check_target(from, to) {
            Ok(()) => RenameOutcome::WouldRename(to.clone()),
            Err(Error::TargetExists(target)) => RenameOutcome::Conflict(target),
            Err(e) => RenameOutcome::Failed(e.to_string()),
        };
    }

    match move_file(from, to) {
        Ok(()) => {
            tracing::info!("Renamed {} -> {}", from.display(), to.display());
            RenameOutcome::Renamed(to.clone())
        }
        Err(Error::TargetExists(target)) => {
            tracing::warn!(
                "Not renaming {}: {} already exists",
                from.display(),
                target.display()
            );
            RenameOutcome::Conflict(target)
        }
        Err(e) => {
            tracing::warn!("{}", e);
            RenameOutcome::Failed(e.to_string())
        }
    }
}

/// Rename `from` to `to`, refusing to replace a different file.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    check_target(from, to)?;
    fs::rename(from, to).map_err(|source| Error::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

fn check_target(from: &Path, to: &Path) -> Result<()> {
    match fs::symlink_metadata(to) {
        Ok(_) if same_file(from, to) => Ok(()),
        Ok(_) => Err(Error::TargetExists(to.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Both paths name the same file, e.g. a case-only rename on a
/// case-insensitive filesystem.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Sanitizes a filename by removing/replacing invalid characters
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
