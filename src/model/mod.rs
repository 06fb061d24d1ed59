//! Core data models for a single track being tidied.
//!
//! Defines the three tag [`Field`]s we care about, the plain
//! [`TrackFields`] value the resolution stages operate on, and the
//! [`TrackRecord`] that ties those fields to one file for one run.
//!
//! # Validity
//!
//! A value is *invalid* when it is absent, empty, whitespace-only, the
//! literal `"Unknown"`, a bare `"-"`, or (artist and title only) a one- or
//! two-digit number, which is almost always a track number that ended up in
//! the wrong frame. Validity is always computed on demand from the value.

use std::fmt;
use std::path::{Path, PathBuf};

/// Value written into any field no source could resolve.
pub const NOT_FOUND: &str = "not found";

/// Literal placeholder some taggers write for missing values.
const UNKNOWN: &str = "Unknown";

/// One of the tag fields managed by tag-minder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Artist,
    Album,
    Title,
}

impl Field {
    /// Resolution order used by every stage.
    pub const ALL: [Field; 3] = [Field::Artist, Field::Album, Field::Title];

    pub fn name(self) -> &'static str {
        match self {
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Title => "title",
        }
    }

    /// Returns true if `value` cannot be kept as this field's final value.
    pub fn is_invalid(self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return true;
        };
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == UNKNOWN || trimmed == "-" {
            return true;
        }
        match self {
            Field::Artist | Field::Title => is_short_number(trimmed),
            Field::Album => false,
        }
    }

    pub fn is_valid(self, value: Option<&str>) -> bool {
        !self.is_invalid(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_short_number(value: &str) -> bool {
    (1..=2).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

/// True for values that carry no identity for naming purposes.
pub fn is_missing_or_sentinel(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v == UNKNOWN || v == NOT_FOUND,
    }
}

/// Artist/album/title as plain optional strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFields {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

impl TrackFields {
    pub fn new(artist: Option<&str>, album: Option<&str>, title: Option<&str>) -> Self {
        Self {
            artist: artist.map(String::from),
            album: album.map(String::from),
            title: title.map(String::from),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Title => self.title.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Artist => &mut self.artist,
            Field::Album => &mut self.album,
            Field::Title => &mut self.title,
        };
        *slot = Some(value.into());
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        field.is_invalid(self.get(field))
    }

    /// Fields that still need a value, in resolution order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&f| self.is_invalid(f))
            .collect()
    }

    pub fn any_invalid(&self) -> bool {
        Field::ALL.iter().any(|&f| self.is_invalid(f))
    }

    /// Value usable as a search term: valid and not the sentinel.
    pub fn known(&self, field: Field) -> Option<&str> {
        self.get(field)
            .filter(|v| field.is_valid(Some(v)) && v.trim() != NOT_FOUND)
    }
}

/// The per-file state for one run: where the file lives, what its tags said
/// when we opened it, and what they say now.
#[derive(Debug, Clone)]
pub struct TrackRecord {
    pub path: PathBuf,
    pub original: TrackFields,
    pub current: TrackFields,
}

impl TrackRecord {
    pub fn new(path: impl Into<PathBuf>, fields: TrackFields) -> Self {
        Self {
            path: path.into(),
            original: fields.clone(),
            current: fields,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if any field differs from what was read off disk.
    pub fn changed(&self) -> bool {
        self.original != self.current
    }
}
