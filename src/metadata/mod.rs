//! Tag container access.
//!
//! Uses the lofty crate to read and write the artist, album and title
//! frames. Every other frame in the file is left untouched.
//!
//! Reading is separated from writing so the resolution stages can work on a
//! plain [`TrackFields`] value; the caller writes back once, and only when
//! the record reports a change.

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TrackFields;

/// Read artist/album/title from the file's tags.
///
/// A file with no tag at all yields empty fields. A file lofty cannot parse
/// is an error: nothing else can be done with it.
pub fn read_fields(path: &Path) -> Result<TrackFields> {
    let tagged_file = Probe::open(path)
        .map_err(|e| Error::metadata(path, format!("failed to open: {e}")))?
        .read()
        .map_err(|e| Error::metadata(path, format!("failed to read tags: {e}")))?;

    // Get the primary tag, or fall back to the first available tag
    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(TrackFields::default());
    };

    Ok(TrackFields {
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        title: tag.title().map(|s| s.to_string()),
    })
}

/// Write artist/album/title to the file's primary tag, creating it if needed.
///
/// `None` fields are left as they are on disk.
pub fn write_fields(path: &Path, fields: &TrackFields) -> Result<()> {
    let mut tagged_file = Probe::open(path)
        .map_err(|e| Error::metadata(path, format!("failed to open for writing: {e}")))?
        .read()
        .map_err(|e| Error::metadata(path, format!("failed to read for writing: {e}")))?;

    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| Error::metadata(path, format!("no writable {tag_type:?} tag")))?;

    if let Some(ref artist) = fields.artist {
        tag.set_artist(artist.clone());
    }
    if let Some(ref album) = fields.album {
        tag.set_album(album.clone());
    }
    if let Some(ref title) = fields.title {
        tag.set_title(title.clone());
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::metadata(path, format!("failed to save tags: {e}")))?;

    tracing::debug!("Wrote tags to {:?}", path);
    Ok(())
}
