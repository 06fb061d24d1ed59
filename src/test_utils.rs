//! Test utilities and fixtures for tag-minder tests.
//!
//! Provides a tiny but valid MP3 so tag read/write tests exercise lofty
//! against a real container instead of mocks.
//!
//! # Example
//!
//! ```ignore
//! use tag_minder::test_utils::write_silent_mp3;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = write_silent_mp3(dir.path(), "track.mp3");
//! ```

use std::path::{Path, PathBuf};

use crate::model::TrackFields;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no CRC, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// 144 * 128000 / 44100, rounded down.
const FRAME_LEN: usize = 417;

const FRAME_COUNT: usize = 10;

/// Writes an untagged MP3 of silent frames to `dir/name` and returns its path.
pub fn write_silent_mp3(dir: &Path, name: &str) -> PathBuf {
    let mut bytes = Vec::with_capacity(FRAME_LEN * FRAME_COUNT);
    for _ in 0..FRAME_COUNT {
        bytes.extend_from_slice(&FRAME_HEADER);
        bytes.resize(bytes.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write test mp3");
    path
}

/// Writes a silent MP3 already tagged with `fields`.
pub fn write_tagged_mp3(dir: &Path, name: &str, fields: &TrackFields) -> PathBuf {
    let path = write_silent_mp3(dir, name);
    crate::metadata::write_fields(&path, fields).expect("Failed to tag test mp3");
    path
}

/// Fields for a fully resolved track.
pub fn complete_fields() -> TrackFields {
    TrackFields::new(Some("Queen"), Some("Jazz"), Some("Mustapha"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mp3_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_silent_mp3(dir.path(), "a.mp3");
        assert_eq!(std::fs::metadata(&path).unwrap().len(), (FRAME_LEN * FRAME_COUNT) as u64);
    }

    #[test]
    fn test_tagged_mp3_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tagged_mp3(dir.path(), "a.mp3", &complete_fields());
        assert_eq!(crate::metadata::read_fields(&path).unwrap(), complete_fields());
    }
}
