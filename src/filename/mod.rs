//! Filename-based tag hints.
//!
//! Recognises the two layouts tag-minder itself produces:
//! - `Artist - Album - Title`
//! - `Artist - Title`
//!
//! Segments are returned as-is. Whether a segment is usable as a tag value
//! is decided later by the resolution stages.

use std::path::Path;

use crate::model::Field;

/// Separator between segments. Hyphens without surrounding spaces are part
/// of the names ("Jay-Z", "Blink-182").
pub const SEPARATOR: &str = " - ";

/// Fields extracted from a filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFilename {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

impl ParsedFilename {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Title => self.title.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.album.is_none() && self.title.is_none()
    }
}

/// Parse a base name with no directory and no extension.
pub fn parse_stem(stem: &str) -> ParsedFilename {
    let parts: Vec<&str> = stem.split(SEPARATOR).collect();
    match parts.as_slice() {
        [artist, album, title] => ParsedFilename {
            artist: Some(artist.to_string()),
            album: Some(album.to_string()),
            title: Some(title.to_string()),
        },
        [artist, title] => ParsedFilename {
            artist: Some(artist.to_string()),
            album: None,
            title: Some(title.to_string()),
        },
        _ => ParsedFilename::default(),
    }
}

/// Parse the file stem of `path`.
pub fn parse_path(path: &Path) -> ParsedFilename {
    path.file_stem()
        .map(|stem| parse_stem(&stem.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_segments() {
        let parsed = parse_stem("Queen - A Night at the Opera - Bohemian Rhapsody");
        assert_eq!(parsed.artist.as_deref(), Some("Queen"));
        assert_eq!(parsed.album.as_deref(), Some("A Night at the Opera"));
        assert_eq!(parsed.title.as_deref(), Some("Bohemian Rhapsody"));
    }

    #[test]
    fn test_two_segments_leaves_album_unset() {
        let parsed = parse_stem("Queen - Bohemian Rhapsody");
        assert_eq!(parsed.artist.as_deref(), Some("Queen"));
        assert!(parsed.album.is_none());
        assert_eq!(parsed.title.as_deref(), Some("Bohemian Rhapsody"));
    }

    #[test]
    fn test_other_segment_counts_yield_nothing() {
        assert!(parse_stem("track01").is_empty());
        assert!(parse_stem("a - b - c - d").is_empty());
    }

    #[test]
    fn test_segments_are_not_validated() {
        let parsed = parse_stem("01 - ");
        assert_eq!(parsed.artist.as_deref(), Some("01"));
        assert_eq!(parsed.title.as_deref(), Some(""));
    }

    #[test]
    fn test_unspaced_hyphen_is_not_a_separator() {
        let parsed = parse_stem("Jay-Z - 99 Problems");
        assert_eq!(parsed.artist.as_deref(), Some("Jay-Z"));
        assert_eq!(parsed.title.as_deref(), Some("99 Problems"));
    }

    #[test]
    fn test_parse_path_strips_directory_and_extension() {
        let parsed = parse_path(Path::new("/music/in - box/Artist - Album - Song.mp3"));
        assert_eq!(parsed.artist.as_deref(), Some("Artist"));
        assert_eq!(parsed.album.as_deref(), Some("Album"));
        assert_eq!(parsed.title.as_deref(), Some("Song"));
    }
}
