//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! We only use the /recording endpoint with `inc=releases+artist-credits`.

use serde::{Deserialize, Serialize};

/// Recording lookup response (single recording with includes)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RecordingResponse {
    /// MusicBrainz recording ID
    pub id: String,
    pub title: String,
    /// Artist credits
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    /// Releases this recording appears on
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    pub artist: Artist,
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: String,
    /// Official artist name
    pub name: String,
}

/// Release (album/single/EP)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    pub id: String,
    pub title: String,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_recording_with_releases() {
        let json = r#"{
            "id": "rec-1",
            "title": "Bohemian Rhapsody",
            "length": 354000,
            "artist-credit": [
                {"name": "Queen", "joinphrase": "", "artist": {"id": "art-1", "name": "Queen"}}
            ],
            "releases": [
                {"id": "rel-1", "title": "A Night at the Opera", "status": "Official"}
            ]
        }"#;

        let response: RecordingResponse = serde_json::from_str(json).expect("Should parse");
        assert_eq!(response.title, "Bohemian Rhapsody");
        assert_eq!(response.artist_credit[0].artist.name, "Queen");
        assert_eq!(response.releases[0].title, "A Night at the Opera");
    }

    #[test]
    fn test_parse_recording_without_includes() {
        let json = r#"{"id": "rec-1", "title": "Song"}"#;

        let response: RecordingResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.artist_credit.is_empty());
        assert!(response.releases.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let error: ApiError = serde_json::from_str(r#"{"error": "Not Found"}"#).unwrap();
        assert_eq!(error.error, "Not Found");
    }
}
