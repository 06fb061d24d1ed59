//! AcoustID API Data Transfer Objects
//!
//! These types match EXACTLY what the AcoustID API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the acoustid module - convert to domain types.
//!
//! API Reference: https://acoustid.org/webservice#lookup
//!
//! Example response (meta=recordings+releasegroups):
//! ```json
//! {
//!   "status": "ok",
//!   "results": [{
//!     "id": "abcd1234",
//!     "score": 0.95,
//!     "recordings": [{
//!       "id": "recording-mbid",
//!       "title": "Song Title",
//!       "duration": 180,
//!       "artists": [{"id": "artist-mbid", "name": "Artist Name"}],
//!       "releasegroups": [{"id": "rg-mbid", "title": "Album", "type": "Album"}]
//!     }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level AcoustID lookup response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<LookupResult>,
    /// Error info if status != "ok"
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
}

/// A single fingerprint match result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupResult {
    /// AcoustID identifier
    pub id: String,
    /// Match confidence (0.0 to 1.0)
    pub score: f32,
    /// Associated MusicBrainz recordings (if meta=recordings requested)
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// MusicBrainz recording info returned by AcoustID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Recording {
    /// MusicBrainz recording ID
    pub id: String,
    /// Track title
    pub title: Option<String>,
    /// Duration in seconds (API returns float, e.g. 353.0)
    pub duration: Option<f64>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Release groups (album groupings) this recording appears on
    #[serde(default)]
    pub releasegroups: Vec<ReleaseGroup>,
}

/// Artist info from AcoustID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    /// MusicBrainz artist ID
    pub id: String,
    pub name: String,
}

/// Release group info from AcoustID (when meta=releasegroups requested)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseGroup {
    /// MusicBrainz release group ID
    pub id: String,
    /// Album title
    pub title: Option<String>,
    /// Primary type (Album, Single, EP, etc.)
    #[serde(rename = "type")]
    pub release_type: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_minimal_success_response() {
        let json = r#"{"status": "ok", "results": []}"#;

        let response: LookupResponse =
            serde_json::from_str(json).expect("Should parse minimal response");

        assert_eq!(response.status, "ok");
        assert!(response.results.is_empty());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_parse_response_with_release_groups() {
        let json = r#"{
            "status": "ok",
            "results": [{
                "id": "abc123",
                "score": 0.95,
                "recordings": [{
                    "id": "rec-mbid-123",
                    "title": "Test Song",
                    "duration": 180.0,
                    "artists": [{"id": "art-mbid", "name": "Test Artist"}],
                    "releasegroups": [{"id": "rg-1", "title": "Test Album", "type": "Album"}]
                }]
            }]
        }"#;

        let response: LookupResponse =
            serde_json::from_str(json).expect("Should parse response with results");

        let result = &response.results[0];
        assert_eq!(result.id, "abc123");
        assert!((result.score - 0.95).abs() < 0.001);

        let recording = &result.recordings[0];
        assert_eq!(recording.title.as_deref(), Some("Test Song"));
        assert_eq!(recording.duration, Some(180.0));
        assert_eq!(recording.artists[0].name, "Test Artist");
        assert_eq!(recording.releasegroups[0].title.as_deref(), Some("Test Album"));
        assert_eq!(recording.releasegroups[0].release_type.as_deref(), Some("Album"));
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "status": "error",
            "error": {"code": 4, "message": "invalid API key"}
        }"#;

        let response: LookupResponse =
            serde_json::from_str(json).expect("Should parse error response");

        assert_eq!(response.status, "error");
        let error = response.error.unwrap();
        assert_eq!(error.code, 4);
        assert_eq!(error.message, "invalid API key");
    }

    #[test]
    fn test_parse_sparse_recording() {
        let json = r#"{
            "status": "ok",
            "results": [{"id": "abc", "score": 0.5, "recordings": [{"id": "rec-123"}]}]
        }"#;

        let response: LookupResponse =
            serde_json::from_str(json).expect("Should parse sparse recording");

        let recording = &response.results[0].recordings[0];
        assert!(recording.title.is_none());
        assert!(recording.artists.is_empty());
        assert!(recording.releasegroups.is_empty());
    }
}
