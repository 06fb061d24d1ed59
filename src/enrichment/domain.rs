//! Internal domain models for track identification.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

use crate::model::Field;

/// Result of attempting to identify a track via audio fingerprint
#[derive(Debug, Clone)]
pub struct TrackIdentification {
    /// Confidence score (0.0 to 1.0)
    pub score: f32,
    /// The identified track info
    pub track: IdentifiedTrack,
    /// Where this identification came from
    pub source: EnrichmentSource,
}

/// Track metadata obtained from external services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifiedTrack {
    /// MusicBrainz recording ID (if available)
    pub recording_id: Option<String>,
    /// Track title
    pub title: Option<String>,
    /// Artist name
    pub artist: Option<String>,
    /// Album title
    pub album: Option<String>,
}

/// Source of enrichment data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentSource {
    AcoustId,
    MusicBrainz,
}

/// Audio fingerprint for a track
#[derive(Debug, Clone)]
pub struct AudioFingerprint {
    /// The fingerprint string (Chromaprint format)
    pub fingerprint: String,
    /// Duration of the audio in seconds (required by AcoustID)
    pub duration_secs: u32,
}

/// What a fingerprint identification attempt produced.
///
/// Each failure class is its own variant so the resolution engine can log
/// them differently and decide which ones touched the network.
#[derive(Debug, Clone)]
pub enum FingerprintOutcome {
    /// Best match above the confidence floor
    Success { track: IdentifiedTrack, confidence: f32 },
    /// The service answered but nothing cleared the confidence floor
    NoMatch { best_score: Option<f32> },
    /// No fingerprinting backend (fpcalc) installed
    NoBackend,
    /// fpcalc ran but could not fingerprint this file
    GenerationFailed { reason: String },
    /// Network, HTTP or response errors
    OtherError { message: String },
}

impl FingerprintOutcome {
    /// True if a request was sent to the remote service.
    pub fn reached_service(&self) -> bool {
        matches!(
            self,
            Self::Success { .. } | Self::NoMatch { .. } | Self::OtherError { .. }
        )
    }
}

/// Errors that can occur during enrichment
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("fpcalc not found. Install Chromaprint: https://acoustid.org/chromaprint")]
    FingerprintUnavailable,

    #[error("Failed to generate fingerprint: {0}")]
    FingerprintError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matches found")]
    NoMatches,

    #[error("Rate limited - try again later")]
    RateLimited,
}

impl From<EnrichmentError> for FingerprintOutcome {
    fn from(error: EnrichmentError) -> Self {
        match error {
            EnrichmentError::FingerprintUnavailable => Self::NoBackend,
            EnrichmentError::FingerprintError(reason) => Self::GenerationFailed { reason },
            EnrichmentError::NoMatches => Self::NoMatch { best_score: None },
            other => Self::OtherError {
                message: other.to_string(),
            },
        }
    }
}

impl IdentifiedTrack {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Title => self.title.as_deref(),
        }
    }

    /// Merge another identification into this one, preferring existing values
    pub fn merge(&mut self, other: &IdentifiedTrack) {
        if self.title.is_none() { self.title = other.title.clone(); }
        if self.artist.is_none() { self.artist = other.artist.clone(); }
        if self.album.is_none() { self.album = other.album.clone(); }
        if self.recording_id.is_none() { self.recording_id = other.recording_id.clone(); }
    }
}
