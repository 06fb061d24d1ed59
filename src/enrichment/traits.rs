//! Trait definitions for external lookups.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! substitute the mocks below.
//!
//! - [`AcoustIdApi`] / [`MusicBrainzApi`]: raw clients used by
//!   [`FingerprintService`](super::FingerprintService)
//! - [`FingerprintSource`] / [`TextSearchSource`]: what the resolution
//!   engine talks to

use std::path::Path;

use async_trait::async_trait;

use super::domain::{
    AudioFingerprint, EnrichmentError, FingerprintOutcome, IdentifiedTrack, TrackIdentification,
};
use super::itunes::SearchQuery;

/// Trait for AcoustID fingerprint lookup.
#[async_trait]
pub trait AcoustIdApi: Send + Sync {
    /// Look up a fingerprint and return possible track identifications.
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Vec<TrackIdentification>, EnrichmentError>;
}

/// Trait for MusicBrainz metadata lookup.
#[async_trait]
pub trait MusicBrainzApi: Send + Sync {
    /// Look up a recording by its MusicBrainz ID.
    async fn lookup_recording(
        &self,
        recording_id: &str,
    ) -> Result<TrackIdentification, EnrichmentError>;
}

/// Identifies a file from its audio content.
#[async_trait]
pub trait FingerprintSource: Send + Sync {
    async fn identify(&self, path: &Path) -> FingerprintOutcome;
}

/// Looks up a track from free-text terms.
#[async_trait]
pub trait TextSearchSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<IdentifiedTrack, EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl AcoustIdApi for super::acoustid::AcoustIdClient {
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Vec<TrackIdentification>, EnrichmentError> {
        self.lookup(fingerprint).await
    }
}

#[async_trait]
impl MusicBrainzApi for super::musicbrainz::MusicBrainzClient {
    async fn lookup_recording(
        &self,
        recording_id: &str,
    ) -> Result<TrackIdentification, EnrichmentError> {
        self.lookup_recording(recording_id).await
    }
}

#[async_trait]
impl TextSearchSource for super::itunes::ITunesClient {
    async fn search(&self, query: &SearchQuery) -> Result<IdentifiedTrack, EnrichmentError> {
        self.search(query).await
    }
}
