//! MusicBrainz HTTP client
//!
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{EnrichmentError, TrackIdentification};
use crate::enrichment::http_client;

const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MusicBrainzClient {
    pub fn new(timeout: Duration) -> Result<Self, EnrichmentError> {
        Ok(Self {
            http_client: http_client(timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Look up a recording by MusicBrainz ID
    pub async fn lookup_recording(
        &self,
        recording_id: &str,
    ) -> Result<TrackIdentification, EnrichmentError> {
        let response = self.send_recording_request(recording_id).await?;
        Ok(adapter::to_identification(response))
    }

    fn recording_url(&self, recording_id: &str) -> String {
        format!(
            "{}/recording/{}?fmt=json&inc=releases+artist-credits",
            self.base_url,
            urlencoding::encode(recording_id)
        )
    }

    async fn send_recording_request(
        &self,
        recording_id: &str,
    ) -> Result<dto::RecordingResponse, EnrichmentError> {
        let response = self
            .http_client
            .get(self.recording_url(recording_id))
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NoMatches);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(EnrichmentError::ApiError(error.error));
            }
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::RecordingResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
