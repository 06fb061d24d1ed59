//! AcoustID HTTP client
//!
//! Handles communication with the AcoustID web service.
//! See: https://acoustid.org/webservice
//!
//! ## API Quirks
//!
//! The API uses `+` as a separator in the `meta` parameter
//! (e.g. `recordings+releasegroups`). Standard URL encoding turns `+` into
//! `%2B`, which the API does NOT recognise, and the response then comes back
//! without the requested metadata. The URL is therefore built by hand with a
//! literal `+`; do not move `meta` into reqwest's `.query()`.

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{AudioFingerprint, EnrichmentError, TrackIdentification};
use crate::enrichment::http_client;

const DEFAULT_BASE_URL: &str = "https://api.acoustid.org/v2/lookup";

/// AcoustID API client
pub struct AcoustIdClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl AcoustIdClient {
    /// Create a new client with the given API key and per-request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, EnrichmentError> {
        Ok(Self {
            api_key: api_key.into(),
            http_client: http_client(timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look up a fingerprint and return track identifications
    pub async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Vec<TrackIdentification>, EnrichmentError> {
        let response = self.send_lookup_request(fingerprint).await?;
        adapter::to_identifications(response)
    }

    fn lookup_url(&self, fingerprint: &AudioFingerprint) -> String {
        format!(
            "{}?client={}&duration={}&fingerprint={}&meta=recordings+releasegroups+compress",
            self.base_url,
            urlencoding::encode(&self.api_key),
            fingerprint.duration_secs,
            urlencoding::encode(&fingerprint.fingerprint)
        )
    }

    async fn send_lookup_request(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<dto::LookupResponse, EnrichmentError> {
        let response = self
            .http_client
            .get(self.lookup_url(fingerprint))
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        // AcoustID reports bad keys etc. as JSON with status "error", often
        // alongside a 400; let the adapter surface that message when it parses.
        if !status.is_success() && !status.is_client_error() {
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::LookupResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AcoustIdClient::new("test-key", Duration::from_secs(10)).unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_lookup_url_keeps_literal_plus_in_meta() {
        let client = AcoustIdClient::with_base_url("k y", "http://localhost:8080/lookup");
        let fp = AudioFingerprint {
            fingerprint: "AQA+/=".to_string(),
            duration_secs: 181,
        };

        let url = client.lookup_url(&fp);
        assert!(url.starts_with("http://localhost:8080/lookup?client=k%20y"));
        assert!(url.contains("duration=181"));
        assert!(url.contains("fingerprint=AQA%2B%2F%3D"));
        assert!(url.ends_with("meta=recordings+releasegroups+compress"));
    }
}
