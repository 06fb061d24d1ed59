//! iTunes Search HTTP client

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{EnrichmentError, IdentifiedTrack};
use crate::enrichment::http_client;

const DEFAULT_BASE_URL: &str = "https://itunes.apple.com/search";

/// Known field values to search by. Terms are joined artist, album, title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

impl SearchQuery {
    /// Space-joined search term, or `None` when there is nothing to search for.
    pub fn term(&self) -> Option<String> {
        let terms: Vec<&str> = [&self.artist, &self.album, &self.title]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .collect();
        (!terms.is_empty()).then(|| terms.join(" "))
    }
}

/// iTunes Search API client
pub struct ITunesClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ITunesClient {
    pub fn new(timeout: Duration) -> Result<Self, EnrichmentError> {
        Ok(Self {
            http_client: http_client(timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Search for the single best-matching song
    pub async fn search(&self, query: &SearchQuery) -> Result<IdentifiedTrack, EnrichmentError> {
        let term = query.term().ok_or(EnrichmentError::NoMatches)?;
        let response = self.send_search_request(&term).await?;
        adapter::to_identification(response)
    }

    fn search_url(&self, term: &str) -> String {
        format!(
            "{}?term={}&media=music&entity=song&limit=1",
            self.base_url,
            urlencoding::encode(term)
        )
    }

    async fn send_search_request(&self, term: &str) -> Result<dto::SearchResponse, EnrichmentError> {
        let response = self
            .http_client
            .get(self.search_url(term))
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(EnrichmentError::RateLimited);
        }
        if !status.is_success() {
            return Err(EnrichmentError::ApiError(format!(
                "HTTP {} for search: {}",
                status.as_u16(),
                term
            )));
        }

        // iTunes serves JSON as text/javascript, so decode the body ourselves
        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
