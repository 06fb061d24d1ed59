//! Adapter layer: Convert iTunes DTOs to domain models

use super::dto;
use crate::enrichment::domain::{EnrichmentError, IdentifiedTrack};

/// Take the top search result. An empty result list is [`EnrichmentError::NoMatches`].
pub fn to_identification(response: dto::SearchResponse) -> Result<IdentifiedTrack, EnrichmentError> {
    let result = response
        .results
        .into_iter()
        .next()
        .ok_or(EnrichmentError::NoMatches)?;

    Ok(IdentifiedTrack {
        recording_id: None,
        artist: result.artist_name,
        album: result.collection_name,
        title: result.track_name,
    })
}
