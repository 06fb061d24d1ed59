//! Adapter layer: Convert AcoustID DTOs to domain models
//!
//! This is the ONLY place where AcoustID DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::{
    EnrichmentError, EnrichmentSource, IdentifiedTrack, TrackIdentification,
};

/// Convert an AcoustID lookup response to domain identifications
pub fn to_identifications(
    response: dto::LookupResponse,
) -> Result<Vec<TrackIdentification>, EnrichmentError> {
    if response.status != "ok" {
        let message = response
            .error
            .map(|e| format!("{} (code {})", e.message, e.code))
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(EnrichmentError::ApiError(message));
    }

    Ok(response
        .results
        .into_iter()
        .flat_map(|result| {
            let score = result.score;
            result
                .recordings
                .into_iter()
                .map(move |recording| convert_recording(recording, score))
        })
        .collect())
}

/// One identification per recording. The first release group supplies the album.
fn convert_recording(recording: dto::Recording, score: f32) -> TrackIdentification {
    let artist = recording.artists.first().map(|a| a.name.clone());
    let album = recording
        .releasegroups
        .into_iter()
        .find_map(|rg| rg.title);

    TrackIdentification {
        score,
        track: IdentifiedTrack {
            recording_id: Some(recording.id),
            title: recording.title,
            artist,
            album,
        },
        source: EnrichmentSource::AcoustId,
    }
}

/// Select the best identification from a list (highest score).
/// Ties keep the earliest, which is the order AcoustID ranked them in.
pub fn best_identification(
    identifications: Vec<TrackIdentification>,
) -> Option<TrackIdentification> {
    identifications.into_iter().reduce(|best, candidate| {
        if candidate.score > best.score { candidate } else { best }
    })
}
