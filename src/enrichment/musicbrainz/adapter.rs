//! Adapter layer: Convert MusicBrainz DTOs to domain models

use super::dto;
use crate::enrichment::domain::{EnrichmentSource, IdentifiedTrack, TrackIdentification};

/// Convert a MusicBrainz recording response to a TrackIdentification
pub fn to_identification(response: dto::RecordingResponse) -> TrackIdentification {
    let track = IdentifiedTrack {
        artist: build_artist_string(&response.artist_credit),
        album: response.releases.into_iter().next().map(|r| r.title),
        title: Some(response.title),
        recording_id: Some(response.id),
    };

    TrackIdentification {
        score: 1.0, // MusicBrainz lookups by ID are exact matches
        track,
        source: EnrichmentSource::MusicBrainz,
    }
}

/// Build a combined artist string from artist credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    if credits.is_empty() {
        return None;
    }

    let mut result = String::new();
    for credit in credits {
        // Use credited name if available, otherwise official name
        let name = credit.name.as_ref().unwrap_or(&credit.artist.name);
        result.push_str(name);

        if let Some(ref join) = credit.joinphrase {
            result.push_str(join);
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(name: &str, join: Option<&str>) -> dto::ArtistCredit {
        dto::ArtistCredit {
            artist: dto::Artist {
                id: format!("{name}-id"),
                name: name.to_string(),
            },
            name: None,
            joinphrase: join.map(String::from),
        }
    }

    #[test]
    fn test_first_release_supplies_album() {
        let response = dto::RecordingResponse {
            id: "rec-1".to_string(),
            title: "Under Pressure".to_string(),
            artist_credit: vec![credit("Queen", Some(" & ")), credit("David Bowie", None)],
            releases: vec![
                dto::Release {
                    id: "rel-1".to_string(),
                    title: "Hot Space".to_string(),
                    status: Some("Official".to_string()),
                },
                dto::Release {
                    id: "rel-2".to_string(),
                    title: "Greatest Hits II".to_string(),
                    status: Some("Official".to_string()),
                },
            ],
        };

        let ident = to_identification(response);
        assert_eq!(ident.track.artist.as_deref(), Some("Queen & David Bowie"));
        assert_eq!(ident.track.album.as_deref(), Some("Hot Space"));
        assert_eq!(ident.track.title.as_deref(), Some("Under Pressure"));
        assert_eq!(ident.source, EnrichmentSource::MusicBrainz);
    }

    #[test]
    fn test_no_releases_no_album() {
        let response = dto::RecordingResponse {
            id: "rec-1".to_string(),
            title: "Demo".to_string(),
            artist_credit: vec![],
            releases: vec![],
        };

        let ident = to_identification(response);
        assert!(ident.track.album.is_none());
        assert!(ident.track.artist.is_none());
    }
}
