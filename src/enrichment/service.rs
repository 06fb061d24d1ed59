//! Fingerprint identification service
//!
//! Orchestrates the audio-content lookup:
//! 1. Generate audio fingerprint (via fpcalc)
//! 2. Look up fingerprint on AcoustID
//! 3. Keep the best match if it clears the confidence floor
//! 4. Ask MusicBrainz for the album when AcoustID had none
//!
//! Every failure is folded into a [`FingerprintOutcome`] variant; nothing
//! here returns an error to the caller.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::enrichment::{
    acoustid::{self, AcoustIdClient},
    domain::{AudioFingerprint, EnrichmentError, FingerprintOutcome},
    fingerprint,
    musicbrainz::MusicBrainzClient,
    traits::{AcoustIdApi, FingerprintSource, MusicBrainzApi},
};

/// Default pause before a MusicBrainz request
pub const MUSICBRAINZ_DELAY: Duration = Duration::from_millis(1100);

/// Configuration for the fingerprint service
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    /// AcoustID API key (get one at https://acoustid.org/new-application)
    pub acoustid_api_key: String,
    /// Matches must score strictly above this (0.0 to 1.0)
    pub min_confidence: f32,
    /// Whether to fetch the album from MusicBrainz when AcoustID has none
    pub use_musicbrainz: bool,
    /// Per-request network timeout
    pub timeout: Duration,
    /// Pause before each MusicBrainz request (their limit is 1 req/sec)
    pub musicbrainz_delay: Duration,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            acoustid_api_key: crate::config::DEFAULT_ACOUSTID_API_KEY.to_string(),
            min_confidence: 0.5,
            use_musicbrainz: true,
            timeout: Duration::from_secs(10),
            musicbrainz_delay: MUSICBRAINZ_DELAY,
        }
    }
}

/// Identifies tracks by audio fingerprint
pub struct FingerprintService<A = AcoustIdClient, M = MusicBrainzClient> {
    acoustid: A,
    musicbrainz: Option<M>,
    min_confidence: f32,
    musicbrainz_delay: Duration,
}

impl FingerprintService {
    /// Create a service backed by the real AcoustID and MusicBrainz clients
    pub fn new(config: &FingerprintConfig) -> Result<Self, EnrichmentError> {
        let musicbrainz = if config.use_musicbrainz {
            Some(MusicBrainzClient::new(config.timeout)?)
        } else {
            None
        };
        Ok(Self {
            acoustid: AcoustIdClient::new(&config.acoustid_api_key, config.timeout)?,
            musicbrainz,
            min_confidence: config.min_confidence,
            musicbrainz_delay: config.musicbrainz_delay,
        })
    }
}

impl<A: AcoustIdApi, M: MusicBrainzApi> FingerprintService<A, M> {
    /// Assemble a service from arbitrary clients
    pub fn with_clients(acoustid: A, musicbrainz: Option<M>, min_confidence: f32) -> Self {
        Self {
            acoustid,
            musicbrainz,
            min_confidence,
            musicbrainz_delay: MUSICBRAINZ_DELAY,
        }
    }

    /// Override the pause before MusicBrainz requests
    pub fn with_musicbrainz_delay(mut self, delay: Duration) -> Self {
        self.musicbrainz_delay = delay;
        self
    }

    /// Identify a track from an already generated fingerprint
    pub async fn identify_fingerprint(&self, fp: &AudioFingerprint) -> FingerprintOutcome {
        let identifications = match self.acoustid.lookup(fp).await {
            Ok(ids) => ids,
            Err(e) => return e.into(),
        };

        let Some(best) = acoustid::best_identification(identifications) else {
            return FingerprintOutcome::NoMatch { best_score: None };
        };

        tracing::debug!("Best {:?} match scored {:.2}", best.source, best.score);
        if best.score <= self.min_confidence {
            return FingerprintOutcome::NoMatch {
                best_score: Some(best.score),
            };
        }

        let mut track = best.track;

        if track.album.is_none()
            && let Some(ref musicbrainz) = self.musicbrainz
            && let Some(recording_id) = track.recording_id.clone()
        {
            // Respect MusicBrainz rate limits (1 req/sec)
            tokio::time::sleep(self.musicbrainz_delay).await;

            match musicbrainz.lookup_recording(&recording_id).await {
                Ok(mb_result) => track.merge(&mb_result.track),
                Err(e) => {
                    // AcoustID data is still useful without the album
                    tracing::warn!("MusicBrainz lookup failed for {}: {}", recording_id, e);
                }
            }
        }

        FingerprintOutcome::Success {
            track,
            confidence: best.score,
        }
    }
}

#[async_trait]
impl<A: AcoustIdApi, M: MusicBrainzApi> FingerprintSource for FingerprintService<A, M> {
    async fn identify(&self, path: &Path) -> FingerprintOutcome {
        // fpcalc decodes the whole file; keep it off the async worker
        let owned = path.to_path_buf();
        let generated =
            tokio::task::spawn_blocking(move || fingerprint::generate_fingerprint(&owned)).await;

        match generated {
            Ok(Ok(fp)) => self.identify_fingerprint(&fp).await,
            Ok(Err(e)) => e.into(),
            Err(join_error) => FingerprintOutcome::GenerationFailed {
                reason: join_error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::domain::IdentifiedTrack;
    use crate::enrichment::traits::mocks::{MockAcoustId, MockMusicBrainz};

    fn fp() -> AudioFingerprint {
        AudioFingerprint {
            fingerprint: "AQADtNIyRUkkZUqS".to_string(),
            duration_secs: 180,
        }
    }

    fn track(album: Option<&str>) -> IdentifiedTrack {
        IdentifiedTrack {
            recording_id: Some("rec-1".to_string()),
            artist: Some("Queen".to_string()),
            title: Some("Mustapha".to_string()),
            album: album.map(String::from),
        }
    }

    #[test]
    fn test_default_config() {
        let config = FingerprintConfig::default();
        assert_eq!(config.min_confidence, 0.5);
        assert!(config.use_musicbrainz);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.musicbrainz_delay, Duration::from_millis(1100));
    }

    #[tokio::test]
    async fn test_confident_match_succeeds() {
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(Some("Jazz")), 0.93),
            None::<MockMusicBrainz>,
            0.5,
        );

        match service.identify_fingerprint(&fp()).await {
            FingerprintOutcome::Success { track, confidence } => {
                assert_eq!(track.album.as_deref(), Some("Jazz"));
                assert_eq!(confidence, 0.93);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_score_at_floor_is_no_match() {
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(Some("Jazz")), 0.5),
            None::<MockMusicBrainz>,
            0.5,
        );

        assert!(matches!(
            service.identify_fingerprint(&fp()).await,
            FingerprintOutcome::NoMatch { best_score: Some(s) } if s == 0.5
        ));
    }

    #[tokio::test]
    async fn test_empty_results_is_no_match() {
        let service = FingerprintService::with_clients(
            MockAcoustId::no_matches(),
            None::<MockMusicBrainz>,
            0.5,
        );

        assert!(matches!(
            service.identify_fingerprint(&fp()).await,
            FingerprintOutcome::NoMatch { best_score: None }
        ));
    }

    #[tokio::test]
    async fn test_network_error_is_other_error() {
        let service = FingerprintService::with_clients(
            MockAcoustId::with_error(EnrichmentError::Network("timed out".to_string())),
            None::<MockMusicBrainz>,
            0.5,
        );

        assert!(matches!(
            service.identify_fingerprint(&fp()).await,
            FingerprintOutcome::OtherError { message } if message.contains("timed out")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_musicbrainz_fills_missing_album() {
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(None), 0.9),
            Some(MockMusicBrainz::with_album("Jazz")),
            0.5,
        );

        match service.identify_fingerprint(&fp()).await {
            FingerprintOutcome::Success { track, .. } => {
                assert_eq!(track.album.as_deref(), Some("Jazz"));
                assert_eq!(track.artist.as_deref(), Some("Queen"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_musicbrainz_skipped_when_album_known() {
        let musicbrainz = MockMusicBrainz::with_album("Greatest Hits");
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(Some("Jazz")), 0.9),
            Some(musicbrainz),
            0.5,
        );

        let outcome = service.identify_fingerprint(&fp()).await;
        assert!(matches!(outcome, FingerprintOutcome::Success { ref track, .. } if track.album.as_deref() == Some("Jazz")));
        assert_eq!(service.musicbrainz.as_ref().unwrap().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_musicbrainz_failure_keeps_acoustid_match() {
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(None), 0.9),
            Some(MockMusicBrainz::with_error(EnrichmentError::RateLimited)),
            0.5,
        );

        match service.identify_fingerprint(&fp()).await {
            FingerprintOutcome::Success { track, .. } => {
                assert!(track.album.is_none());
                assert_eq!(track.title.as_deref(), Some("Mustapha"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_before_musicbrainz_lookup() {
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(None), 0.9),
            Some(MockMusicBrainz::with_album("Jazz")),
            0.5,
        );

        let start = tokio::time::Instant::now();
        service.identify_fingerprint(&fp()).await;

        assert_eq!(service.musicbrainz.as_ref().unwrap().call_count(), 1);
        assert!(start.elapsed() >= MUSICBRAINZ_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_when_musicbrainz_not_needed() {
        let service = FingerprintService::with_clients(
            MockAcoustId::single_match(track(Some("Jazz")), 0.9),
            Some(MockMusicBrainz::with_album("Greatest Hits")),
            0.5,
        )
        .with_musicbrainz_delay(Duration::from_secs(5));

        let start = tokio::time::Instant::now();
        service.identify_fingerprint(&fp()).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
