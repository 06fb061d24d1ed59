//! Resolution engine.
//!
//! Takes a [`TrackRecord`] and fills its artist, album and title from, in
//! order: the existing tags, the filename, an audio fingerprint lookup, a
//! text search, and finally the `"not found"` sentinel. A stage never
//! replaces a value an earlier stage left valid.
//!
//! Remote lookups are injected as [`FingerprintSource`] and
//! [`TextSearchSource`] so tests can run the whole pipeline against mocks.
//! No lookup failure ever escapes [`Resolver::resolve`].

pub mod stages;

use std::time::Duration;

use crate::config::{LookupConfig, SearchErrorPolicy};
use crate::enrichment::{FingerprintOutcome, FingerprintSource, TextSearchSource};
use crate::filename;
use crate::model::{Field, TrackFields, TrackRecord};

/// Tunables for one resolver.
#[derive(Debug, Clone)]
pub struct ResolveSettings {
    pub min_confidence: f32,
    pub fingerprint_cooldown: Duration,
    pub search_cooldown: Duration,
    pub search_error_policy: SearchErrorPolicy,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        (&LookupConfig::default()).into()
    }
}

impl From<&LookupConfig> for ResolveSettings {
    fn from(config: &LookupConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            fingerprint_cooldown: config.fingerprint_cooldown(),
            search_cooldown: config.search_cooldown(),
            search_error_policy: config.search_error_policy,
        }
    }
}

/// Where each filled field came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionReport {
    pub from_filename: Vec<Field>,
    pub from_fingerprint: Vec<Field>,
    pub from_search: Vec<Field>,
    pub not_found: Vec<Field>,
    /// Confidence of the fingerprint match, if the service returned one
    pub fingerprint_confidence: Option<f32>,
    pub search_calls: usize,
    /// A search error cut the text-search stage short
    pub search_stopped: bool,
}

/// Final fields for one file plus how they were obtained.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub fields: TrackFields,
    pub report: ResolutionReport,
}

/// Runs the resolution stages against optional remote sources.
///
/// A `None` source disables its stage.
pub struct Resolver<F, S> {
    fingerprint: Option<F>,
    search: Option<S>,
    settings: ResolveSettings,
}

impl<F: FingerprintSource, S: TextSearchSource> Resolver<F, S> {
    pub fn new(fingerprint: Option<F>, search: Option<S>, settings: ResolveSettings) -> Self {
        Self {
            fingerprint,
            search,
            settings,
        }
    }

    /// Resolve final fields for `record`. Never fails.
    pub async fn resolve(&self, record: &TrackRecord) -> Resolution {
        let mut report = ResolutionReport::default();
        let parsed = filename::parse_path(record.path());

        let (fields, applied) = stages::seed_from_filename(record.current.clone(), &parsed);
        if !applied.is_empty() {
            tracing::debug!("{}: from filename: {:?}", record.path().display(), applied);
        }
        report.from_filename = applied;

        let fields = match &self.fingerprint {
            Some(source) if fields.any_invalid() => {
                self.fingerprint_stage(source, record, fields, &mut report).await
            }
            _ => fields,
        };

        let fields = match &self.search {
            Some(source) if fields.any_invalid() => {
                self.search_stage(source, record, fields, &mut report).await
            }
            _ => fields,
        };

        let (fields, not_found) = stages::fill_sentinel(fields);
        if !not_found.is_empty() {
            tracing::info!("{}: not found: {:?}", record.path().display(), not_found);
        }
        report.not_found = not_found;

        Resolution { fields, report }
    }

    async fn fingerprint_stage(
        &self,
        source: &F,
        record: &TrackRecord,
        fields: TrackFields,
        report: &mut ResolutionReport,
    ) -> TrackFields {
        let path = record.path().display();
        let outcome = source.identify(record.path()).await;

        match &outcome {
            FingerprintOutcome::Success { confidence, .. } => {
                report.fingerprint_confidence = Some(*confidence);
                if *confidence > self.settings.min_confidence {
                    tracing::info!("{}: fingerprint match ({:.2})", path, confidence);
                } else {
                    tracing::info!(
                        "{}: fingerprint match too weak ({:.2} <= {:.2})",
                        path,
                        confidence,
                        self.settings.min_confidence
                    );
                }
            }
            FingerprintOutcome::NoMatch { best_score } => {
                report.fingerprint_confidence = *best_score;
                match best_score {
                    Some(score) => tracing::info!("{}: no fingerprint match above floor (best {:.2})", path, score),
                    None => tracing::info!("{}: no fingerprint match", path),
                }
            }
            FingerprintOutcome::NoBackend => {
                tracing::warn!("{}: fingerprinting unavailable, is fpcalc installed?", path);
            }
            FingerprintOutcome::GenerationFailed { reason } => {
                tracing::warn!("{}: could not fingerprint: {}", path, reason);
            }
            FingerprintOutcome::OtherError { message } => {
                tracing::warn!("{}: fingerprint lookup failed: {}", path, message);
            }
        }

        let (fields, applied) =
            stages::apply_fingerprint(fields, &outcome, self.settings.min_confidence);
        if !applied.is_empty() {
            tracing::debug!("{}: from fingerprint: {:?}", path, applied);
        }
        report.from_fingerprint = applied;

        if outcome.reached_service() {
            pause(self.settings.fingerprint_cooldown).await;
        }
        fields
    }

    async fn search_stage(
        &self,
        source: &S,
        record: &TrackRecord,
        mut fields: TrackFields,
        report: &mut ResolutionReport,
    ) -> TrackFields {
        let path = record.path().display();

        for field in fields.invalid_fields() {
            let Some(query) = stages::search_query(&fields) else {
                tracing::debug!("{}: nothing to search with", path);
                break;
            };

            let result = source.search(&query).await;
            report.search_calls += 1;

            match result {
                Ok(hit) => {
                    let (next, applied) = stages::apply_search_hit(fields, field, &hit);
                    fields = next;
                    if applied {
                        tracing::debug!("{}: {} from search", path, field);
                        report.from_search.push(field);
                    }
                }
                Err(e) => {
                    tracing::warn!("{}: search for {} failed: {}", path, field, e);
                    if self.settings.search_error_policy == SearchErrorPolicy::StopFile {
                        report.search_stopped = true;
                        pause(self.settings.search_cooldown).await;
                        break;
                    }
                }
            }

            pause(self.settings.search_cooldown).await;
        }
        fields
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
