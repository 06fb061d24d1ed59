//! Remote track identification - fills tag gaps from external services.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`acoustid/dto.rs`, `musicbrainz/dto.rs`, `itunes/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Fingerprint** - Audio fingerprint generation via fpcalc
//! - **Service** - Fingerprint lookup orchestration (AcoustID, then MusicBrainz)
//! - **Traits** - The seams the resolution engine depends on
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{FingerprintService, FingerprintConfig, FingerprintSource};
//!
//! let service = FingerprintService::new(&FingerprintConfig::default())?;
//! match service.identify(Path::new("song.mp3")).await {
//!     FingerprintOutcome::Success { track, confidence } => println!("{:?} ({confidence})", track.title),
//!     other => println!("no identification: {other:?}"),
//! }
//! ```

pub mod domain;
pub mod acoustid;
pub mod musicbrainz;
pub mod itunes;
pub mod fingerprint;
pub mod service;
pub mod traits;

use std::time::Duration;

pub use domain::{EnrichmentError, FingerprintOutcome, IdentifiedTrack};
pub use itunes::{ITunesClient, SearchQuery};
pub use service::{FingerprintConfig, FingerprintService};
pub use traits::{FingerprintSource, TextSearchSource};

/// User agent sent to every service. MusicBrainz rejects anonymous clients.
const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/tag-minder)"
);

/// Build the HTTP client shared by the API clients.
///
/// Accepts gzip-compressed responses and applies `timeout` to every request;
/// a timeout surfaces as [`EnrichmentError::Network`] like any other failure.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, EnrichmentError> {
    reqwest::Client::builder()
        .gzip(true)
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| EnrichmentError::Network(format!("Failed to build HTTP client: {e}")))
}
