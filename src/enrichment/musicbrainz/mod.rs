//! MusicBrainz API integration
//!
//! Used after AcoustID identifies a recording by its MusicBrainz ID, to fill
//! in the album when AcoustID returned no release group.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_identification;
pub use client::MusicBrainzClient;
