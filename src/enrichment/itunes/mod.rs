//! iTunes Search API integration
//!
//! Free-text catalog search used as the last remote fallback, after
//! fingerprinting. Unauthenticated, so callers pace themselves.
//!
//! API docs: https://performance-partners.apple.com/search-api

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_identification;
pub use client::{ITunesClient, SearchQuery};
