//! iTunes Search API Data Transfer Objects
//!
//! These types match what `GET /search?entity=song` returns.
//! DO NOT use these types outside the itunes module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "resultCount": 1,
//!   "results": [{
//!     "wrapperType": "track",
//!     "kind": "song",
//!     "artistName": "Queen",
//!     "collectionName": "A Night at the Opera",
//!     "trackName": "Bohemian Rhapsody"
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub wrapper_type: Option<String>,
    pub kind: Option<String>,
    pub artist_name: Option<String>,
    /// Album title
    pub collection_name: Option<String>,
    pub track_name: Option<String>,
}
