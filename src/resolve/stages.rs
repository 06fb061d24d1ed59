//! Pure resolution stages.
//!
//! Each stage takes the current fields by value and returns the updated
//! fields plus the list of fields it filled. None of them ever replaces a
//! value that is already valid, and none of them write an invalid value.

use crate::enrichment::{FingerprintOutcome, IdentifiedTrack, SearchQuery};
use crate::filename::ParsedFilename;
use crate::model::{Field, NOT_FOUND, TrackFields};

/// Fields a stage filled, in resolution order.
pub type Applied = Vec<Field>;

/// Copy `candidate` into `field` if the field is invalid and the candidate is not.
fn fill(fields: &mut TrackFields, field: Field, candidate: Option<&str>) -> bool {
    match candidate {
        Some(value) if fields.is_invalid(field) && field.is_valid(Some(value)) => {
            fields.set(field, value);
            true
        }
        _ => false,
    }
}

/// Step 1: seed invalid fields from the filename parse.
pub fn seed_from_filename(mut fields: TrackFields, parsed: &ParsedFilename) -> (TrackFields, Applied) {
    let applied: Applied = Field::ALL
        .into_iter()
        .filter(|&field| fill(&mut fields, field, parsed.get(field)))
        .collect();
    (fields, applied)
}

/// Step 2: apply a fingerprint match, field by field.
///
/// Only `Success` outcomes scoring strictly above `min_confidence` are used.
pub fn apply_fingerprint(
    mut fields: TrackFields,
    outcome: &FingerprintOutcome,
    min_confidence: f32,
) -> (TrackFields, Applied) {
    let FingerprintOutcome::Success { track, confidence } = outcome else {
        return (fields, Vec::new());
    };
    if *confidence <= min_confidence {
        return (fields, Vec::new());
    }

    let applied: Applied = Field::ALL
        .into_iter()
        .filter(|&field| fill(&mut fields, field, track.get(field)))
        .collect();
    (fields, applied)
}

/// Step 3 query: the currently known fields, or `None` when neither artist
/// nor title is known (album alone is too vague to search by).
pub fn search_query(fields: &TrackFields) -> Option<SearchQuery> {
    let artist = fields.known(Field::Artist);
    let title = fields.known(Field::Title);
    if artist.is_none() && title.is_none() {
        return None;
    }
    Some(SearchQuery {
        artist: artist.map(String::from),
        album: fields.known(Field::Album).map(String::from),
        title: title.map(String::from),
    })
}

/// Step 3 result: take only the field that was searched for.
pub fn apply_search_hit(mut fields: TrackFields, field: Field, hit: &IdentifiedTrack) -> (TrackFields, bool) {
    let applied = fill(&mut fields, field, hit.get(field));
    (fields, applied)
}

/// Step 4: mark everything still invalid as not found.
pub fn fill_sentinel(mut fields: TrackFields) -> (TrackFields, Applied) {
    let applied = fields.invalid_fields();
    for &field in &applied {
        fields.set(field, NOT_FOUND);
    }
    (fields, applied)
}
