//! Record types shared between discovery, extraction, and output
//!
//! A [`ListingHint`] is harvested opportunistically from listing-page markup
//! and consumed once. A [`DetailFields`] is the Field Extractor's output for
//! one detail page. Merging the two produces the immutable [`MovieRecord`]
//! that goes to the sink.

use serde::{Deserialize, Serialize};

/// Hint harvested from a listing page around one detail link
///
/// `detail_url` is the canonical absolute URL and the sole dedup key for the
/// whole run. Poster and genre hints are best-effort and may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHint {
    pub detail_url: String,
    pub poster: Option<String>,
    pub genre_hint: Option<String>,
}

/// Fields extracted from one detail page
///
/// Every field is independently optional; a miss is an empty string, never an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub name: String,
    pub rating: String,
    pub genre: String,
    pub poster: String,
}

/// One merged output record
///
/// Field names mirror the sink's header row. Immutable once created; its
/// lifetime ends when written to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub name: String,
    pub image_url: String,
    pub rating: String,
    pub genre: String,
    pub detail_url: String,
}

impl MovieRecord {
    /// Merges a listing hint with the detail-page extraction for its URL
    ///
    /// Precedence: poster from the listing page if present, else from the
    /// detail page; genre from the detail page if present, else the listing
    /// hint; name and rating always from the detail page.
    pub fn merge(hint: &ListingHint, fields: DetailFields) -> Self {
        let image_url = match &hint.poster {
            Some(poster) => poster.clone(),
            None => fields.poster,
        };
        let genre = if fields.genre.is_empty() {
            hint.genre_hint.clone().unwrap_or_default()
        } else {
            fields.genre
        };

        Self {
            name: fields.name,
            image_url,
            rating: fields.rating,
            genre,
            detail_url: hint.detail_url.clone(),
        }
    }
}
