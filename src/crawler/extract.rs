//! Heuristic field extraction from detail pages
//!
//! Each field runs a cascade of independent strategies, tried in order,
//! first success wins. The ordering encodes a reliability-descending
//! policy: a structural heuristic first (most reliable when present),
//! degrading to textual/positional heuristics that survive markup drift
//! but are noisier. A miss is an empty string, never an error; the whole
//! extractor is a pure function of the document.

use crate::crawler::text::{collapse_text, flatten_text};
use crate::record::DetailFields;
use crate::url::resolve;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Characters scanned after the extracted name for a nearby rating token
const RATING_WINDOW_CHARS: usize = 300;

/// Site policy: path markers identifying poster images
const POSTER_MARKERS: [&str; 2] = ["movie", "meituan"];

/// First integer-or-decimal token
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Token in the 0-10 rating range: one digit with optional decimals, or 10
static RATING_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(10(?:\.0+)?|[0-9](?:\.\d+)?)\b").unwrap());

static RATING_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(score|rating)").unwrap());

static GENRE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(category|categories|genre|genres|tags|types)\b").unwrap());

/// Site policy: separators between genre tokens in flattened text
static GENRE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[、，,/·|]+|\s{2,}").unwrap());

/// Site policy: text-node markers for the genre fallback (duration unit,
/// "showing" marker, slash)
static GENRE_TEXT_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"分钟|上映|/").unwrap());

/// Embedded date tokens stripped from genre fragments
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}[-年]\d{1,2}[-月]\d{1,2}").unwrap());

static HEADING_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["h2", "h1", "h3"]
        .iter()
        .map(|tag| Selector::parse(tag).unwrap())
        .collect()
});
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static CLASSED_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("[class]").unwrap());
static LINK_OR_SPAN_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a, span").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Extracts all record fields from one detail page
///
/// # Arguments
///
/// * `document` - The parsed detail page
/// * `base` - The site base URL for resolving poster references
pub fn extract(document: &Html, base: &Url) -> DetailFields {
    let name = extract_name(document);
    let page_text = flatten_text(document);
    let rating = extract_rating(document, &name, &page_text);
    let genre = extract_genre(document);
    let poster = extract_poster(document, base);

    DetailFields {
        name,
        rating,
        genre,
        poster,
    }
}

/// Name: first non-empty heading text in priority order h2, h1, h3;
/// falls back to the page title
fn extract_name(document: &Html) -> String {
    for selector in HEADING_SELECTORS.iter() {
        for element in document.select(selector) {
            let text = collapse_text(&element);
            if !text.is_empty() {
                return text;
            }
        }
    }

    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| collapse_text(&element))
        .unwrap_or_default()
}

/// Rating: score/rating-classed element, else a range token near the name,
/// else the first range token anywhere on the page
fn extract_rating(document: &Html, name: &str, page_text: &str) -> String {
    rating_from_class(document)
        .or_else(|| rating_near_name(page_text, name))
        .or_else(|| rating_anywhere(page_text))
        .unwrap_or_default()
}

fn rating_from_class(document: &Html) -> Option<String> {
    for element in document.select(&CLASSED_SELECTOR) {
        let Some(class) = element.value().attr("class") else {
            continue;
        };
        if !RATING_CLASS.is_match(class) {
            continue;
        }
        let text = collapse_text(&element);
        if let Some(found) = NUMBER.find(&text) {
            return Some(found.as_str().to_string());
        }
    }
    None
}

/// Scoped near the name to reduce false positives from unrelated numbers
/// elsewhere on the page. The window is character-counted, never
/// byte-sliced, so multi-byte text cannot split a code point.
fn rating_near_name(page_text: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let index = page_text.find(name)?;
    let window: String = page_text[index..].chars().take(RATING_WINDOW_CHARS).collect();
    RATING_RANGE
        .find(&window)
        .map(|found| found.as_str().to_string())
}

fn rating_anywhere(page_text: &str) -> Option<String> {
    RATING_RANGE
        .find(page_text)
        .map(|found| found.as_str().to_string())
}

/// Genre: tokens collected from genre-classed elements, else a single
/// combined token recovered from free text
fn extract_genre(document: &Html) -> String {
    genre_from_class(document)
        .or_else(|| genre_from_text(document))
        .unwrap_or_default()
}

/// Collects genre tokens from every element whose class matches the genre
/// vocabulary. Returns `Some` whenever at least one candidate element
/// exists, even if it yielded no tokens: the free-text fallback only runs
/// when no class-based candidate exists anywhere.
fn genre_from_class(document: &Html) -> Option<String> {
    let mut found_candidate = false;
    let mut tags: Vec<String> = Vec::new();

    for element in document.select(&CLASSED_SELECTOR) {
        let Some(class) = element.value().attr("class") else {
            continue;
        };
        if !GENRE_CLASS.is_match(class) {
            continue;
        }
        found_candidate = true;

        let mut items: Vec<String> = element
            .select(&LINK_OR_SPAN_SELECTOR)
            .map(|nested| collapse_text(&nested))
            .filter(|text| !text.is_empty())
            .collect();

        if items.is_empty() {
            let raw = collapse_text(&element);
            items = GENRE_SEPARATORS
                .split(&raw)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect();
        }

        for item in items {
            if !tags.contains(&item) {
                tags.push(item);
            }
        }
    }

    if !found_candidate {
        return None;
    }
    Some(tags.join(", "))
}

/// Free-text fallback: the first text node carrying a policy marker, cut
/// at the slash, date tokens stripped, first whitespace token kept as a
/// single combined genre
fn genre_from_text(document: &Html) -> Option<String> {
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if !GENRE_TEXT_MARKERS.is_match(text) {
            continue;
        }
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let left = text.split('/').next().unwrap_or("").trim();
        let cleaned = DATE_PATTERN.replace_all(left, "");
        if let Some(token) = cleaned.split_whitespace().next() {
            return Some(token.to_string());
        }
    }
    None
}

/// Poster: first image whose source carries a site path marker, else the
/// first image element's source, else empty
fn extract_poster(document: &Html, base: &Url) -> String {
    for img in document.select(&IMG_SELECTOR) {
        let value = img.value();
        let Some(src) = value.attr("src").or_else(|| value.attr("data-src")) else {
            continue;
        };
        if POSTER_MARKERS.iter().any(|marker| src.contains(marker)) {
            if let Some(url) = resolve(base, src) {
                return url.to_string();
            }
        }
    }

    if let Some(img) = document.select(&IMG_SELECTOR).next() {
        let value = img.value();
        if let Some(src) = value.attr("src").or_else(|| value.attr("data-src")) {
            if let Some(url) = resolve(base, src) {
                return url.to_string();
            }
        }
    }

    String::new()
}
