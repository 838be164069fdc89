//! Link discovery on listing pages
//!
//! Scans a listing document for detail-page anchors and opportunistically
//! harvests a poster URL and a coarse genre hint from the surrounding
//! markup. Output is deduplicated by canonical URL, first occurrence wins,
//! in document order. Hint harvesting never aborts discovery; a failed
//! harvest degrades to `None`.

use crate::crawler::text::collapse_text;
use crate::record::ListingHint;
use crate::url::{resolve, DetailLinkMatcher};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Ancestor levels searched for a poster image, the anchor itself included
const POSTER_ANCESTOR_DEPTH: usize = 4;

/// Site policy: markers that terminate the genre fragment in listing text
/// (duration unit, "showing" marker, slash)
static HINT_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"分钟|上映|/").unwrap());

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Discovers detail links on a listing page
///
/// # Arguments
///
/// * `document` - The parsed listing page
/// * `base` - The site base URL for resolving references
/// * `matcher` - The compiled detail-link pattern
///
/// # Returns
///
/// Listing hints in document order, deduplicated by canonical URL
pub fn discover(document: &Html, base: &Url, matcher: &DetailLinkMatcher) -> Vec<ListingHint> {
    let mut seen = HashSet::new();
    let mut hints = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !matcher.is_detail_link(href) {
            continue;
        }
        let Some(url) = resolve(base, href) else {
            continue;
        };
        let detail_url = url.to_string();
        if !seen.insert(detail_url.clone()) {
            continue;
        }

        hints.push(ListingHint {
            detail_url,
            poster: poster_near_anchor(&anchor, base),
            genre_hint: genre_hint_for_anchor(&anchor),
        });
    }

    hints
}

/// Harvests a genre hint from the text surrounding an anchor
///
/// Takes the parent container's full text, removes the anchor's own text,
/// cuts the remainder at the first policy separator, and keeps the first
/// whitespace-delimited token of the leading fragment.
fn genre_hint_for_anchor(anchor: &ElementRef) -> Option<String> {
    let parent = anchor.parent().and_then(ElementRef::wrap)?;
    let full_text = collapse_text(&parent);
    let anchor_text = collapse_text(anchor);

    let rest = if anchor_text.is_empty() {
        full_text
    } else {
        full_text.replacen(&anchor_text, "", 1)
    };
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }

    let leading = HINT_SEPARATORS.split(rest).next()?.trim();
    leading.split_whitespace().next().map(str::to_string)
}

/// Searches for a poster image near an anchor
///
/// Explicit depth-bounded walk over parent links, starting at the anchor
/// itself; at each level the first image with a usable source wins.
fn poster_near_anchor(anchor: &ElementRef, base: &Url) -> Option<String> {
    let mut node = Some(**anchor);

    for _ in 0..POSTER_ANCESTOR_DEPTH {
        let current = node?;
        if let Some(element) = ElementRef::wrap(current) {
            if let Some(src) = first_image_source(&element, base) {
                return Some(src);
            }
        }
        node = current.parent();
    }

    None
}

/// First image source within a scope, primary attribute before lazy-load
fn first_image_source(scope: &ElementRef, base: &Url) -> Option<String> {
    for img in scope.select(&IMG_SELECTOR) {
        let value = img.value();
        if let Some(src) = value.attr("src").or_else(|| value.attr("data-src")) {
            if let Some(url) = resolve(base, src) {
                return Some(url.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://movies.example.com").unwrap()
    }

    fn matcher() -> DetailLinkMatcher {
        DetailLinkMatcher::new("/detail/").unwrap()
    }

    fn discover_in(html: &str) -> Vec<ListingHint> {
        let document = Html::parse_document(html);
        discover(&document, &base(), &matcher())
    }

    #[test]
    fn test_discovers_detail_links_in_document_order() {
        let hints = discover_in(
            r#"<html><body>
            <a href="/detail/3">Three</a>
            <a href="/detail/1">One</a>
            <a href="/about">About</a>
            <a href="/detail/2">Two</a>
            </body></html>"#,
        );
        let urls: Vec<_> = hints.iter().map(|h| h.detail_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://movies.example.com/detail/3",
                "https://movies.example.com/detail/1",
                "https://movies.example.com/detail/2",
            ]
        );
    }

    #[test]
    fn test_deduplicates_first_occurrence_wins() {
        let hints = discover_in(
            r#"<html><body>
            <div><a href="/detail/1">First card</a><img src="/img/a.jpg"></div>
            <div><a href="/detail/1">Duplicate</a><img src="/img/b.jpg"></div>
            </body></html>"#,
        );
        assert_eq!(hints.len(), 1);
        assert_eq!(
            hints[0].poster.as_deref(),
            Some("https://movies.example.com/img/a.jpg")
        );
    }

    #[test]
    fn test_genre_hint_from_sibling_text() {
        let hints = discover_in(
            r#"<html><body>
            <div><a href="/detail/1">霸王别姬</a> 剧情 爱情 / 171 分钟</div>
            </body></html>"#,
        );
        assert_eq!(hints[0].genre_hint.as_deref(), Some("剧情"));
    }

    #[test]
    fn test_genre_hint_cut_at_duration_marker() {
        let hints = discover_in(
            r#"<html><body>
            <div><a href="/detail/1">Movie</a> Drama 120分钟</div>
            </body></html>"#,
        );
        assert_eq!(hints[0].genre_hint.as_deref(), Some("Drama"));
    }

    #[test]
    fn test_genre_hint_absent_when_no_sibling_text() {
        let hints = discover_in(
            r#"<html><body><div><a href="/detail/1">Movie</a></div></body></html>"#,
        );
        assert_eq!(hints[0].genre_hint, None);
    }

    #[test]
    fn test_poster_inside_anchor() {
        let hints = discover_in(
            r#"<html><body>
            <a href="/detail/1"><img src="/img/poster.jpg"></a>
            </body></html>"#,
        );
        assert_eq!(
            hints[0].poster.as_deref(),
            Some("https://movies.example.com/img/poster.jpg")
        );
    }

    #[test]
    fn test_poster_found_within_four_ancestor_levels() {
        let hints = discover_in(
            r#"<html><body>
            <div class="card"><img data-src="/img/lazy.jpg">
              <div><div><a href="/detail/1">Movie</a></div></div>
            </div>
            </body></html>"#,
        );
        assert_eq!(
            hints[0].poster.as_deref(),
            Some("https://movies.example.com/img/lazy.jpg")
        );
    }

    #[test]
    fn test_poster_beyond_depth_bound_is_none() {
        let hints = discover_in(
            r#"<html><body>
            <div><img src="/img/far.jpg">
              <div><div><div><div><a href="/detail/1">Movie</a></div></div></div></div>
            </div>
            </body></html>"#,
        );
        assert_eq!(hints[0].poster, None);
    }

    #[test]
    fn test_primary_attribute_beats_lazy_load() {
        let hints = discover_in(
            r#"<html><body>
            <div><a href="/detail/1">M</a><img src="/img/real.jpg" data-src="/img/lazy.jpg"></div>
            </body></html>"#,
        );
        assert_eq!(
            hints[0].poster.as_deref(),
            Some("https://movies.example.com/img/real.jpg")
        );
    }

    #[test]
    fn test_no_links_yields_empty() {
        let hints = discover_in(r#"<html><body><p>Nothing here</p></body></html>"#);
        assert!(hints.is_empty());
    }
}
