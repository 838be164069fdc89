//! URL handling for the scraper
//!
//! Listing-page URL construction and href resolution against the site base.
//! The detail-link pattern matcher lives in [`matcher`].

mod matcher;

pub use matcher::DetailLinkMatcher;

use crate::{UrlError, UrlResult};
use url::Url;

/// Path segment prefix for listing pages. Page 1 lives at `<base>/page/1`.
const PAGE_PATH: &str = "page";

/// Builds the URL of a listing page for a 1-based page index
///
/// # Example
///
/// ```
/// use cinescrape::url::page_url;
/// use url::Url;
///
/// let base = Url::parse("https://movies.example.com").unwrap();
/// let page = page_url(&base, 3).unwrap();
/// assert_eq!(page.as_str(), "https://movies.example.com/page/3");
/// ```
pub fn page_url(base: &Url, index: u32) -> UrlResult<Url> {
    base.join(&format!("/{}/{}", PAGE_PATH, index))
        .map_err(|e| UrlError::Parse(format!("page {} of {}: {}", index, base, e)))
}

/// Resolves an href to an absolute URL against the site base
///
/// Returns `None` for empty hrefs and hrefs that fail to resolve. The
/// resolved form is the canonical dedup key for detail pages, so all
/// callers must go through this function.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://movies.example.com").unwrap()
    }

    #[test]
    fn test_page_url_first_page() {
        let url = page_url(&base(), 1).unwrap();
        assert_eq!(url.as_str(), "https://movies.example.com/page/1");
    }

    #[test]
    fn test_page_url_ignores_base_path() {
        let base = Url::parse("https://movies.example.com/index.html").unwrap();
        let url = page_url(&base, 7).unwrap();
        assert_eq!(url.as_str(), "https://movies.example.com/page/7");
    }

    #[test]
    fn test_resolve_relative() {
        let url = resolve(&base(), "/detail/42").unwrap();
        assert_eq!(url.as_str(), "https://movies.example.com/detail/42");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let url = resolve(&base(), "https://cdn.example.com/p.jpg").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/p.jpg");
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let url = resolve(&base(), "  /detail/1  ").unwrap();
        assert_eq!(url.as_str(), "https://movies.example.com/detail/1");
    }

    #[test]
    fn test_resolve_empty_is_none() {
        assert!(resolve(&base(), "").is_none());
        assert!(resolve(&base(), "   ").is_none());
    }
}
