//! Detail-link pattern matching
//!
//! Detail pages are addressed by a fixed path prefix followed by a numeric
//! identifier (e.g. `/detail/42`). The matcher is compiled once from the
//! configured prefix and applied to raw href attribute values.

use crate::{UrlError, UrlResult};
use regex::Regex;

/// Matches hrefs that point at detail pages
#[derive(Debug, Clone)]
pub struct DetailLinkMatcher {
    pattern: Regex,
}

impl DetailLinkMatcher {
    /// Compiles a matcher for the given path prefix
    ///
    /// The prefix is escaped, so configuration values are always treated as
    /// literal path text. The resulting pattern is anchored at both ends:
    /// only `<prefix><digits>` matches, with no trailing path or query.
    pub fn new(prefix: &str) -> UrlResult<Self> {
        let pattern = Regex::new(&format!(r"^{}\d+$", regex::escape(prefix)))
            .map_err(|e| UrlError::Pattern(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Checks whether a raw href value references a detail page
    pub fn is_detail_link(&self, href: &str) -> bool {
        self.pattern.is_match(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> DetailLinkMatcher {
        DetailLinkMatcher::new("/detail/").unwrap()
    }

    #[test]
    fn test_matches_numeric_id() {
        assert!(matcher().is_detail_link("/detail/1"));
        assert!(matcher().is_detail_link("/detail/100384"));
    }

    #[test]
    fn test_rejects_missing_id() {
        assert!(!matcher().is_detail_link("/detail/"));
        assert!(!matcher().is_detail_link("/detail"));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(!matcher().is_detail_link("/detail/abc"));
        assert!(!matcher().is_detail_link("/detail/12x"));
    }

    #[test]
    fn test_rejects_trailing_path() {
        assert!(!matcher().is_detail_link("/detail/12/cast"));
        assert!(!matcher().is_detail_link("/detail/12?ref=home"));
    }

    #[test]
    fn test_rejects_other_paths() {
        assert!(!matcher().is_detail_link("/page/2"));
        assert!(!matcher().is_detail_link("/about"));
    }

    #[test]
    fn test_anchored_at_start() {
        assert!(!matcher().is_detail_link("https://movies.example.com/detail/12"));
        assert!(!matcher().is_detail_link("x/detail/12"));
    }

    #[test]
    fn test_prefix_is_literal() {
        // A prefix containing regex metacharacters must not change semantics.
        let m = DetailLinkMatcher::new("/item.view/").unwrap();
        assert!(m.is_detail_link("/item.view/9"));
        assert!(!m.is_detail_link("/itemxview/9"));
    }
}
