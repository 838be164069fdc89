//! Text flattening shared by discovery and extraction
//!
//! One policy everywhere: trimmed text chunks joined with single spaces.
//! The rating proximity fallback searches the flattened page text for the
//! extracted name, so headings and page text must flatten identically.

use scraper::{ElementRef, Html};

/// Collapses an element's text content into a single-space-joined string
pub(crate) fn collapse_text(element: &ElementRef) -> String {
    let mut out = String::new();
    for chunk in element.text() {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(chunk);
    }
    out
}

/// Collapses the whole document's text content with the same policy
pub(crate) fn flatten_text(document: &Html) -> String {
    collapse_text(&document.root_element())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_joins_chunks_with_single_spaces() {
        let html = Html::parse_document("<html><body><h2>Sample <span>Movie</span></h2></body></html>");
        assert_eq!(flatten_text(&html), "Sample Movie");
    }

    #[test]
    fn test_collapse_trims_whitespace_chunks() {
        let html = Html::parse_document("<html><body><p>  a  </p>\n\n<p>b</p></body></html>");
        assert_eq!(flatten_text(&html), "a b");
    }

    #[test]
    fn test_heading_text_appears_in_flattened_page() {
        let html = Html::parse_document(
            "<html><body><h2>Farewell <em>My</em> Concubine</h2><p>9.5</p></body></html>",
        );
        let selector = scraper::Selector::parse("h2").unwrap();
        let heading = collapse_text(&html.select(&selector).next().unwrap());
        assert!(flatten_text(&html).contains(&heading));
    }

    #[test]
    fn test_empty_document() {
        let html = Html::parse_document("<html><body></body></html>");
        assert_eq!(flatten_text(&html), "");
    }
}
