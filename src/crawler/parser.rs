//! HTML parsing for text and link extraction
//!
//! This module turns a fetched page into the two views the worker needs:
//! the visible text (for tokenization and fingerprinting) and the outbound
//! links (for frontier growth). The underlying parser is recovering, so
//! malformed HTML degrades to whatever could be salvaged and never
//! propagates an error.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Extracts the visible text of a page
///
/// Walks every text node in the document, skipping the contents of
/// `<script>`, `<style>`, and `<noscript>` subtrees, and joins the pieces
/// with single spaces.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|e| matches!(e.name(), "script" | "style" | "noscript"))
                    .unwrap_or(false)
            });
            if hidden {
                continue;
            }

            let piece = text_node.trim();
            if !piece.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(piece);
            }
        }
    }

    text
}

/// Extracts outbound links from a page
///
/// Walks `<a href>` elements, resolves each href against `base_url`, strips
/// URL fragments, and deduplicates within the page while preserving first
/// occurrence order. Scope filtering is the caller's concern; this function
/// only rejects hrefs that cannot become an http(s) URL at all.
///
/// # Link exclusion rules
///
/// - empty or whitespace-only hrefs
/// - `javascript:`, `mailto:`, `tel:`, and `data:` pseudo-links
/// - fragment-only hrefs (same-page anchors)
/// - hrefs that fail to resolve against the base URL
/// - resolved URLs with a scheme other than http or https
///
/// # Arguments
///
/// * `base_url` - The page's own URL, used to resolve relative references
/// * `html` - The HTML content to parse
pub fn extract_links(base_url: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(href, base_url) {
                if seen.insert(url.as_str().to_string()) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute http(s) URL with no fragment
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                return None;
            }
            url.set_fragment(None);
            Some(url)
        }
        Err(_) => None,
    }
}
