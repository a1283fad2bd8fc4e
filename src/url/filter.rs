//! Crawl-scope filter
//!
//! Decides whether a discovered URL should be enqueued. A URL is in scope
//! when its scheme is http/https, its host sits under one of the allowed
//! root domains, and neither its path extension, path segments, nor query
//! string hit the configured denylists.

use crate::config::ScopeConfig;
use crate::url::domain::{extract_domain, is_same_or_subdomain};
use std::collections::HashSet;
use url::Url;

/// Scope filter built once from configuration and shared by all workers
#[derive(Debug, Clone)]
pub struct UrlFilter {
    allowed_domains: Vec<String>,
    blocked_extensions: HashSet<String>,
    blocked_path_segments: HashSet<String>,
    blocked_query_markers: Vec<String>,
}

impl UrlFilter {
    /// Builds a filter from the scope configuration
    ///
    /// All entries are lowercased once here so per-URL checks stay cheap.
    pub fn new(scope: &ScopeConfig) -> Self {
        Self {
            allowed_domains: scope
                .allowed_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
            blocked_extensions: scope
                .blocked_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            blocked_path_segments: scope
                .blocked_path_segments
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            blocked_query_markers: scope
                .blocked_query_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }

    /// Checks whether a URL is inside the crawl scope
    pub fn is_in_scope(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        let host = match extract_domain(url) {
            Some(h) => h,
            None => return false,
        };
        if !self
            .allowed_domains
            .iter()
            .any(|root| is_same_or_subdomain(&host, root))
        {
            return false;
        }

        let path = url.path().to_lowercase();
        if let Some(ext) = extension_of(&path) {
            if self.blocked_extensions.contains(ext) {
                return false;
            }
        }
        if path
            .split('/')
            .any(|segment| !segment.is_empty() && self.blocked_path_segments.contains(segment))
        {
            return false;
        }

        if let Some(query) = url.query() {
            let query = query.to_lowercase();
            if self
                .blocked_query_markers
                .iter()
                .any(|marker| query.contains(marker))
            {
                return false;
            }
        }

        true
    }
}

/// Returns the extension of the final path segment, if any
fn extension_of(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next()?;
    segment.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_filter() -> UrlFilter {
        UrlFilter::new(&ScopeConfig {
            seeds: vec!["http://www.ics.uci.edu/".to_string()],
            allowed_domains: vec![
                "ics.uci.edu".to_string(),
                "cs.uci.edu".to_string(),
                "informatics.uci.edu".to_string(),
                "stat.uci.edu".to_string(),
            ],
            subdomain_root: "ics.uci.edu".to_string(),
            blocked_extensions: vec![
                "css".to_string(),
                "js".to_string(),
                "pdf".to_string(),
                "png".to_string(),
                "zip".to_string(),
            ],
            blocked_path_segments: vec!["pdf".to_string(), "api".to_string()],
            blocked_query_markers: vec!["share=".to_string()],
        })
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_allowed_root_is_in_scope() {
        let filter = create_test_filter();
        assert!(filter.is_in_scope(&url("http://ics.uci.edu/about")));
        assert!(filter.is_in_scope(&url("https://cs.uci.edu/")));
    }

    #[test]
    fn test_subdomain_is_in_scope() {
        let filter = create_test_filter();
        assert!(filter.is_in_scope(&url("http://vision.ics.uci.edu/projects")));
    }

    #[test]
    fn test_foreign_host_is_out_of_scope() {
        let filter = create_test_filter();
        assert!(!filter.is_in_scope(&url("http://example.com/")));
        assert!(!filter.is_in_scope(&url("http://uci.edu/")));
    }

    #[test]
    fn test_non_http_scheme_is_out_of_scope() {
        let filter = create_test_filter();
        assert!(!filter.is_in_scope(&url("ftp://ics.uci.edu/file")));
        assert!(!filter.is_in_scope(&url("mailto:someone@ics.uci.edu")));
    }

    #[test]
    fn test_blocked_extension_is_out_of_scope() {
        let filter = create_test_filter();
        assert!(!filter.is_in_scope(&url("http://ics.uci.edu/docs/foo.pdf")));
        assert!(!filter.is_in_scope(&url("http://ics.uci.edu/style.css")));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let filter = create_test_filter();
        assert!(!filter.is_in_scope(&url("http://ics.uci.edu/REPORT.PDF")));
    }

    #[test]
    fn test_extension_only_applies_to_final_segment() {
        let filter = create_test_filter();
        assert!(filter.is_in_scope(&url("http://ics.uci.edu/foo.pdf/overview")));
    }

    #[test]
    fn test_blocked_path_segment_is_out_of_scope() {
        let filter = create_test_filter();
        assert!(!filter.is_in_scope(&url("http://ics.uci.edu/pdf/view")));
        assert!(!filter.is_in_scope(&url("http://ics.uci.edu/api/v2/users")));
    }

    #[test]
    fn test_segment_must_match_exactly() {
        let filter = create_test_filter();
        assert!(filter.is_in_scope(&url("http://ics.uci.edu/apis/guide")));
    }

    #[test]
    fn test_blocked_query_marker_is_out_of_scope() {
        let filter = create_test_filter();
        assert!(!filter.is_in_scope(&url("http://ics.uci.edu/page?share=twitter")));
    }

    #[test]
    fn test_plain_query_is_in_scope() {
        let filter = create_test_filter();
        assert!(filter.is_in_scope(&url("http://ics.uci.edu/page?id=7")));
    }

    #[test]
    fn test_dotless_path_has_no_extension() {
        let filter = create_test_filter();
        assert!(filter.is_in_scope(&url("http://ics.uci.edu/research")));
    }

    #[test]
    fn test_host_with_port_matches_allow_list() {
        let filter = UrlFilter::new(&ScopeConfig {
            seeds: vec![],
            allowed_domains: vec!["127.0.0.1".to_string()],
            subdomain_root: "127.0.0.1".to_string(),
            blocked_extensions: vec![],
            blocked_path_segments: vec![],
            blocked_query_markers: vec![],
        });
        assert!(filter.is_in_scope(&url("http://127.0.0.1:8080/page")));
    }
}
