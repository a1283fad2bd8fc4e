use url::Url;

/// Extracts the host from a URL, lowercased
///
/// # Examples
///
/// ```
/// use url::Url;
/// use kumo_weave::url::extract_domain;
///
/// let url = Url::parse("https://Vision.ICS.uci.edu/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("vision.ics.uci.edu".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a host equals a root domain or sits under it
///
/// Matching is case-insensitive and respects label boundaries, so
/// `notics.uci.edu` does not match the root `ics.uci.edu`.
///
/// # Examples
///
/// ```
/// use kumo_weave::url::is_same_or_subdomain;
///
/// assert!(is_same_or_subdomain("ics.uci.edu", "ics.uci.edu"));
/// assert!(is_same_or_subdomain("vision.ics.uci.edu", "ics.uci.edu"));
/// assert!(!is_same_or_subdomain("example.com", "ics.uci.edu"));
/// ```
pub fn is_same_or_subdomain(host: &str, root: &str) -> bool {
    let host = host.to_lowercase();
    let root = root.to_lowercase();

    host == root || host.ends_with(&format!(".{}", root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("http://ics.uci.edu/").unwrap();
        assert_eq!(extract_domain(&url), Some("ics.uci.edu".to_string()));
    }

    #[test]
    fn test_extract_lowercases_host() {
        let url = Url::parse("http://WWW.ICS.UCI.EDU/About").unwrap();
        assert_eq!(extract_domain(&url), Some("www.ics.uci.edu".to_string()));
    }

    #[test]
    fn test_extract_ignores_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_exact_root_matches() {
        assert!(is_same_or_subdomain("ics.uci.edu", "ics.uci.edu"));
    }

    #[test]
    fn test_subdomain_matches() {
        assert!(is_same_or_subdomain("vision.ics.uci.edu", "ics.uci.edu"));
        assert!(is_same_or_subdomain("a.b.ics.uci.edu", "ics.uci.edu"));
    }

    #[test]
    fn test_unrelated_host_does_not_match() {
        assert!(!is_same_or_subdomain("example.com", "ics.uci.edu"));
    }

    #[test]
    fn test_label_boundary_is_respected() {
        assert!(!is_same_or_subdomain("notics.uci.edu", "ics.uci.edu"));
    }

    #[test]
    fn test_root_is_not_subdomain_of_child() {
        assert!(!is_same_or_subdomain("uci.edu", "ics.uci.edu"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(is_same_or_subdomain("Vision.ICS.UCI.edu", "ics.uci.EDU"));
    }
}
