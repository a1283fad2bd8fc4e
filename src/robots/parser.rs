//! Robots.txt rule evaluation
//!
//! This module wraps the robotstxt crate's matcher behind a small owned type.
//! Rules are kept as raw text and matched on demand; an empty rule set allows
//! everything.

use robotstxt::DefaultMatcher;

/// Robots.txt rules for a single origin
///
/// An empty rule set (no robots.txt, fetch failure, blank file) permits every
/// URL, matching the convention that absence of a policy means allow.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt text (empty means allow all)
    rules: String,
}

impl ParsedRobots {
    /// Creates a rule set from raw robots.txt text
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    pub fn from_content(content: &str) -> Self {
        Self {
            rules: content.to_string(),
        }
    }

    /// Creates a permissive rule set that allows everything
    ///
    /// Used whenever an origin's robots.txt could not be obtained.
    pub fn allow_all() -> Self {
        Self {
            rules: String::new(),
        }
    }

    /// Checks whether the given user agent may fetch a URL
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL (or path) to check
    /// * `user_agent` - The crawler's user agent name
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }

        // Parse and match on demand
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.rules, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all_permits_everything() {
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_allowed("http://ics.uci.edu/", "KumoWeave"));
        assert!(robots.is_allowed("http://ics.uci.edu/private", "KumoWeave"));
    }

    #[test]
    fn test_empty_content_permits_everything() {
        let robots = ParsedRobots::from_content("");
        assert!(robots.is_allowed("http://ics.uci.edu/any/path", "KumoWeave"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed("http://ics.uci.edu/", "KumoWeave"));
        assert!(!robots.is_allowed("http://ics.uci.edu/page", "KumoWeave"));
    }

    #[test]
    fn test_disallow_prefix() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /admin");
        assert!(robots.is_allowed("http://ics.uci.edu/", "KumoWeave"));
        assert!(robots.is_allowed("http://ics.uci.edu/page", "KumoWeave"));
        assert!(!robots.is_allowed("http://ics.uci.edu/admin", "KumoWeave"));
        assert!(!robots.is_allowed("http://ics.uci.edu/admin/users", "KumoWeave"));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let robots =
            ParsedRobots::from_content("User-agent: *\nDisallow: /private\nAllow: /private/pub");
        assert!(!robots.is_allowed("http://ics.uci.edu/private", "KumoWeave"));
        assert!(robots.is_allowed("http://ics.uci.edu/private/pub", "KumoWeave"));
    }

    #[test]
    fn test_agent_specific_group() {
        let robots = ParsedRobots::from_content(
            "User-agent: KumoWeave\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(!robots.is_allowed("http://ics.uci.edu/page", "KumoWeave"));
        assert!(robots.is_allowed("http://ics.uci.edu/page", "OtherBot"));
    }

    #[test]
    fn test_garbage_content_permits_everything() {
        let robots = ParsedRobots::from_content("this is not a robots.txt file {{{");
        assert!(robots.is_allowed("http://ics.uci.edu/any", "KumoWeave"));
    }

    #[test]
    fn test_bare_path_matching() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /admin");
        assert!(!robots.is_allowed("/admin/users", "KumoWeave"));
        assert!(robots.is_allowed("/public", "KumoWeave"));
    }
}
