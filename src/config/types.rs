use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Kumo-Weave
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub scope: ScopeConfig,
    pub dedup: DedupConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent worker tasks
    #[serde(rename = "worker-count")]
    pub worker_count: usize,

    /// Pause between a worker's successive requests (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Pages larger than this many bytes skip extraction and dedup
    #[serde(rename = "max-content-bytes", default = "default_max_content_bytes")]
    pub max_content_bytes: usize,

    /// Pages with fewer kept tokens than this propagate no links
    #[serde(rename = "min-tokens-for-links", default = "default_min_tokens_for_links")]
    pub min_tokens_for_links: usize,

    /// Consult robots.txt before fetching
    #[serde(rename = "respect-robots-txt", default = "default_true")]
    pub respect_robots_txt: bool,
}

impl CrawlerConfig {
    /// The politeness delay as a Duration
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// The full user agent string sent with every request
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn user_agent_string(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Crawl-scope configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// URLs the crawl starts from
    pub seeds: Vec<String>,

    /// Root domains whose subdomains are in scope
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Root under which per-subdomain page counts are tracked
    #[serde(rename = "subdomain-root")]
    pub subdomain_root: String,

    /// File extensions excluded from the crawl
    #[serde(rename = "blocked-extensions", default = "default_blocked_extensions")]
    pub blocked_extensions: Vec<String>,

    /// Path segments excluded from the crawl (exact, case-insensitive)
    #[serde(rename = "blocked-path-segments", default)]
    pub blocked_path_segments: Vec<String>,

    /// Query substrings that mark a URL as low-value
    #[serde(rename = "blocked-query-markers", default)]
    pub blocked_query_markers: Vec<String>,
}

/// Near-duplicate detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DedupConfig {
    /// Similarity above which two fingerprints are the same content
    #[serde(
        rename = "similarity-threshold",
        default = "default_similarity_threshold"
    )]
    pub similarity_threshold: f64,

    /// Path to the append-only fingerprint log
    #[serde(rename = "fingerprint-log")]
    pub fingerprint_log: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the plain-text crawl report
    #[serde(rename = "report-path")]
    pub report_path: String,
}

fn default_max_content_bytes() -> usize {
    1_048_576
}

fn default_min_tokens_for_links() -> usize {
    50
}

fn default_similarity_threshold() -> f64 {
    0.9
}

fn default_true() -> bool {
    true
}

fn default_blocked_extensions() -> Vec<String> {
    [
        "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2",
        "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps",
        "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe",
        "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz",
        "sha1", "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma",
        "zip", "rar", "gz",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
