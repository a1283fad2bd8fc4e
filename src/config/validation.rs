use crate::config::types::{
    Config, CrawlerConfig, DedupConfig, OutputConfig, ScopeConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_scope_config(&config.scope)?;
    validate_dedup_config(&config.dedup)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.worker_count < 1 || config.worker_count > 64 {
        return Err(ConfigError::Validation(format!(
            "worker_count must be between 1 and 64, got {}",
            config.worker_count
        )));
    }

    if config.politeness_delay_ms < 50 {
        return Err(ConfigError::Validation(format!(
            "politeness_delay_ms must be >= 50ms, got {}ms",
            config.politeness_delay_ms
        )));
    }

    if config.max_content_bytes < 1024 {
        return Err(ConfigError::Validation(format!(
            "max_content_bytes must be >= 1024, got {}",
            config.max_content_bytes
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use the http or https scheme",
                seed
            )));
        }
    }

    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "at least one allowed domain is required".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain(domain)?;
    }
    validate_domain(&config.subdomain_root)?;

    for extension in &config.blocked_extensions {
        if extension.is_empty() || extension.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Invalid blocked extension '{}'",
                extension
            )));
        }
    }

    for segment in &config.blocked_path_segments {
        if segment.is_empty() || segment.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Invalid blocked path segment '{}'",
                segment
            )));
        }
    }

    Ok(())
}

/// Validates dedup configuration
fn validate_dedup_config(config: &DedupConfig) -> Result<(), ConfigError> {
    if !(config.similarity_threshold > 0.0 && config.similarity_threshold < 1.0) {
        return Err(ConfigError::Validation(format!(
            "similarity_threshold must be strictly between 0 and 1, got {}",
            config.similarity_threshold
        )));
    }

    if config.fingerprint_log.is_empty() {
        return Err(ConfigError::Validation(
            "fingerprint_log cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain string
fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must contain at least one dot (e.g., 'ics.uci.edu')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("ics.uci.edu").is_ok());
        assert!(validate_domain("vision.ics.uci.edu").is_ok());
        assert!(validate_domain("127.0.0.1").is_ok());

        assert!(validate_domain("").is_err());
        assert!(validate_domain("localhost").is_err());
        assert!(validate_domain(".uci.edu").is_err());
        assert!(validate_domain("uci.edu.").is_err());
        assert!(validate_domain("uci..edu").is_err());
        assert!(validate_domain("uci_edu.com").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }

    #[test]
    fn test_threshold_bounds() {
        let mut dedup = DedupConfig {
            similarity_threshold: 0.9,
            fingerprint_log: "./fingerprints.log".to_string(),
        };
        assert!(validate_dedup_config(&dedup).is_ok());

        dedup.similarity_threshold = 0.0;
        assert!(validate_dedup_config(&dedup).is_err());

        dedup.similarity_threshold = 1.0;
        assert!(validate_dedup_config(&dedup).is_err());

        dedup.similarity_threshold = 1.5;
        assert!(validate_dedup_config(&dedup).is_err());
    }

    #[test]
    fn test_worker_count_bounds() {
        let mut crawler = CrawlerConfig {
            worker_count: 8,
            politeness_delay_ms: 500,
            max_content_bytes: 1_048_576,
            min_tokens_for_links: 50,
            respect_robots_txt: true,
        };
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.worker_count = 0;
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.worker_count = 65;
        assert!(validate_crawler_config(&crawler).is_err());
    }

    #[test]
    fn test_seed_scheme_is_checked() {
        let scope = ScopeConfig {
            seeds: vec!["ftp://ics.uci.edu/".to_string()],
            allowed_domains: vec!["ics.uci.edu".to_string()],
            subdomain_root: "ics.uci.edu".to_string(),
            blocked_extensions: vec![],
            blocked_path_segments: vec![],
            blocked_query_markers: vec![],
        };
        assert!(validate_scope_config(&scope).is_err());
    }

    #[test]
    fn test_empty_seeds_rejected() {
        let scope = ScopeConfig {
            seeds: vec![],
            allowed_domains: vec!["ics.uci.edu".to_string()],
            subdomain_root: "ics.uci.edu".to_string(),
            blocked_extensions: vec![],
            blocked_path_segments: vec![],
            blocked_query_markers: vec![],
        };
        assert!(validate_scope_config(&scope).is_err());
    }
}
