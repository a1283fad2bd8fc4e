//! Kumo-Weave main entry point
//!
//! This is the command-line interface for the Kumo-Weave scoped web crawler.

use anyhow::Context;
use clap::Parser;
use kumo_weave::config::load_config_with_hash;
use kumo_weave::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumo-Weave: a scoped web crawler with near-duplicate detection
///
/// Kumo-Weave crawls a configured set of root domains while respecting
/// robots.txt, rejects near-duplicate pages with SimHash fingerprints, and
/// writes a plain-text report of corpus statistics.
#[derive(Parser, Debug)]
#[command(name = "kumo-weave")]
#[command(version = "0.1.0")]
#[command(about = "A scoped web crawler with near-duplicate detection", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Rehydrate the fingerprint log from a previous run (default behavior)
    #[arg(long, conflicts_with = "fresh")]
    resume: bool,

    /// Start a fresh crawl, truncating the fingerprint log
    #[arg(long, conflicts_with = "resume")]
    fresh: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.fresh).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo_weave=info,warn"),
            1 => EnvFilter::new("kumo_weave=debug,info"),
            2 => EnvFilter::new("kumo_weave=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &kumo_weave::config::Config) {
    println!("=== Kumo-Weave Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", config.crawler.worker_count);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Max content bytes: {}", config.crawler.max_content_bytes);
    println!(
        "  Min tokens for links: {}",
        config.crawler.min_tokens_for_links
    );
    println!("  Respect robots.txt: {}", config.crawler.respect_robots_txt);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.user_agent_string());

    println!("\nScope:");
    println!("  Allowed domains ({}):", config.scope.allowed_domains.len());
    for domain in &config.scope.allowed_domains {
        println!("    - {}", domain);
    }
    println!("  Subdomain tracking root: {}", config.scope.subdomain_root);
    println!(
        "  Blocked extensions: {}, path segments: {}, query markers: {}",
        config.scope.blocked_extensions.len(),
        config.scope.blocked_path_segments.len(),
        config.scope.blocked_query_markers.len()
    );

    println!("\nDeduplication:");
    println!(
        "  Similarity threshold: {}",
        config.dedup.similarity_threshold
    );
    println!("  Fingerprint log: {}", config.dedup.fingerprint_log);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\nSeed URLs ({}):", config.scope.seeds.len());
    for seed in &config.scope.seeds {
        println!("  * {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.scope.seeds.len()
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: kumo_weave::config::Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (truncating fingerprint log)");
    } else {
        tracing::info!("Starting crawl (rehydrating fingerprint log if present)");
    }

    tracing::info!(
        "Scope: {} allowed domains, {} seed URLs",
        config.scope.allowed_domains.len(),
        config.scope.seeds.len()
    );

    match crawl(config, fresh).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
