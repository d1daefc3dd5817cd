//! Tidemark main entry point
//!
//! This is the command-line interface for the Tidemark crawler.

use clap::Parser;
use std::path::PathBuf;
use tidemark::config::load_config_with_hash;
use tidemark::crawler::crawl;
use tracing_subscriber::EnvFilter;

/// Tidemark: a time-bounded multi-worker web crawler
///
/// Tidemark runs a fixed pool of workers over a seed list for a fixed
/// duration, recording every address it claims or discovers into a
/// newline-delimited visited record.
#[derive(Parser, Debug)]
#[command(name = "tidemark")]
#[command(version)]
#[command(about = "A time-bounded multi-worker web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

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
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tidemark=info,warn"),
            1 => EnvFilter::new("tidemark=debug,info"),
            2 => EnvFilter::new("tidemark=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &tidemark::config::Config, config_hash: &str) -> anyhow::Result<()> {
    println!("=== Tidemark Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", config.crawler.workers);
    println!("  Run duration: {}s", config.crawler.run_duration_secs);
    println!("  Fetch concurrency: {}", config.crawler.fetch_concurrency);
    println!("  Idle backoff: {}ms", config.crawler.idle_backoff_ms);
    println!("  Max address length: {}", config.crawler.max_address_len);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nInput:");
    println!("  Seed list: {}", config.input.seed_path);

    println!("\nOutput:");
    println!("  Visited record: {}", config.output.visited_path);

    // Count seed lines without consuming anything
    let seeds = std::fs::read_to_string(&config.input.seed_path)?;
    let seed_count = seeds.lines().filter(|line| !line.trim().is_empty()).count();

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!(
        "✓ Would start {} workers over {} seed addresses for {}s",
        config.crawler.workers, seed_count, config.crawler.run_duration_secs
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: tidemark::config::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting run: {} workers, {}s duration",
        config.crawler.workers,
        config.crawler.run_duration_secs
    );

    let visited_path = config.output.visited_path.clone();
    match crawl(config).await {
        Ok(summary) => {
            println!(
                "Run complete in {:.1}s: {} seeds claimed, {} fetched, {} failed, {} links discovered",
                summary.elapsed.as_secs_f64(),
                summary.claimed,
                summary.fetched,
                summary.failed,
                summary.links
            );
            println!(
                "{} addresses recorded to {}",
                summary.visited, visited_path
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
