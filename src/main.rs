//! Sitescrape main entry point
//!
//! This is the command-line interface for the Sitescrape single-site scraper.

use anyhow::{bail, Context};
use clap::Parser;
use sitescrape::config::{load_settings, CrawlConfig, OutputTargets, Settings};
use sitescrape::crawler::{scrape_until, Crawler};
use sitescrape::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitescrape: a breadth-first single-site scraper
///
/// Crawls one site from a seed page a generation at a time, collecting the
/// paragraph text of every page visited. Records go to the JSON, TSV, and
/// SQLite files named with `json_filename=`, `tsv_filename=`, and
/// `db_filename=`, or to stdout when none is given.
#[derive(Parser, Debug)]
#[command(name = "sitescrape")]
#[command(version)]
#[command(about = "A breadth-first single-site scraper", long_about = None)]
struct Cli {
    /// source_name start_url [allowed_domain [base_url [cycle_limit]]] [key=value ...]
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Path to TOML configuration file, overridden by ARGS
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resolve and show the configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, targets) = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config, &targets);
        return Ok(());
    }

    handle_crawl(config, &targets).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescrape=info,warn"),
            1 => EnvFilter::new("sitescrape=debug,info"),
            2 => EnvFilter::new("sitescrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Layers the config file, then the command-line arguments
fn resolve_config(cli: &Cli) -> anyhow::Result<(CrawlConfig, OutputTargets)> {
    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_settings(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Settings::default(),
    };

    settings
        .apply_args(&cli.args)
        .context("invalid command-line arguments")?;

    settings.resolve().context("invalid configuration")
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &CrawlConfig, targets: &OutputTargets) {
    println!("=== Sitescrape Dry Run ===\n");

    println!("Crawl:");
    println!("  Source: {}", config.source_name);
    println!("  Start URL: {}", config.start_url);
    println!("  Allowed domain: {}", config.allowed_domain);
    println!("  Base URL: {}", config.base_url);
    println!("  Cycle limit: {}", config.cycle_limit);
    println!("  Backoff: {}s", config.backoff.as_secs());
    match config.request_timeout {
        Some(timeout) => println!("  Request timeout: {}s", timeout.as_secs()),
        None => println!("  Request timeout: transport default"),
    }
    println!("  User agent: {}", config.user_agent);

    println!("\nOutput:");
    if targets.is_empty() {
        println!("  stdout");
    }
    for (sink, path) in [
        ("JSON", &targets.json),
        ("TSV", &targets.tsv),
        ("SQLite", &targets.db),
    ] {
        if let Some(path) = path {
            println!("  {}: {}", sink, path.display());
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig, targets: &OutputTargets) -> anyhow::Result<()> {
    tracing::debug!(
        "Scraping within {} (base {})",
        config.allowed_domain,
        config.base_url
    );

    let mut crawler = Crawler::new(config).context("failed to set up crawler")?;

    let result = scrape_until(&mut crawler, targets, tokio::signal::ctrl_c()).await;
    let (summary, outcomes) = match result {
        Ok(finished) => finished,
        Err(e) => {
            tracing::error!("Scrape stopped: {}", e);
            return Err(e.into());
        }
    };

    // stdout carries the record dump when no sink is configured
    if !targets.is_empty() {
        print_summary(&summary);
    }

    let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    if !failed.is_empty() {
        for outcome in &failed {
            if let Err(e) = &outcome.result {
                eprintln!("Failed to save {}: {}", outcome.sink, e);
            }
        }
        bail!("{} of {} sinks failed", failed.len(), outcomes.len());
    }

    Ok(())
}
